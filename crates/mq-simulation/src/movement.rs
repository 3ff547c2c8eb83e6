use mq_core::{CharacterId, Manor, MovementPriority, MqError, MqResult, MoveOutcome, Role, RoomType};
use rand::Rng;
use rand::rngs::StdRng;

/// How many guests a trait copier may follow before moving at random.
pub const MAX_FOLLOW_DEPTH: usize = 4;

/// A guest's intended destination for the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intention {
    /// The guest.
    pub character: CharacterId,
    /// Where it wants to go.
    pub to: RoomType,
}

/// Pick the next room for `id` using its role's movement heuristic.
///
/// Returns `None` only when the guest stands in a room with no connections.
pub fn next_room(
    manor: &Manor,
    id: CharacterId,
    target: Role,
    rng: &mut StdRng,
) -> MqResult<Option<RoomType>> {
    if manor.character(id).is_none() {
        return Err(MqError::CharacterNotFound(id));
    }
    Ok(decide(manor, id, target, rng, 0))
}

fn decide(
    manor: &Manor,
    id: CharacterId,
    target: Role,
    rng: &mut StdRng,
    depth: usize,
) -> Option<RoomType> {
    let character = manor.character(id)?;
    let graph = manor.graph();
    let room = character.current_room();
    let data = character.role_data();
    if !data.has_custom_movement() {
        return graph.random_connection(room, rng);
    }

    let chosen = match data.movement {
        MovementPriority::Random => None,
        MovementPriority::AvoidTarget => manor.connection_without_role(room, target),
        MovementPriority::PreferSpecificRooms => {
            manor.preferred_connection(room, &data.preferred_rooms)
        }
        MovementPriority::SeekCrowds => graph.most_crowded_connection(room),
        MovementPriority::SeekHighInfluence => manor.highest_influence_connection(room),
        MovementPriority::CopyLastContact => match (character.copied_role(), character.last_contact()) {
            (Some(_), Some(peer)) if depth < MAX_FOLLOW_DEPTH => {
                decide(manor, peer, target, rng, depth + 1)
            }
            (Some(_), Some(_)) => {
                log::debug!("{id} stopped following at depth {depth}");
                None
            }
            _ => None,
        },
    };
    chosen.or_else(|| graph.random_connection(room, rng))
}

/// Decide every guest's move against the same pre-round manor.
///
/// When every destination is a blind spot, one random guest is sent to the
/// home room instead so the player is never left watching empty rooms.
pub fn plan_moves(manor: &Manor, target: Role, rng: &mut StdRng) -> Vec<Intention> {
    let mut plan: Vec<Intention> = manor
        .characters()
        .iter()
        .filter_map(|c| {
            decide(manor, c.id, target, rng, 0).map(|to| Intention {
                character: c.id,
                to,
            })
        })
        .collect();

    let graph = manor.graph();
    if !plan.is_empty() && plan.iter().all(|i| graph.is_blind_spot(i.to)) {
        let pick = rng.random_range(0..plan.len());
        log::debug!(
            "every guest was heading for a blind spot; sending {} to {}",
            plan[pick].character,
            graph.home()
        );
        plan[pick].to = graph.home();
    }
    plan
}

/// Carry out a plan in order.
pub fn apply_moves(manor: &mut Manor, plan: &[Intention]) -> MqResult<Vec<MoveOutcome>> {
    plan.iter()
        .map(|i| manor.move_character(i.character, i.to))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mq_core::{Abilities, Catalogs, MaskType, MaskVisuals, RoleData};
    use rand::SeedableRng;

    fn manor_with(guests: &[(RoleData, RoomType)]) -> Manor {
        let mut manor = Manor::new(Catalogs::standard().layout.build().unwrap());
        for (i, (role, room)) in guests.iter().enumerate() {
            manor
                .add_character(role.clone(), MaskVisuals::for_mask(MaskType::ALL[i]), *room)
                .unwrap();
        }
        manor
    }

    fn standard(role: Role) -> RoleData {
        Catalogs::standard().roles.get(role).unwrap().clone()
    }

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn baron_avoids_target_room() {
        let manor = manor_with(&[
            (standard(Role::Baron), RoomType::Study),
            (standard(Role::King), RoomType::WineCellar),
        ]);
        let next = next_room(&manor, CharacterId(0), Role::King, &mut rng(0)).unwrap();
        assert_eq!(next, Some(RoomType::Ballroom));
    }

    #[test]
    fn countess_prefers_quiet_rooms() {
        let manor = manor_with(&[(standard(Role::Countess), RoomType::Ballroom)]);
        // Ballroom lists the Wine Cellar before the Bathroom.
        let next = next_room(&manor, CharacterId(0), Role::King, &mut rng(0)).unwrap();
        assert_eq!(next, Some(RoomType::WineCellar));
    }

    #[test]
    fn prince_seeks_crowds() {
        let manor = manor_with(&[
            (standard(Role::Prince), RoomType::Ballroom),
            (standard(Role::King), RoomType::Balcony),
            (standard(Role::Duke), RoomType::Balcony),
            (standard(Role::Baron), RoomType::Courtyard),
        ]);
        let next = next_room(&manor, CharacterId(0), Role::King, &mut rng(0)).unwrap();
        assert_eq!(next, Some(RoomType::Balcony));
    }

    #[test]
    fn duke_follows_influence() {
        let manor = manor_with(&[
            (standard(Role::Duke), RoomType::Ballroom),
            (standard(Role::Baron), RoomType::Study),
            (standard(Role::King), RoomType::Courtyard),
        ]);
        let next = next_room(&manor, CharacterId(0), Role::Baron, &mut rng(0)).unwrap();
        assert_eq!(next, Some(RoomType::Courtyard));
    }

    #[test]
    fn spy_delegates_to_last_contact() {
        let mut manor = manor_with(&[
            (standard(Role::Spy), RoomType::Courtyard),
            (standard(Role::Duke), RoomType::Courtyard),
            (standard(Role::King), RoomType::Ballroom),
        ]);
        manor.mingle();
        let duke = next_room(&manor, CharacterId(1), Role::King, &mut rng(0)).unwrap();
        let spy = next_room(&manor, CharacterId(0), Role::King, &mut rng(0)).unwrap();
        assert_eq!(duke, Some(RoomType::Ballroom));
        assert_eq!(spy, duke);
    }

    #[test]
    fn mutual_copiers_terminate() {
        let copier = |role: Role| {
            RoleData::new(role, 1)
                .with_movement(MovementPriority::CopyLastContact)
                .with_abilities(Abilities {
                    copies_traits: true,
                    ..Abilities::default()
                })
        };
        let mut manor = manor_with(&[
            (copier(Role::Spy), RoomType::Balcony),
            (copier(Role::King), RoomType::Balcony),
        ]);
        manor.mingle();
        let next = next_room(&manor, CharacterId(0), Role::Duke, &mut rng(3)).unwrap();
        let next = next.unwrap();
        assert!(manor.graph().is_adjacent(RoomType::Balcony, next));
    }

    #[test]
    fn plain_roles_wander_at_random() {
        let manor = manor_with(&[
            (standard(Role::Pope), RoomType::Ballroom),
            (standard(Role::King), RoomType::Study),
        ]);
        assert!(!manor.character(CharacterId(0)).unwrap().role_data().has_custom_movement());
        let mut seen = std::collections::BTreeSet::new();
        for seed in 0..40 {
            let next = next_room(&manor, CharacterId(0), Role::King, &mut rng(seed)).unwrap();
            let expected = manor.graph().random_connection(RoomType::Ballroom, &mut rng(seed));
            assert_eq!(next, expected);
            seen.extend(next);
        }
        assert!(seen.len() > 1);
    }

    #[test]
    fn unknown_character_is_an_error() {
        let manor = manor_with(&[]);
        assert!(next_room(&manor, CharacterId(0), Role::King, &mut rng(0)).is_err());
    }

    #[test]
    fn intentions_see_pre_round_occupancy() {
        // The Prince heads for the crowded Balcony while the Duke leaves it for
        // the Prince's Courtyard; each decision sees the other still in place.
        let mut manor = manor_with(&[
            (standard(Role::Prince), RoomType::Courtyard),
            (standard(Role::Duke), RoomType::Balcony),
            (standard(Role::Pope), RoomType::Balcony),
        ]);
        let plan = plan_moves(&manor, Role::King, &mut rng(1));
        assert_eq!(
            plan[0],
            Intention {
                character: CharacterId(0),
                to: RoomType::Balcony
            }
        );
        assert_eq!(
            plan[1],
            Intention {
                character: CharacterId(1),
                to: RoomType::Courtyard
            }
        );
        apply_moves(&mut manor, &plan).unwrap();
        assert!(manor.occupancy_is_consistent());
        assert_eq!(
            manor.character(CharacterId(0)).unwrap().current_room(),
            RoomType::Balcony
        );
        assert_eq!(
            manor.character(CharacterId(1)).unwrap().current_room(),
            RoomType::Courtyard
        );
    }

    #[test]
    fn all_blind_plan_is_redirected_home() {
        // Countesses next to the Ballroom always pick a blind spot.
        let countess = |role: Role| {
            RoleData::new(role, 4)
                .with_movement(MovementPriority::PreferSpecificRooms)
                .with_preferred_rooms([RoomType::Bathroom, RoomType::WineCellar])
        };
        let manor = manor_with(&[
            (countess(Role::Countess), RoomType::Ballroom),
            (countess(Role::Baron), RoomType::Study),
            (countess(Role::Prince), RoomType::Ballroom),
        ]);
        for seed in 0..10 {
            let plan = plan_moves(&manor, Role::King, &mut rng(seed));
            assert_eq!(plan.len(), 3);
            let home: Vec<_> = plan.iter().filter(|i| i.to == RoomType::Ballroom).collect();
            assert_eq!(home.len(), 1);
            assert!(plan.iter().any(|i| !manor.graph().is_blind_spot(i.to)));
        }
    }
}
