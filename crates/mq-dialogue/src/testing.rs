use mq_core::{Catalogs, Character, CharacterId, Manor, MaskType, MaskVisuals, Role, RoomType};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::context::StatementContext;

/// A small party built from the standard catalogs.
pub(crate) struct Fixture {
    pub manor: Manor,
    pub catalogs: Catalogs,
    pub round: u32,
    pub target: Role,
    pub used: Vec<Role>,
    pub unused: Vec<Role>,
}

impl Fixture {
    pub fn new(guests: &[(Role, MaskType, RoomType)], target: Role) -> Self {
        let catalogs = Catalogs::standard();
        let mut manor = Manor::new(catalogs.layout.build().unwrap());
        for (role, mask, room) in guests {
            manor
                .add_character(
                    catalogs.roles.get(*role).unwrap().clone(),
                    MaskVisuals::for_mask(*mask),
                    *room,
                )
                .unwrap();
        }
        let used: Vec<Role> = guests.iter().map(|(r, _, _)| *r).collect();
        let unused = Role::ALL
            .iter()
            .copied()
            .filter(|r| !used.contains(r))
            .collect();
        Self {
            manor,
            catalogs,
            round: 1,
            target,
            used,
            unused,
        }
    }

    /// Four guests spread over the Ballroom and Study, Duke as target.
    pub fn party() -> Self {
        Self::new(
            &[
                (Role::King, MaskType::Wolf, RoomType::Ballroom),
                (Role::Duke, MaskType::Fox, RoomType::Ballroom),
                (Role::Baron, MaskType::Mouse, RoomType::Study),
                (Role::Pope, MaskType::Deer, RoomType::Study),
            ],
            Role::Duke,
        )
    }

    pub fn ctx(&self) -> StatementContext<'_> {
        StatementContext {
            manor: &self.manor,
            roles: &self.catalogs.roles,
            masks: &self.catalogs.masks,
            round: self.round,
            target: self.target,
            used_roles: &self.used,
            unused_roles: &self.unused,
        }
    }

    pub fn guest(&self, index: usize) -> &Character {
        self.manor.character(CharacterId(index)).unwrap()
    }
}

pub(crate) fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
