use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::character::{Character, CharacterId};
use crate::error::{MqError, MqResult};
use crate::mask::{MaskType, MaskVisuals};
use crate::role::{Role, RoleData};
use crate::room::{RoomGraph, RoomType};

/// What happened when a guest changed rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    /// The guest that moved.
    pub character: CharacterId,
    /// Room before the move.
    pub from: RoomType,
    /// Room after the move.
    pub to: RoomType,
    /// Guest the mover was forced to swap masks with, if any.
    pub forced_swap: Option<CharacterId>,
}

/// The party venue: room graph plus every guest in it.
///
/// All occupancy changes go through this type so that a guest's current room
/// and the room occupant lists always agree.
#[derive(Debug, Clone)]
pub struct Manor {
    graph: RoomGraph,
    characters: Vec<Character>,
}

impl Manor {
    /// Create a manor with no guests.
    pub fn new(graph: RoomGraph) -> Self {
        Self {
            graph,
            characters: Vec::new(),
        }
    }

    /// The room graph.
    pub fn graph(&self) -> &RoomGraph {
        &self.graph
    }

    /// All guests in id order.
    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    /// Look up a guest.
    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(id.0)
    }

    fn character_mut(&mut self, id: CharacterId) -> MqResult<&mut Character> {
        self.characters
            .get_mut(id.0)
            .ok_or(MqError::CharacterNotFound(id))
    }

    /// The first guest whose true role is `role`.
    pub fn find_by_role(&self, role: Role) -> Option<&Character> {
        self.characters.iter().find(|c| c.true_role() == role)
    }

    /// Guests still wearing a mask.
    pub fn masked_characters(&self) -> Vec<&Character> {
        self.characters.iter().filter(|c| !c.is_demasked()).collect()
    }

    /// Guests in `room`, in arrival order.
    pub fn characters_in_room(&self, room: RoomType) -> Vec<&Character> {
        self.graph
            .occupants(room)
            .iter()
            .filter_map(|id| self.character(*id))
            .collect()
    }

    /// How many guests wear each mask.
    pub fn mask_counts(&self) -> BTreeMap<MaskType, usize> {
        let mut counts = BTreeMap::new();
        for mask in self.characters.iter().filter_map(Character::mask_type) {
            *counts.entry(mask).or_insert(0) += 1;
        }
        counts
    }

    /// Add a guest and place it in its starting room. Initial placement is
    /// not a move: no swap is triggered and nothing is reported.
    pub fn add_character(
        &mut self,
        role: RoleData,
        mask: MaskVisuals,
        room: RoomType,
    ) -> MqResult<CharacterId> {
        let id = CharacterId(self.characters.len());
        self.graph
            .room_mut(room)
            .ok_or(MqError::UnknownRoom(room))?
            .add_occupant(id);
        self.characters.push(Character::new(id, role, mask, room));
        Ok(id)
    }

    /// Move a guest, transferring it between occupant lists.
    ///
    /// A mover with the force-swap ability that ends up alone with exactly one
    /// other guest swaps masks with that guest. Demasked guests never take part.
    pub fn move_character(&mut self, id: CharacterId, to: RoomType) -> MqResult<MoveOutcome> {
        if self.graph.room(to).is_none() {
            return Err(MqError::UnknownRoom(to));
        }
        let from = self
            .character(id)
            .ok_or(MqError::CharacterNotFound(id))?
            .current_room();

        if let Some(old) = self.graph.room_mut(from) {
            old.remove_occupant(id);
        }
        if let Some(new) = self.graph.room_mut(to) {
            new.add_occupant(id);
        }
        self.character_mut(id)?.set_room(to);

        let forced_swap = self.forced_swap_partner(id, to);
        if let Some(other) = forced_swap {
            self.swap_masks(id, other)?;
            log::debug!("{id} forced a mask swap with {other} in {to}");
        }

        Ok(MoveOutcome {
            character: id,
            from,
            to,
            forced_swap,
        })
    }

    fn forced_swap_partner(&self, id: CharacterId, room: RoomType) -> Option<CharacterId> {
        let mover = self.character(id)?;
        if !mover.role_data().abilities.can_force_swap || mover.is_demasked() {
            return None;
        }
        let occupants = self.graph.occupants(room);
        if occupants.len() != 2 {
            return None;
        }
        occupants
            .iter()
            .copied()
            .find(|o| *o != id)
            .filter(|o| self.character(*o).is_some_and(|c| !c.is_demasked()))
    }

    /// Exchange masks between two guests and mark both as part of the latest swap.
    pub fn swap_masks(&mut self, a: CharacterId, b: CharacterId) -> MqResult<()> {
        if a == b {
            return Err(MqError::Config(format!("{a} cannot swap masks with itself")));
        }
        let mask_a = self.character_mut(a)?.take_mask();
        let mask_b = match self.character_mut(b) {
            Ok(c) => c.take_mask(),
            Err(e) => {
                // Put the first mask back before bailing out.
                self.character_mut(a)?.put_mask(mask_a);
                return Err(e);
            }
        };
        for c in &mut self.characters {
            c.set_in_last_swap(false);
        }
        let first = self.character_mut(a)?;
        first.put_mask(mask_b);
        first.set_in_last_swap(true);
        let second = self.character_mut(b)?;
        second.put_mask(mask_a);
        second.set_in_last_swap(true);
        Ok(())
    }

    /// Remove a guest's mask after a correct identification.
    pub fn demask(&mut self, id: CharacterId) -> MqResult<()> {
        self.character_mut(id)?.put_mask(None);
        Ok(())
    }

    /// Record that `a` met `b`.
    pub fn make_contact(&mut self, a: CharacterId, b: CharacterId) -> MqResult<()> {
        let other = self.character(b).ok_or(MqError::CharacterNotFound(b))?;
        let (other_true, other_effective) = (other.true_role(), other.effective_role());
        self.character_mut(a)?
            .record_contact(b, other_true, other_effective);
        Ok(())
    }

    /// Every guest meets every other guest sharing its room.
    ///
    /// Roles are read before any contact is recorded, so a trait copier sees
    /// the room as it was when everyone arrived. Returns the meetings in the
    /// order they were recorded.
    pub fn mingle(&mut self) -> Vec<(CharacterId, CharacterId)> {
        let mut meetings = Vec::new();
        for room in self.graph.rooms() {
            let occupants = room.occupants();
            for &a in occupants {
                for &b in occupants.iter().filter(|b| **b != a) {
                    if let Some(other) = self.character(b) {
                        meetings.push((a, b, other.true_role(), other.effective_role()));
                    }
                }
            }
        }

        let mut recorded = Vec::with_capacity(meetings.len());
        for (a, b, other_true, other_effective) in meetings {
            if let Some(c) = self.characters.get_mut(a.0) {
                c.record_contact(b, other_true, other_effective);
                recorded.push((a, b));
            }
        }
        recorded
    }

    /// First adjacent room in which nobody holds `role`.
    pub fn connection_without_role(&self, room: RoomType, role: Role) -> Option<RoomType> {
        self.graph.connections(room).iter().copied().find(|next| {
            !self
                .characters_in_room(*next)
                .iter()
                .any(|c| c.true_role() == role)
        })
    }

    /// First adjacent room whose type appears in `preferred`.
    pub fn preferred_connection(&self, room: RoomType, preferred: &[RoomType]) -> Option<RoomType> {
        self.graph
            .connections(room)
            .iter()
            .copied()
            .find(|next| preferred.contains(next))
    }

    /// Adjacent room holding the guest with the highest true influence; first seen wins ties.
    pub fn highest_influence_connection(&self, room: RoomType) -> Option<RoomType> {
        let mut best: Option<(RoomType, i32)> = None;
        for &next in self.graph.connections(room) {
            for guest in self.characters_in_room(next) {
                if best.is_none_or(|(_, top)| guest.influence() > top) {
                    best = Some((next, guest.influence()));
                }
            }
        }
        best.map(|(room, _)| room)
    }

    /// Check that every guest is listed in exactly one room, namely its own.
    pub fn occupancy_is_consistent(&self) -> bool {
        self.characters.iter().all(|c| {
            self.graph.rooms().all(|room| {
                let listed = room.occupants().iter().filter(|o| **o == c.id).count();
                if room.kind == c.current_room() {
                    listed == 1
                } else {
                    listed == 0
                }
            })
        })
    }
}
