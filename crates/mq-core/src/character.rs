use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::mask::{MaskType, MaskVisuals};
use crate::role::{Role, RoleData};
use crate::room::RoomType;

/// Index of a guest within its manor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub usize);

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Guest {}", self.0 + 1)
    }
}

/// One guest at the party.
///
/// The true role never changes after setup. The mask moves between guests
/// through swaps and is cleared once the guest has been correctly identified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Stable identifier.
    pub id: CharacterId,
    /// Display name.
    pub name: String,
    role: RoleData,
    mask: Option<MaskVisuals>,
    room: RoomType,
    contacted: BTreeSet<Role>,
    last_contact: Option<CharacterId>,
    copied_role: Option<Role>,
    was_in_last_swap: bool,
}

impl Character {
    /// Create a guest with its secret role, starting mask, and starting room.
    ///
    /// This does not touch any room's occupant list; [`crate::Manor`] places
    /// the guest.
    pub fn new(id: CharacterId, role: RoleData, mask: MaskVisuals, room: RoomType) -> Self {
        Self {
            id,
            name: id.to_string(),
            role,
            mask: Some(mask),
            room,
            contacted: BTreeSet::new(),
            last_contact: None,
            copied_role: None,
            was_in_last_swap: false,
        }
    }

    /// The secret role assigned at setup.
    pub fn true_role(&self) -> Role {
        self.role.role
    }

    /// Catalog entry for the true role.
    pub fn role_data(&self) -> &RoleData {
        &self.role
    }

    /// Influence of the true role.
    pub fn influence(&self) -> i32 {
        self.role.influence
    }

    /// The role this guest currently presents as. Equals the true role until a
    /// trait-copying guest has made contact with someone.
    pub fn effective_role(&self) -> Role {
        self.copied_role.unwrap_or(self.role.role)
    }

    /// The copied role, if this guest has adopted one.
    pub fn copied_role(&self) -> Option<Role> {
        self.copied_role
    }

    /// The worn mask, `None` once demasked.
    pub fn mask(&self) -> Option<&MaskVisuals> {
        self.mask.as_ref()
    }

    /// The worn mask type, `None` once demasked.
    pub fn mask_type(&self) -> Option<MaskType> {
        self.mask.as_ref().map(|m| m.mask)
    }

    /// Return `true` once the guest has been correctly identified.
    pub fn is_demasked(&self) -> bool {
        self.mask.is_none()
    }

    /// The room the guest is in.
    pub fn current_room(&self) -> RoomType {
        self.room
    }

    /// Roles this guest has met.
    pub fn contacted_roles(&self) -> &BTreeSet<Role> {
        &self.contacted
    }

    /// Return `true` if this guest has met someone of `role`.
    pub fn has_contacted(&self, role: Role) -> bool {
        self.contacted.contains(&role)
    }

    /// The guest this one met most recently.
    pub fn last_contact(&self) -> Option<CharacterId> {
        self.last_contact
    }

    /// Return `true` if the guest took part in the most recent swap.
    pub fn was_in_last_swap(&self) -> bool {
        self.was_in_last_swap
    }

    pub(crate) fn set_room(&mut self, room: RoomType) {
        self.room = room;
    }

    pub(crate) fn take_mask(&mut self) -> Option<MaskVisuals> {
        self.mask.take()
    }

    pub(crate) fn put_mask(&mut self, mask: Option<MaskVisuals>) {
        self.mask = mask;
    }

    pub(crate) fn set_in_last_swap(&mut self, flag: bool) {
        self.was_in_last_swap = flag;
    }

    /// Record a meeting. Trait copiers also adopt the other guest's effective role.
    pub(crate) fn record_contact(&mut self, other: CharacterId, other_true: Role, other_effective: Role) {
        self.contacted.insert(other_true);
        self.last_contact = Some(other);
        if self.role.abilities.copies_traits {
            self.copied_role = Some(other_effective);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::RoleCatalog;

    fn guest(id: usize, role: Role) -> Character {
        let data = RoleCatalog::standard().get(role).unwrap().clone();
        Character::new(
            CharacterId(id),
            data,
            MaskVisuals::for_mask(MaskType::Fox),
            RoomType::Ballroom,
        )
    }

    #[test]
    fn id_display_is_one_based() {
        assert_eq!(CharacterId(0).to_string(), "Guest 1");
        assert_eq!(CharacterId(6).to_string(), "Guest 7");
    }

    #[test]
    fn new_guest_is_masked_and_uncontacted() {
        let g = guest(0, Role::Baron);
        assert_eq!(g.true_role(), Role::Baron);
        assert_eq!(g.effective_role(), Role::Baron);
        assert_eq!(g.mask_type(), Some(MaskType::Fox));
        assert!(!g.is_demasked());
        assert!(g.contacted_roles().is_empty());
        assert!(g.last_contact().is_none());
    }

    #[test]
    fn contact_records_true_role() {
        let mut g = guest(0, Role::Baron);
        g.record_contact(CharacterId(1), Role::Duke, Role::Duke);
        assert!(g.has_contacted(Role::Duke));
        assert_eq!(g.last_contact(), Some(CharacterId(1)));
        // Non-copiers keep their own role.
        assert_eq!(g.effective_role(), Role::Baron);
    }

    #[test]
    fn spy_adopts_effective_role() {
        let mut spy = guest(0, Role::Spy);
        spy.record_contact(CharacterId(1), Role::Duke, Role::King);
        assert!(spy.has_contacted(Role::Duke));
        assert_eq!(spy.effective_role(), Role::King);
        assert_eq!(spy.true_role(), Role::Spy);
    }
}
