use mq_core::{Character, Manor, MaskCatalog, MaskType, Role, RoleCatalog};

/// Read-only view of the game handed to statement generators.
pub struct StatementContext<'a> {
    /// Guests and rooms as they stand.
    pub manor: &'a Manor,
    /// Role catalog, for influence lookups.
    pub roles: &'a RoleCatalog,
    /// Mask catalog, for visual descriptions.
    pub masks: &'a MaskCatalog,
    /// Current round.
    pub round: u32,
    /// The role the player is hunting.
    pub target: Role,
    /// Roles at the party.
    pub used_roles: &'a [Role],
    /// Catalogued roles nobody plays this game.
    pub unused_roles: &'a [Role],
}

impl StatementContext<'_> {
    /// Every catalogued role, in catalog order.
    pub fn all_roles(&self) -> Vec<Role> {
        self.roles.roles().iter().map(|r| r.role).collect()
    }

    /// Every catalogued mask, in catalog order.
    pub fn all_masks(&self) -> Vec<MaskType> {
        self.masks.kinds()
    }

    /// The guest holding the target role, if one is at the party.
    pub fn target_character(&self) -> Option<&Character> {
        self.manor.find_by_role(self.target)
    }

    /// Highest influence in the catalog, 0 if empty.
    pub fn max_influence(&self) -> i32 {
        self.roles
            .roles()
            .iter()
            .map(|r| r.influence)
            .max()
            .unwrap_or(0)
    }

    /// Return `true` if someone in `speaker`'s room stops non-talk interactions.
    /// The speaker itself counts.
    pub fn guard_present(&self, speaker: &Character) -> bool {
        self.manor
            .characters_in_room(speaker.current_room())
            .iter()
            .any(|c| c.role_data().abilities.blocks_interaction)
    }
}
