use std::fmt;

use serde::{Deserialize, Serialize};

use crate::mask::MaskType;
use crate::room::RoomType;

/// A secret identity a guest can hold. Declaration order matches influence rank
/// in the standard catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Copies the traits of whoever it last met.
    Spy,
    /// Stops interrogations while in the room.
    Guard,
    /// Always arrives in the same mask.
    Tailor,
    /// Keeps away from the target.
    Baron,
    /// Lingers in quiet rooms.
    Countess,
    /// Goes where the crowd is.
    Prince,
    /// Follows the most influential guest.
    Duke,
    /// Swaps masks when alone with someone.
    Princess,
    /// Never tells the truth.
    Pope,
    /// The highest rank.
    King,
}

impl Role {
    /// Every role, in catalog order.
    pub const ALL: [Role; 10] = [
        Role::Spy,
        Role::Guard,
        Role::Tailor,
        Role::Baron,
        Role::Countess,
        Role::Prince,
        Role::Duke,
        Role::Princess,
        Role::Pope,
        Role::King,
    ];

    /// Parse a role from a case-insensitive name.
    pub fn parse(s: &str) -> Option<Self> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|r| r.to_string().to_lowercase() == lower)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Spy => "Spy",
            Self::Guard => "Guard",
            Self::Tailor => "Tailor",
            Self::Baron => "Baron",
            Self::Countess => "Countess",
            Self::Prince => "Prince",
            Self::Duke => "Duke",
            Self::Princess => "Princess",
            Self::Pope => "Pope",
            Self::King => "King",
        };
        write!(f, "{name}")
    }
}

/// How a role picks its next room each round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementPriority {
    /// Uniformly random adjacent room.
    #[default]
    Random,
    /// First adjacent room that does not hold the target.
    AvoidTarget,
    /// First adjacent room whose type is in the role's preference list.
    PreferSpecificRooms,
    /// Adjacent room with the most occupants.
    SeekCrowds,
    /// Adjacent room holding the most influential guest.
    SeekHighInfluence,
    /// Follow whoever this guest last made contact with.
    CopyLastContact,
}

impl fmt::Display for MovementPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Random => write!(f, "random"),
            Self::AvoidTarget => write!(f, "avoid target"),
            Self::PreferSpecificRooms => write!(f, "prefer rooms"),
            Self::SeekCrowds => write!(f, "seek crowds"),
            Self::SeekHighInfluence => write!(f, "seek influence"),
            Self::CopyLastContact => write!(f, "copy last contact"),
        }
    }
}

/// Special-ability flags attached to a role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Abilities {
    /// Adopts the effective role of whoever it makes contact with.
    pub copies_traits: bool,
    /// Every statement this role makes is a lie.
    pub always_lies: bool,
    /// Non-talk interactions in this role's room are refused.
    pub blocks_interaction: bool,
    /// Swaps masks with the only other occupant after moving.
    pub can_force_swap: bool,
    /// Mask this role always starts in, reserved from the shuffled pool.
    pub fixed_starting_mask: Option<MaskType>,
}

impl Abilities {
    /// Return `true` if no ability is set.
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }
}

/// Immutable configuration for one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleData {
    /// The role this entry configures.
    pub role: Role,
    /// Display name.
    pub name: String,
    /// Influence rank used for ordering and threshold checks.
    pub influence: i32,
    /// Flavor text.
    #[serde(default)]
    pub description: String,
    /// Movement heuristic.
    #[serde(default)]
    pub movement: MovementPriority,
    /// Rooms favored by [`MovementPriority::PreferSpecificRooms`], in priority order.
    #[serde(default)]
    pub preferred_rooms: Vec<RoomType>,
    /// Special abilities.
    #[serde(default)]
    pub abilities: Abilities,
}

impl RoleData {
    /// Create a plain role entry with random movement and no abilities.
    pub fn new(role: Role, influence: i32) -> Self {
        Self {
            role,
            name: role.to_string(),
            influence,
            description: String::new(),
            movement: MovementPriority::Random,
            preferred_rooms: Vec::new(),
            abilities: Abilities::default(),
        }
    }

    /// Set the movement heuristic.
    pub fn with_movement(mut self, movement: MovementPriority) -> Self {
        self.movement = movement;
        self
    }

    /// Set the preferred rooms.
    pub fn with_preferred_rooms(mut self, rooms: impl IntoIterator<Item = RoomType>) -> Self {
        self.preferred_rooms = rooms.into_iter().collect();
        self
    }

    /// Set the abilities.
    pub fn with_abilities(mut self, abilities: Abilities) -> Self {
        self.abilities = abilities;
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Return `true` if the role moves by anything other than a random walk.
    pub fn has_custom_movement(&self) -> bool {
        self.movement != MovementPriority::Random
    }
}

/// The full set of roles available to a game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCatalog {
    roles: Vec<RoleData>,
}

impl RoleCatalog {
    /// Build a catalog from role entries.
    pub fn new(roles: Vec<RoleData>) -> Self {
        Self { roles }
    }

    /// The built-in catalog: influence equals rank, Spy 0 through King 9.
    pub fn standard() -> Self {
        let rank = |r: Role| Role::ALL.iter().position(|x| *x == r).unwrap_or(0) as i32;
        let entry = |r: Role| RoleData::new(r, rank(r));

        Self::new(vec![
            entry(Role::Spy)
                .with_movement(MovementPriority::CopyLastContact)
                .with_abilities(Abilities {
                    copies_traits: true,
                    ..Abilities::default()
                })
                .with_description("Takes on the manner of whoever they last spoke with."),
            entry(Role::Guard)
                .with_abilities(Abilities {
                    blocks_interaction: true,
                    ..Abilities::default()
                })
                .with_description("Nobody gets questioned on their watch."),
            entry(Role::Tailor)
                .with_abilities(Abilities {
                    fixed_starting_mask: Some(MaskType::Rabbit),
                    ..Abilities::default()
                })
                .with_description("Made every mask here, and always wears the rabbit."),
            entry(Role::Baron)
                .with_movement(MovementPriority::AvoidTarget)
                .with_description("Owes the guest of honour money."),
            entry(Role::Countess)
                .with_movement(MovementPriority::PreferSpecificRooms)
                .with_preferred_rooms([RoomType::Bathroom, RoomType::WineCellar])
                .with_description("Prefers the quieter corners of the house."),
            entry(Role::Prince)
                .with_movement(MovementPriority::SeekCrowds)
                .with_description("Cannot resist an audience."),
            entry(Role::Duke)
                .with_movement(MovementPriority::SeekHighInfluence)
                .with_description("Always near whoever matters most."),
            entry(Role::Princess)
                .with_abilities(Abilities {
                    can_force_swap: true,
                    ..Abilities::default()
                })
                .with_description("Trades masks with anyone she finds alone."),
            entry(Role::Pope)
                .with_abilities(Abilities {
                    always_lies: true,
                    ..Abilities::default()
                })
                .with_description("Speaks only falsehoods."),
            entry(Role::King).with_description("The highest rank at the party."),
        ])
    }

    /// Look up the entry for a role.
    pub fn get(&self, role: Role) -> Option<&RoleData> {
        self.roles.iter().find(|r| r.role == role)
    }

    /// Influence of a role, if catalogued.
    pub fn influence_of(&self, role: Role) -> Option<i32> {
        self.get(role).map(|r| r.influence)
    }

    /// All entries in catalog order.
    pub fn roles(&self) -> &[RoleData] {
        &self.roles
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Return `true` if the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
