use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MqError, MqResult};
use crate::mask::MaskCatalog;
use crate::role::RoleCatalog;
use crate::room::RoomLayout;

/// Everything a game needs besides its settings: roles, masks, and the room table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalogs {
    /// Available roles.
    pub roles: RoleCatalog,
    /// Available masks.
    pub masks: MaskCatalog,
    /// Manor layout.
    pub layout: RoomLayout,
}

impl Default for Catalogs {
    fn default() -> Self {
        Self::standard()
    }
}

impl Catalogs {
    /// The built-in ten roles, eight masks, and six rooms.
    pub fn standard() -> Self {
        Self {
            roles: RoleCatalog::standard(),
            masks: MaskCatalog::standard(),
            layout: RoomLayout::standard(),
        }
    }

    /// Parse catalogs from JSON.
    pub fn from_json(json: &str) -> MqResult<Self> {
        serde_json::from_str(json).map_err(|e| MqError::Config(format!("invalid catalog: {e}")))
    }

    /// Load catalogs from a JSON file.
    pub fn load(path: &Path) -> MqResult<Self> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| MqError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json(&json)
    }

    /// Check the catalogs can seat `cast_size` guests.
    ///
    /// Every role needs a distinct mask, so both catalogs must be at least as
    /// large as the cast. Fixed starting masks must exist in the mask catalog,
    /// and no two roles may claim the same one.
    pub fn validate(&self, cast_size: usize) -> MqResult<()> {
        if cast_size == 0 {
            return Err(MqError::Config("cast size must be at least 1".into()));
        }
        if self.roles.len() < cast_size {
            return Err(MqError::Config(format!(
                "cast of {cast_size} needs at least {cast_size} roles, catalog has {}",
                self.roles.len()
            )));
        }
        if self.masks.len() < cast_size {
            return Err(MqError::Config(format!(
                "cast of {cast_size} needs at least {cast_size} masks, catalog has {}",
                self.masks.len()
            )));
        }

        let mut claimed = Vec::new();
        for entry in self.roles.roles() {
            let Some(mask) = entry.abilities.fixed_starting_mask else {
                continue;
            };
            if self.masks.get(mask).is_none() {
                return Err(MqError::Config(format!(
                    "{} starts in the {mask} mask, which is not catalogued",
                    entry.role
                )));
            }
            if claimed.contains(&mask) {
                return Err(MqError::Config(format!(
                    "more than one role starts in the {mask} mask"
                )));
            }
            claimed.push(mask);
        }

        self.layout.build().map(|_| ())
    }
}
