use std::fmt;

use serde::{Deserialize, Serialize};

/// The visible disguise a guest wears.
///
/// An unmasked guest is represented by the absence of a mask rather than a
/// sentinel variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskType {
    /// Peacock mask.
    Peacock,
    /// Rabbit mask.
    Rabbit,
    /// Porcupine mask.
    Porcupine,
    /// Weasel mask.
    Weasel,
    /// Mouse mask.
    Mouse,
    /// Deer mask.
    Deer,
    /// Fox mask.
    Fox,
    /// Wolf mask.
    Wolf,
}

impl MaskType {
    /// Every mask, in catalog order.
    pub const ALL: [MaskType; 8] = [
        MaskType::Peacock,
        MaskType::Rabbit,
        MaskType::Porcupine,
        MaskType::Weasel,
        MaskType::Mouse,
        MaskType::Deer,
        MaskType::Fox,
        MaskType::Wolf,
    ];
}

impl fmt::Display for MaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Peacock => "Peacock",
            Self::Rabbit => "Rabbit",
            Self::Porcupine => "Porcupine",
            Self::Weasel => "Weasel",
            Self::Mouse => "Mouse",
            Self::Deer => "Deer",
            Self::Fox => "Fox",
            Self::Wolf => "Wolf",
        };
        write!(f, "{name}")
    }
}

/// A mask together with the identifiers the presentation layer draws it with.
/// Swapping masks moves the whole value between guests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaskVisuals {
    /// Which mask this is.
    pub mask: MaskType,
    /// Icon asset identifier.
    pub icon: String,
    /// Silhouette asset identifier.
    pub silhouette: String,
}

impl MaskVisuals {
    /// Visuals with identifiers derived from the mask name.
    pub fn for_mask(mask: MaskType) -> Self {
        let stem = mask.to_string().to_lowercase();
        Self {
            mask,
            icon: format!("masks/{stem}"),
            silhouette: format!("silhouettes/{stem}"),
        }
    }
}

/// Every mask variant available to a game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaskCatalog {
    masks: Vec<MaskVisuals>,
}

impl MaskCatalog {
    /// Build a catalog from mask visuals.
    pub fn new(masks: Vec<MaskVisuals>) -> Self {
        Self { masks }
    }

    /// The built-in catalog with all eight masks.
    pub fn standard() -> Self {
        Self::new(MaskType::ALL.iter().copied().map(MaskVisuals::for_mask).collect())
    }

    /// Look up the visuals for a mask.
    pub fn get(&self, mask: MaskType) -> Option<&MaskVisuals> {
        self.masks.iter().find(|m| m.mask == mask)
    }

    /// All mask visuals in catalog order.
    pub fn masks(&self) -> &[MaskVisuals] {
        &self.masks
    }

    /// Mask types in catalog order.
    pub fn kinds(&self) -> Vec<MaskType> {
        self.masks.iter().map(|m| m.mask).collect()
    }

    /// Number of masks.
    pub fn len(&self) -> usize {
        self.masks.len()
    }

    /// Return `true` if no masks are catalogued.
    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }
}
