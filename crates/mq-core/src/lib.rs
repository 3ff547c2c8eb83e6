//! Core types for Masquerade: roles, masks, rooms, and the guest model.
//!
//! This crate holds the data every other layer reads: the immutable role and
//! mask catalogs, the room graph, and the [`Manor`] that owns guests and keeps
//! room occupancy consistent with each guest's current room. It has no notion
//! of rounds or statements; those live in `mq-simulation` and `mq-dialogue`.

/// Bundled catalogs and their validation.
pub mod catalog;
/// Per-guest identity, mask, and contact state.
pub mod character;
/// Error types used throughout the crate.
pub mod error;
/// The manor model: room graph plus guests, with consistent occupancy.
pub mod manor;
/// Mask variants and their visual identifiers.
pub mod mask;
/// Role identities, abilities, movement heuristics, and the role catalog.
pub mod role;
/// Rooms, adjacency, and the room layout.
pub mod room;

/// Re-export catalog bundle.
pub use catalog::Catalogs;
/// Re-export character types.
pub use character::{Character, CharacterId};
/// Re-export error types.
pub use error::{MqError, MqResult};
/// Re-export manor types.
pub use manor::{Manor, MoveOutcome};
/// Re-export mask types.
pub use mask::{MaskCatalog, MaskType, MaskVisuals};
/// Re-export role types.
pub use role::{Abilities, MovementPriority, Role, RoleCatalog, RoleData};
/// Re-export room types.
pub use room::{Room, RoomGraph, RoomLayout, RoomSpec, RoomType};
