//! Round-based simulation for Masquerade.
//!
//! A [`Game`] owns the manor, the statement orchestrator, and a seeded RNG, and
//! advances only when a caller issues a command. Each round moves every guest
//! by its role's heuristic, lets co-located guests meet, and may stop for a
//! forced guess. Everything the presentation layer needs to redraw is recorded
//! in the [`EventLog`].

/// Difficulty levels and game settings.
pub mod config;
/// Error types for the simulation crate.
pub mod error;
/// Game event types and the event log.
pub mod event;
/// The game facade.
pub mod game;
/// Per-role movement decisions and round planning.
pub mod movement;
/// Game lifecycle phases.
pub mod phase;

/// Re-exports of [`config::Difficulty`], [`config::DifficultyParams`], and [`config::GameConfig`].
pub use config::{Difficulty, DifficultyParams, GameConfig};
/// Re-exports of [`error::GameError`] and [`error::GameResult`].
pub use error::{GameError, GameResult};
/// Re-exports of [`event::EventLog`], [`event::GameEvent`], and [`event::GameEventKind`].
pub use event::{EventLog, GameEvent, GameEventKind};
/// Re-exports of [`game::Game`] and [`game::RevealEntry`].
pub use game::{Game, RevealEntry};
/// Re-exports of [`phase::GamePhase`] and [`phase::Outcome`].
pub use phase::{GamePhase, Outcome};
