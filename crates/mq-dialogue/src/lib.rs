//! Statement generation for Masquerade.
//!
//! Guests answer the player through a set of stateful generators. Each
//! generator produces either a true or a deceptive clue about the game state
//! and remembers what it has already said. The [`Orchestrator`] picks the
//! generator for an [`Interaction`], applies guard and reputation gating, and
//! updates the player's reputation.

/// Read-only game view passed to generators.
pub mod context;
/// The generator trait and the registry of live generators.
pub mod generator;
/// Concrete generators, grouped by the kind of fact they disclose.
pub mod generators;
/// Interaction kinds the player can request.
pub mod interaction;
/// Pool selection, gating, and reputation bookkeeping.
pub mod orchestrator;
/// Statement values.
pub mod statement;

#[cfg(test)]
mod testing;

/// Re-export of [`context::StatementContext`].
pub use context::StatementContext;
/// Re-exports of the generator trait and registry.
pub use generator::{GeneratorKind, GeneratorRegistry, StatementGenerator};
/// Re-exports of interaction types.
pub use interaction::{Interaction, InterrogateOption};
/// Re-exports of orchestrator types.
pub use orchestrator::{Orchestrator, Pools};
/// Re-exports of statement types.
pub use statement::{Statement, StatementKind};
