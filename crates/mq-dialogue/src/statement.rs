use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

/// Line used when a generator cannot find a fact it is allowed to disclose.
pub const FILLER_LINE: &str = "You look very pretty today!";

const FLUFF_LINES: [&str; 3] = [
    "This party is awesome!",
    "Have you tried the punch? It is divine.",
    "The orchestra is playing my favourite waltz.",
];

/// What produced a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    /// A clue: true or false, but always about the game state.
    Fact,
    /// Small talk carrying no information.
    Filler,
    /// The guard stopped the interaction.
    Guard,
    /// The speaker refused the interaction.
    Refusal,
    /// Reply to a direct guess at the speaker's role.
    GuessResponse,
}

/// One line of dialogue and its effect on the player's reputation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    /// What the guest says.
    pub text: String,
    /// Change to apply to the player's reputation.
    pub reputation_delta: i32,
    /// Where the line came from.
    pub kind: StatementKind,
}

impl Statement {
    /// A statement of `kind`.
    pub fn new(kind: StatementKind, text: impl Into<String>, reputation_delta: i32) -> Self {
        Self {
            text: text.into(),
            reputation_delta,
            kind,
        }
    }

    /// A clue with no reputation effect.
    pub fn fact(text: impl Into<String>) -> Self {
        Self::new(StatementKind::Fact, text, 0)
    }

    /// The innocuous line generators degrade to.
    pub fn filler() -> Self {
        Self::new(StatementKind::Filler, FILLER_LINE, 0)
    }

    /// Random small talk, used when no generator in a pool is eligible.
    pub fn fluff(rng: &mut StdRng) -> Self {
        let line = FLUFF_LINES.choose(rng).copied().unwrap_or(FILLER_LINE);
        Self::new(StatementKind::Filler, line, 0)
    }

    /// Return `true` if the statement carries information.
    pub fn is_fact(&self) -> bool {
        self.kind == StatementKind::Fact
    }
}

impl std::fmt::Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
