use std::fmt;

use mq_core::CharacterId;
use serde::{Deserialize, Serialize};

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Named the target, or lasted until the final round.
    Won,
    /// A wrong guess.
    Lost,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Won => write!(f, "won"),
            Self::Lost => write!(f, "lost"),
        }
    }
}

/// Where the game is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// No game has been started.
    Setup,
    /// Rounds are being played.
    InProgress,
    /// The player must accuse one of `candidates` before play continues.
    ForcedGuess {
        /// Guests still wearing a mask.
        candidates: Vec<CharacterId>,
    },
    /// Terminal until a new game starts.
    Ended(Outcome),
}

impl GamePhase {
    /// Return `true` once the game has been won or lost.
    pub fn is_over(&self) -> bool {
        matches!(self, Self::Ended(_))
    }

    /// Return `true` while a game is underway.
    pub fn is_live(&self) -> bool {
        matches!(self, Self::InProgress | Self::ForcedGuess { .. })
    }

    /// The result, once the game has ended.
    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Self::Ended(outcome) => Some(*outcome),
            _ => None,
        }
    }

    /// Guests up for a forced guess, empty outside that phase.
    pub fn guess_candidates(&self) -> &[CharacterId] {
        match self {
            Self::ForcedGuess { candidates } => candidates,
            _ => &[],
        }
    }
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Setup => write!(f, "setup"),
            Self::InProgress => write!(f, "in progress"),
            Self::ForcedGuess { candidates } => {
                write!(f, "forced guess ({} candidates)", candidates.len())
            }
            Self::Ended(outcome) => write!(f, "ended ({outcome})"),
        }
    }
}
