use std::fmt;

use mq_core::Role;
use serde::{Deserialize, Serialize};

/// What the player asks for when interrogating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterrogateOption {
    /// Something about the speaker's influence.
    Number,
    /// A role that is not at the party.
    DidntShow,
    /// A role the speaker has met.
    HasTalked,
    /// Three roles, one of which may be the speaker's.
    OneOfThree,
}

impl InterrogateOption {
    /// Every option in menu order.
    pub const ALL: [InterrogateOption; 4] = [
        InterrogateOption::Number,
        InterrogateOption::DidntShow,
        InterrogateOption::HasTalked,
        InterrogateOption::OneOfThree,
    ];
}

impl fmt::Display for InterrogateOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number => write!(f, "number"),
            Self::DidntShow => write!(f, "didn't show"),
            Self::HasTalked => write!(f, "has talked"),
            Self::OneOfThree => write!(f, "one of three"),
        }
    }
}

/// A request the player makes of a guest.
///
/// A direct guess carries the guessed role, so resolving it needs no state
/// shared between the caller and the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Interaction {
    /// Small talk; always allowed.
    Talk,
    /// A pointed question.
    Interrogate(InterrogateOption),
    /// Try to win the guest over.
    Befriend,
    /// Ask whether the guest holds this role.
    DirectGuess(Role),
}

impl Interaction {
    /// Talk is the only interaction a guard cannot stop.
    pub fn is_talk(&self) -> bool {
        matches!(self, Self::Talk)
    }
}

impl fmt::Display for Interaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Talk => write!(f, "talk"),
            Self::Interrogate(option) => write!(f, "interrogate ({option})"),
            Self::Befriend => write!(f, "befriend"),
            Self::DirectGuess(role) => write!(f, "guess {role}"),
        }
    }
}
