use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How hard a game is: fewer reputation points and more guests to sift through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Small cast, generous reputation, no mask-swapping Princess.
    Easy,
    #[default]
    /// Six guests and a middling reputation.
    Medium,
    /// Seven guests and almost no reputation to spend.
    Hard,
}

impl Difficulty {
    /// Every difficulty, easiest first.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Setup parameters for this difficulty.
    pub fn params(self) -> DifficultyParams {
        match self {
            Self::Easy => DifficultyParams {
                starting_reputation: 5,
                cast_size: 4,
                exclude_force_swap: true,
            },
            Self::Medium => DifficultyParams {
                starting_reputation: 3,
                cast_size: 6,
                exclude_force_swap: false,
            },
            Self::Hard => DifficultyParams {
                starting_reputation: 1,
                cast_size: 7,
                exclude_force_swap: false,
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Medium => write!(f, "medium"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Values a [`Difficulty`] expands to at setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyParams {
    /// Reputation the player starts with.
    pub starting_reputation: i32,
    /// Number of guests at the party.
    pub cast_size: usize,
    /// Keep roles that force mask swaps out of the cast.
    pub exclude_force_swap: bool,
}

/// Configuration for a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// RNG seed for deterministic games.
    pub seed: u64,
    /// Surviving this many rounds wins the game.
    pub max_rounds: u32,
    /// A forced guess happens every this many rounds.
    pub forced_guess_interval: u32,
    /// From this round on, event-phase swaps ignore rooms.
    pub chaos_round: u32,
    /// Maximum event log size (oldest events dropped when exceeded). 0 = unlimited.
    pub max_events: usize,
    /// Preferred minimum influence of the target role.
    pub target_min_influence: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_rounds: 15,
            forced_guess_interval: 3,
            chaos_round: 10,
            max_events: 0,
            target_min_influence: 5,
        }
    }
}

impl GameConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set how many rounds must be survived.
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = rounds;
        self
    }

    /// Set the forced-guess cadence. 0 disables forced guesses.
    pub fn with_forced_guess_interval(mut self, interval: u32) -> Self {
        self.forced_guess_interval = interval;
        self
    }

    /// Set the round from which event swaps ignore rooms.
    pub fn with_chaos_round(mut self, round: u32) -> Self {
        self.chaos_round = round;
        self
    }

    /// Set the maximum event log size (0 = unlimited).
    pub fn with_max_events(mut self, max: usize) -> Self {
        self.max_events = max;
        self
    }

    /// Set the preferred minimum influence of the target.
    pub fn with_target_min_influence(mut self, influence: i32) -> Self {
        self.target_min_influence = influence;
        self
    }

    /// Return `true` if `round` calls for a forced guess.
    pub fn is_forced_guess_round(&self, round: u32) -> bool {
        self.forced_guess_interval > 0 && round > 0 && round % self.forced_guess_interval == 0
    }
}
