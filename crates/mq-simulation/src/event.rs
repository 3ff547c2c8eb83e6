use mq_core::{CharacterId, Role, RoomType};
use mq_dialogue::{Interaction, Statement};
use serde::{Deserialize, Serialize};

use crate::config::Difficulty;

/// What kind of game event occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventKind {
    /// A new game was set up.
    GameStarted {
        /// Chosen difficulty.
        difficulty: Difficulty,
        /// The role the player must find.
        target: Role,
        /// Number of guests.
        cast: usize,
    },
    /// The round counter advanced.
    RoundChanged {
        /// The new round.
        round: u32,
    },
    /// A guest took its turn to move; `from` equals `to` when it stayed put.
    RoomChanged {
        /// The guest that moved.
        character: CharacterId,
        /// The room it left.
        from: RoomType,
        /// The room it entered.
        to: RoomType,
    },
    /// Two guests exchanged masks.
    MasksSwapped {
        /// First guest in the swap.
        first: CharacterId,
        /// Second guest in the swap.
        second: CharacterId,
    },
    /// The player must accuse one of these guests.
    ForcedGuess {
        /// Guests still wearing a mask.
        candidates: Vec<CharacterId>,
    },
    /// The presentation layer focused a guest.
    CharacterSelected {
        /// The selected guest.
        character: CharacterId,
    },
    /// The presentation layer picked a guest to accuse.
    CharacterSelectedForGuessing {
        /// The selected guest.
        character: CharacterId,
    },
    /// A guest answered an interaction.
    Statement {
        /// The guest that spoke.
        character: CharacterId,
        /// What the player asked for.
        interaction: Interaction,
        /// The reply.
        statement: Statement,
    },
    /// A guest was correctly identified and lost its mask.
    Demasked {
        /// The exposed guest.
        character: CharacterId,
        /// Its true role.
        role: Role,
    },
    /// The game finished.
    GameEnded {
        /// `true` if the player won.
        won: bool,
    },
}

impl GameEventKind {
    /// Check whether a given guest is involved in this event.
    pub fn involves(&self, id: CharacterId) -> bool {
        match self {
            Self::RoomChanged { character, .. }
            | Self::CharacterSelected { character }
            | Self::CharacterSelectedForGuessing { character }
            | Self::Statement { character, .. }
            | Self::Demasked { character, .. } => *character == id,
            Self::MasksSwapped { first, second } => *first == id || *second == id,
            Self::ForcedGuess { candidates } => candidates.contains(&id),
            Self::GameStarted { .. } | Self::RoundChanged { .. } | Self::GameEnded { .. } => false,
        }
    }
}

/// A record of something that happened during a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameEvent {
    /// The round in which this event occurred.
    pub round: u32,
    /// The specific kind of event that occurred.
    pub kind: GameEventKind,
    /// A human-readable description of the event.
    pub description: String,
}

impl GameEvent {
    /// An event stamped with `round`.
    pub fn new(round: u32, kind: GameEventKind, description: impl Into<String>) -> Self {
        Self {
            round,
            kind,
            description: description.into(),
        }
    }
}

/// Accumulates events for the presentation layer to consume.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<GameEvent>,
    max_events: usize,
}

impl EventLog {
    /// Create a new event log with the given maximum capacity (0 = unlimited).
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    /// Append an event, dropping the oldest events if the log exceeds its capacity.
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
        if self.max_events > 0 && self.events.len() > self.max_events {
            let drain_count = self.events.len() - self.max_events;
            self.events.drain(..drain_count);
        }
    }

    /// Events still held, oldest first.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Return all events from the given round.
    pub fn events_in_round(&self, round: u32) -> Vec<&GameEvent> {
        self.events.iter().filter(|e| e.round == round).collect()
    }

    /// Return all events involving the given guest.
    pub fn events_for_character(&self, id: CharacterId) -> Vec<&GameEvent> {
        self.events.iter().filter(|e| e.kind.involves(id)).collect()
    }

    /// Remove and return every event, oldest first.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of events held.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Return `true` if no events are held.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moved(round: u32, id: usize) -> GameEvent {
        GameEvent::new(
            round,
            GameEventKind::RoomChanged {
                character: CharacterId(id),
                from: RoomType::Study,
                to: RoomType::Ballroom,
            },
            "moved",
        )
    }

    #[test]
    fn event_log_push_and_query() {
        let mut log = EventLog::new(0);
        log.push(moved(1, 0));
        log.push(moved(2, 1));
        assert_eq!(log.len(), 2);
        assert_eq!(log.events_in_round(1).len(), 1);
        assert_eq!(log.events_for_character(CharacterId(1)).len(), 1);
        assert!(log.events_for_character(CharacterId(5)).is_empty());
    }

    #[test]
    fn event_log_max_events_trims() {
        let mut log = EventLog::new(2);
        for round in 0..5 {
            log.push(moved(round, 0));
        }
        assert_eq!(log.len(), 2);
        assert_eq!(log.events()[0].round, 3);
        assert_eq!(log.events()[1].round, 4);
    }

    #[test]
    fn drain_empties_log() {
        let mut log = EventLog::new(0);
        log.push(moved(1, 0));
        let drained = log.drain();
        assert_eq!(drained.len(), 1);
        assert!(log.is_empty());
    }

    #[test]
    fn event_kind_involves_character() {
        let swap = GameEventKind::MasksSwapped {
            first: CharacterId(0),
            second: CharacterId(3),
        };
        assert!(swap.involves(CharacterId(0)));
        assert!(swap.involves(CharacterId(3)));
        assert!(!swap.involves(CharacterId(1)));

        let guess = GameEventKind::ForcedGuess {
            candidates: vec![CharacterId(1), CharacterId(2)],
        };
        assert!(guess.involves(CharacterId(2)));
        assert!(!GameEventKind::RoundChanged { round: 3 }.involves(CharacterId(0)));
    }
}
