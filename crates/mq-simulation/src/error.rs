use mq_core::{CharacterId, MqError};

/// Alias for `Result<T, GameError>`.
pub type GameResult<T> = Result<T, GameError>;

/// Errors returned by [`crate::Game`] commands.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// Catalog, layout, or manor failure.
    #[error(transparent)]
    Core(#[from] MqError),

    /// No game has been started.
    #[error("no game in progress; start a new game first")]
    NotStarted,

    /// The game is over; only a new game can follow.
    #[error("the game has ended")]
    GameOver,

    /// A forced guess blocks every other command.
    #[error("a forced guess must be resolved first")]
    GuessPending,

    /// A guess was resolved with none pending.
    #[error("no forced guess is pending")]
    NoGuessPending,

    /// The guest is not among the forced-guess candidates.
    #[error("{0} is not up for guessing")]
    NotGuessable(CharacterId),
}
