use crate::character::CharacterId;
use crate::room::RoomType;

/// Alias for `Result<T, MqError>`.
pub type MqResult<T> = Result<T, MqError>;

/// Errors that can occur when building or mutating the manor model.
#[derive(Debug, thiserror::Error)]
pub enum MqError {
    /// The requested character does not exist.
    #[error("character not found: {0}")]
    CharacterNotFound(CharacterId),

    /// The requested room is not part of the layout.
    #[error("room not in layout: {0}")]
    UnknownRoom(RoomType),

    /// A room cannot be connected to itself.
    #[error("cannot connect {0} to itself")]
    SelfConnection(RoomType),

    /// Catalog or layout data is incomplete or inconsistent.
    #[error("configuration error: {0}")]
    Config(String),
}
