//! Error types for the runtime's host-facing boundaries.

use thiserror::Error;

use crate::entities::CharacterId;

/// Errors from configuration, save/load and host calls. Tick execution never fails.
#[derive(Error, Debug)]
pub enum BrainError {
    /// Configuration could not be parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading a configuration file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A saved game is not valid JSON or does not match the save format.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No character with this id is on the stage.
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),
}

/// Convenience Result type alias.
pub type Result<T> = std::result::Result<T, BrainError>;
