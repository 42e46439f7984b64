//! Notifications the stage hands to its host.

use serde::{Deserialize, Serialize};

use crate::entities::{CharacterId, Feeling};

/// Whether brains are running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum GameMode {
    /// Programs are being edited; no brains exist.
    #[default]
    Edit,
    /// Every character runs a brain built from its program.
    Play,
}

/// An event emitted during a tick, drained by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageEvent {
    /// The camera should track this character.
    CameraFollow(CharacterId),
    /// A rule on this character's current page reads player input.
    CharHasInput(CharacterId),
    /// The character's feeling changed.
    Expressed {
        character: CharacterId,
        feeling: Feeling,
    },
    /// The character is being removed from the stage.
    CharacterDestroying(CharacterId),
}

impl StageEvent {
    pub fn character(&self) -> CharacterId {
        match self {
            StageEvent::CameraFollow(id)
            | StageEvent::CharHasInput(id)
            | StageEvent::CharacterDestroying(id) => *id,
            StageEvent::Expressed { character, .. } => *character,
        }
    }
}
