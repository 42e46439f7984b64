//! Characters on the stage.

mod character;
mod components;
mod impulse;

pub use character::*;
pub use components::*;
pub use impulse::*;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable handle to a character. Brains, targets and bumps refer to characters by
/// handle only; the stage resolves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub Uuid);

impl CharacterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Never handed out by a stage, so it resolves to nothing.
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Short form keeps log lines readable.
        write!(f, "{}", &self.0.simple().to_string()[..8])
    }
}
