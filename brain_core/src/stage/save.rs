//! Saved games: `{ chars: [{ x, y, id, bdefn }] }`.

use serde::{Deserialize, Serialize};
use tile_language::BrainRecord;

/// One character in a saved game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterState {
    pub x: f32,
    pub y: f32,
    /// Character definition id.
    pub id: String,
    pub bdefn: BrainRecord,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedGame {
    #[serde(default)]
    pub chars: Vec<CharacterState>,
}
