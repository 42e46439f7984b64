//! Character definitions, physics bodies and feelings.

use serde::{Deserialize, Serialize};

/// Per-kind tuning for a character.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterDefaults {
    /// Speed used by movement actuators when no speed modifier applies.
    pub speed: f32,
    pub mass: f32,
    pub friction: f32,
    pub restitution: f32,
    pub bump_can_move: bool,
}

impl Default for CharacterDefaults {
    fn default() -> Self {
        Self {
            speed: 40.0,
            mass: 1.0,
            friction: 0.1,
            restitution: 0.5,
            bump_can_move: true,
        }
    }
}

/// A kind of character, e.g. "kodu" or "tree". The id is what saves refer to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterDefinition {
    pub id: String,
    #[serde(default)]
    pub defaults: CharacterDefaults,
}

impl CharacterDefinition {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            defaults: CharacterDefaults::default(),
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.defaults.speed = speed;
        self
    }

    pub fn with_defaults(mut self, defaults: CharacterDefaults) -> Self {
        self.defaults = defaults;
        self
    }
}

/// The physics body attached to a character. Only velocity is written by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Body {
    pub vx: f32,
    pub vy: f32,
    pub mass: f32,
    pub friction: f32,
    pub restitution: f32,
    pub bump_can_move: bool,
}

impl Body {
    pub fn from_defaults(defaults: &CharacterDefaults) -> Self {
        Self {
            vx: 0.0,
            vy: 0.0,
            mass: defaults.mass,
            friction: defaults.friction,
            restitution: defaults.restitution,
            bump_can_move: defaults.bump_can_move,
        }
    }
}

/// An emotion a character can express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feeling {
    Happy,
    Sad,
    Angry,
    Love,
}

impl Feeling {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feeling::Happy => "happy",
            Feeling::Sad => "sad",
            Feeling::Angry => "angry",
            Feeling::Love => "love",
        }
    }
}

impl std::fmt::Display for Feeling {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
