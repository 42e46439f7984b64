//! Tile kinds - the four rule slots.

use serde::{Deserialize, Serialize};

/// The slot a tile occupies in a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    /// Decides whether a rule fires and what it sees.
    Sensor,
    /// Narrows what the sensor produced.
    Filter,
    /// Performs the rule's effect.
    Actuator,
    /// Refines how the actuator acts.
    Modifier,
}

impl TileKind {
    pub const ALL: [TileKind; 4] = [
        TileKind::Sensor,
        TileKind::Filter,
        TileKind::Actuator,
        TileKind::Modifier,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TileKind::Sensor => "sensor",
            TileKind::Filter => "filter",
            TileKind::Actuator => "actuator",
            TileKind::Modifier => "modifier",
        }
    }

    /// Filters and modifiers are matched by category, so they must declare one.
    pub fn requires_category(&self) -> bool {
        matches!(self, TileKind::Filter | TileKind::Modifier)
    }

    /// Root slots head a rule half; sequence slots follow them.
    pub fn is_root(&self) -> bool {
        matches!(self, TileKind::Sensor | TileKind::Actuator)
    }
}

impl std::fmt::Display for TileKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
