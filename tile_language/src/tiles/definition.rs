//! Tile definitions - immutable catalog entries.

use serde::{Deserialize, Serialize};

use super::{Constraints, TileKind};
use crate::mechanics::{ConditionPolicy, SensorPhase};

/// Suggestion weight used when a tile declares none.
pub const DEFAULT_WEIGHT: u32 = 100;

/// A tile as described by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileDefinition {
    pub kind: TileKind,

    /// Unique id, e.g. `sensor.see`.
    pub id: String,

    /// Display name shown in the tile picker.
    pub name: String,

    /// Category tag. Required for filters and modifiers.
    #[serde(default)]
    pub category: Option<String>,

    /// Execution order among tiles of the same slot, lower first.
    #[serde(default)]
    pub priority: i32,

    /// Suggestion sort order, lower first.
    #[serde(default)]
    pub weight: Option<u32>,

    /// Excluded from suggestions.
    #[serde(default)]
    pub hidden: bool,

    /// Sensors only: run before (default) or after the filters.
    #[serde(default)]
    pub phase: SensorPhase,

    #[serde(default)]
    pub constraints: Option<Constraints>,
}

impl TileDefinition {
    /// Create a visible, unconstrained tile.
    pub fn new(kind: TileKind, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
            name: name.into(),
            category: None,
            priority: 0,
            weight: None,
            hidden: false,
            phase: SensorPhase::Pre,
            constraints: None,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn with_phase(mut self, phase: SensorPhase) -> Self {
        self.phase = phase;
        self
    }

    pub fn with_constraints(mut self, constraints: Constraints) -> Self {
        self.constraints = Some(constraints);
        self
    }

    pub fn weight_or(&self, default: u32) -> u32 {
        self.weight.unwrap_or(default)
    }

    pub fn in_category(&self, category: &str) -> bool {
        self.category.as_deref() == Some(category)
    }

    pub fn is_terminal(&self) -> bool {
        self.constraints.as_ref().is_some_and(Constraints::is_terminal)
    }

    pub fn max_count(&self) -> Option<usize> {
        self.constraints.as_ref().and_then(Constraints::max_count)
    }

    pub fn condition(&self) -> Option<ConditionPolicy> {
        self.constraints.as_ref().and_then(Constraints::condition)
    }

    /// Whether the tile declares `capability` in its `provides` set.
    pub fn provides(&self, capability: &str) -> bool {
        self.constraints
            .as_ref()
            .is_some_and(|c| c.provides(capability))
    }
}
