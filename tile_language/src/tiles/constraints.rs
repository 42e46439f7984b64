//! Constraint sets attached to tiles and accumulated along a rule.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::TileDefinition;
use crate::mechanics::{ConditionPolicy, HandlingValue};

/// Handling key: no further tile of the same slot may follow.
pub const HANDLING_TERMINAL: &str = "terminal";
/// Handling key: at most this many copies of the tile in one run.
pub const HANDLING_MAX_COUNT: &str = "max-count";
/// Handling key: the rule's condition policy.
pub const HANDLING_CONDITION: &str = "condition";

/// A set of tile ids and categories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileMatch {
    pub ids: BTreeSet<String>,
    pub categories: BTreeSet<String>,
}

impl TileMatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.ids.insert(id.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.insert(category.into());
        self
    }

    /// True if the tile's id or category is in the set.
    pub fn matches(&self, tile: &TileDefinition) -> bool {
        self.ids.contains(&tile.id)
            || tile
                .category
                .as_ref()
                .is_some_and(|c| self.categories.contains(c))
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty() && self.categories.is_empty()
    }

    /// Union another set into this one.
    pub fn merge(&mut self, other: &TileMatch) {
        self.ids.extend(other.ids.iter().cloned());
        self.categories.extend(other.categories.iter().cloned());
    }
}

/// Constraints declared by a tile, or accumulated over a rule prefix.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Constraints {
    /// Capabilities this tile makes available to later tiles.
    pub provides: BTreeSet<String>,

    /// Capabilities this tile needs from an earlier tile (any one suffices).
    pub requires: BTreeSet<String>,

    /// Tiles permitted after this one.
    pub allow: TileMatch,

    /// Tiles forbidden after this one.
    pub disallow: TileMatch,

    /// Free-form handling flags. Later tiles overwrite earlier ones when merged.
    pub handling: BTreeMap<String, HandlingValue>,
}

impl Constraints {
    /// Create an empty constraint set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn providing(mut self, capability: impl Into<String>) -> Self {
        self.provides.insert(capability.into());
        self
    }

    pub fn requiring(mut self, capability: impl Into<String>) -> Self {
        self.requires.insert(capability.into());
        self
    }

    pub fn allowing(mut self, allow: TileMatch) -> Self {
        self.allow.merge(&allow);
        self
    }

    pub fn disallowing(mut self, disallow: TileMatch) -> Self {
        self.disallow.merge(&disallow);
        self
    }

    pub fn with_handling(mut self, key: impl Into<String>, value: HandlingValue) -> Self {
        self.handling.insert(key.into(), value);
        self
    }

    /// Merge another set into this one: union per set, last write wins for handling.
    pub fn merge(&mut self, other: &Constraints) {
        self.provides.extend(other.provides.iter().cloned());
        self.requires.extend(other.requires.iter().cloned());
        self.allow.merge(&other.allow);
        self.disallow.merge(&other.disallow);
        for (key, value) in &other.handling {
            self.handling.insert(key.clone(), value.clone());
        }
    }

    /// Whether `tile` may follow a prefix with these accumulated constraints.
    ///
    /// An empty allow set admits nothing.
    pub fn admits(&self, tile: &TileDefinition) -> bool {
        let requirements_met = match tile.constraints.as_ref() {
            Some(c) if !c.requires.is_empty() => {
                c.requires.iter().any(|r| self.provides.contains(r))
            }
            _ => true,
        };
        requirements_met && self.allow.matches(tile) && !self.disallow.matches(tile)
    }

    pub fn handling(&self, key: &str) -> Option<&HandlingValue> {
        self.handling.get(key)
    }

    pub fn is_terminal(&self) -> bool {
        self.handling(HANDLING_TERMINAL)
            .is_some_and(HandlingValue::is_truthy)
    }

    pub fn max_count(&self) -> Option<usize> {
        self.handling(HANDLING_MAX_COUNT)
            .and_then(HandlingValue::as_int)
            .map(|n| n.max(0) as usize)
    }

    pub fn condition(&self) -> Option<ConditionPolicy> {
        self.handling(HANDLING_CONDITION)
            .and_then(HandlingValue::as_str)
            .and_then(ConditionPolicy::parse)
    }

    pub fn provides(&self, capability: &str) -> bool {
        self.provides.contains(capability)
    }
}
