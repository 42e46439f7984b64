//! Rule definitions.

use std::sync::Arc;

use crate::mechanics::ConditionPolicy;
use crate::tiles::{TileDefinition, TileKind};

/// A user-edited rule: an optional sensor with ordered filters, and an optional
/// actuator with ordered modifiers.
///
/// Filters and modifiers stay sorted by ascending priority; tiles with equal priority
/// keep their relative order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleDefinition {
    pub sensor: Option<Arc<TileDefinition>>,
    pub filters: Vec<Arc<TileDefinition>>,
    pub actuator: Option<Arc<TileDefinition>>,
    pub modifiers: Vec<Arc<TileDefinition>>,
}

impl RuleDefinition {
    /// Create an empty rule.
    pub fn new() -> Self {
        Self::default()
    }

    /// A rule with neither sensor nor actuator.
    pub fn is_empty(&self) -> bool {
        self.sensor.is_none() && self.actuator.is_none()
    }

    /// Set or clear the sensor. Clearing it drops the filters.
    pub fn set_sensor(&mut self, sensor: Option<Arc<TileDefinition>>) {
        self.sensor = sensor.filter(|tile| accepts(TileKind::Sensor, tile));
        self.ensure_valid();
    }

    /// Set or clear the actuator. Clearing it drops the modifiers.
    pub fn set_actuator(&mut self, actuator: Option<Arc<TileDefinition>>) {
        self.actuator = actuator.filter(|tile| accepts(TileKind::Actuator, tile));
        self.ensure_valid();
    }

    /// Insert a filter at `index` (clamped), then restore priority order.
    pub fn insert_filter(&mut self, index: usize, tile: Arc<TileDefinition>) {
        if accepts(TileKind::Filter, &tile) {
            let index = index.min(self.filters.len());
            self.filters.insert(index, tile);
            sort_by_priority(&mut self.filters);
        }
        self.ensure_valid();
    }

    /// Insert a modifier at `index` (clamped), then restore priority order.
    pub fn insert_modifier(&mut self, index: usize, tile: Arc<TileDefinition>) {
        if accepts(TileKind::Modifier, &tile) {
            let index = index.min(self.modifiers.len());
            self.modifiers.insert(index, tile);
            sort_by_priority(&mut self.modifiers);
        }
        self.ensure_valid();
    }

    pub fn remove_filter(&mut self, index: usize) -> Option<Arc<TileDefinition>> {
        (index < self.filters.len()).then(|| self.filters.remove(index))
    }

    pub fn remove_modifier(&mut self, index: usize) -> Option<Arc<TileDefinition>> {
        (index < self.modifiers.len()).then(|| self.modifiers.remove(index))
    }

    /// Swap the filter at `index` for `tile`, then restore priority order.
    /// Returns the replaced tile; out-of-range indices and wrong kinds change nothing.
    pub fn replace_filter(
        &mut self,
        index: usize,
        tile: Arc<TileDefinition>,
    ) -> Option<Arc<TileDefinition>> {
        let replaced = replace_sorted(&mut self.filters, index, tile, TileKind::Filter);
        self.ensure_valid();
        replaced
    }

    pub fn replace_modifier(
        &mut self,
        index: usize,
        tile: Arc<TileDefinition>,
    ) -> Option<Arc<TileDefinition>> {
        let replaced = replace_sorted(&mut self.modifiers, index, tile, TileKind::Modifier);
        self.ensure_valid();
        replaced
    }

    /// Repair the rule's shape: no filters without a sensor, no modifiers without an actuator.
    pub fn ensure_valid(&mut self) {
        if self.sensor.is_none() {
            self.filters.clear();
        }
        if self.actuator.is_none() {
            self.modifiers.clear();
        }
    }

    /// The tiles in a sequence slot, or the root tile as a one-element slice.
    pub fn tiles(&self, kind: TileKind) -> &[Arc<TileDefinition>] {
        match kind {
            TileKind::Sensor => self.sensor.as_slice(),
            TileKind::Filter => &self.filters,
            TileKind::Actuator => self.actuator.as_slice(),
            TileKind::Modifier => &self.modifiers,
        }
    }

    /// Condition policy from the `condition` handling of the sensor and filters.
    /// The last tile declaring one wins.
    pub fn condition_policy(&self) -> ConditionPolicy {
        self.sensor
            .iter()
            .chain(self.filters.iter())
            .filter_map(|tile| tile.condition())
            .last()
            .unwrap_or_default()
    }
}

fn accepts(kind: TileKind, tile: &TileDefinition) -> bool {
    if tile.kind != kind {
        tracing::warn!(tile = %tile.id, expected = %kind, "tile placed in the wrong slot, ignored");
        return false;
    }
    true
}

fn replace_sorted(
    tiles: &mut [Arc<TileDefinition>],
    index: usize,
    tile: Arc<TileDefinition>,
    kind: TileKind,
) -> Option<Arc<TileDefinition>> {
    if index >= tiles.len() || !accepts(kind, &tile) {
        return None;
    }
    let replaced = std::mem::replace(&mut tiles[index], tile);
    sort_by_priority(tiles);
    Some(replaced)
}

fn sort_by_priority(tiles: &mut [Arc<TileDefinition>]) {
    // slice::sort_by_key is stable
    tiles.sort_by_key(|tile| tile.priority);
}
