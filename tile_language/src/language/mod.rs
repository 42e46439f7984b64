//! Tile Constraint Engine - which tiles may legally come next in a rule.
//!
//! Suggestion for a sequence slot (filters after a sensor, modifiers after an actuator)
//! works as follows:
//! 1. **Candidates**: visible tiles of the slot kind, sorted by weight then catalog order
//! 2. **Terminal check**: a terminal tile right before the insertion point ends the run
//! 3. **Accumulation**: merge the root tile's constraints, then every tile before the
//!    insertion point, left to right
//! 4. **Filtering**: keep candidates whose requirements are provided, that are allowed,
//!    and that are not disallowed
//!
//! Root slots (sensor, actuator) skip steps 2-4 and offer every visible tile.

use std::sync::Arc;

use crate::program::RuleDefinition;
use crate::tiles::{Constraints, TileCatalog, TileDefinition, TileKind, DEFAULT_WEIGHT};

/// Configuration for suggestion ordering.
#[derive(Debug, Clone)]
pub struct SuggestionConfig {
    /// Weight used for tiles that declare none.
    pub default_weight: u32,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            default_weight: DEFAULT_WEIGHT,
        }
    }
}

/// The constraint engine, borrowing the catalog it suggests from.
pub struct Language<'c> {
    catalog: &'c TileCatalog,
    config: SuggestionConfig,
}

impl<'c> Language<'c> {
    /// Create an engine with the given configuration.
    pub fn new(catalog: &'c TileCatalog, config: SuggestionConfig) -> Self {
        Self { catalog, config }
    }

    /// Create an engine with default configuration.
    pub fn with_defaults(catalog: &'c TileCatalog) -> Self {
        Self::new(catalog, SuggestionConfig::default())
    }

    /// Ordered list of tiles that may be placed at `index` of the `kind` slot of `rule`.
    ///
    /// An empty result means nothing more can be added there.
    pub fn suggest_next(
        &self,
        rule: &RuleDefinition,
        kind: TileKind,
        index: usize,
    ) -> Vec<Arc<TileDefinition>> {
        let candidates = self.candidates(kind);
        match kind {
            TileKind::Sensor | TileKind::Actuator => candidates,
            TileKind::Filter => {
                self.compatible_set(candidates, &rule.filters, index, rule.sensor.as_deref())
            }
            TileKind::Modifier => self.compatible_set(
                candidates,
                &rule.modifiers,
                index,
                rule.actuator.as_deref(),
            ),
        }
    }

    pub fn sensor_suggestions(&self, rule: &RuleDefinition) -> Vec<Arc<TileDefinition>> {
        self.suggest_next(rule, TileKind::Sensor, 0)
    }

    pub fn filter_suggestions(
        &self,
        rule: &RuleDefinition,
        index: usize,
    ) -> Vec<Arc<TileDefinition>> {
        self.suggest_next(rule, TileKind::Filter, index)
    }

    pub fn actuator_suggestions(&self, rule: &RuleDefinition) -> Vec<Arc<TileDefinition>> {
        self.suggest_next(rule, TileKind::Actuator, 0)
    }

    pub fn modifier_suggestions(
        &self,
        rule: &RuleDefinition,
        index: usize,
    ) -> Vec<Arc<TileDefinition>> {
        self.suggest_next(rule, TileKind::Modifier, index)
    }

    /// Repair a rule after an edit.
    pub fn ensure_valid(rule: &mut RuleDefinition) {
        rule.ensure_valid();
    }

    /// Visible tiles of a kind, by ascending weight. The sort is stable, so ties keep
    /// catalog order.
    fn candidates(&self, kind: TileKind) -> Vec<Arc<TileDefinition>> {
        let mut tiles: Vec<_> = self
            .catalog
            .of_kind(kind)
            .filter(|tile| !tile.hidden)
            .cloned()
            .collect();
        tiles.sort_by_key(|tile| tile.weight_or(self.config.default_weight));
        tiles
    }

    fn compatible_set(
        &self,
        candidates: Vec<Arc<TileDefinition>>,
        run: &[Arc<TileDefinition>],
        index: usize,
        root: Option<&TileDefinition>,
    ) -> Vec<Arc<TileDefinition>> {
        let existing = &run[..index.min(run.len())];

        if existing.last().is_some_and(|last| last.is_terminal()) {
            return Vec::new();
        }

        let accumulated = accumulate(root, existing);

        candidates
            .into_iter()
            .filter(|tile| accumulated.admits(tile))
            .filter(|tile| !at_max_count(tile, existing))
            .collect()
    }
}

/// Merge the root's constraints, then each existing tile's, in order.
fn accumulate(root: Option<&TileDefinition>, existing: &[Arc<TileDefinition>]) -> Constraints {
    let mut accumulated = Constraints::new();
    let sources = root
        .into_iter()
        .chain(existing.iter().map(|tile| tile.as_ref()));
    for tile in sources {
        if let Some(constraints) = &tile.constraints {
            accumulated.merge(constraints);
        }
    }
    accumulated
}

fn at_max_count(tile: &TileDefinition, existing: &[Arc<TileDefinition>]) -> bool {
    match tile.max_count() {
        Some(max) => existing.iter().filter(|t| t.id == tile.id).count() >= max,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mechanics::HandlingValue;
    use crate::tiles::{TileMatch, HANDLING_TERMINAL};

    fn builtin() -> TileCatalog {
        TileCatalog::builtin().unwrap()
    }

    fn ids(tiles: &[Arc<TileDefinition>]) -> Vec<&str> {
        tiles.iter().map(|t| t.id.as_str()).collect()
    }

    fn rule_with(catalog: &TileCatalog, sensor: Option<&str>, actuator: Option<&str>) -> RuleDefinition {
        let mut rule = RuleDefinition::new();
        rule.set_sensor(sensor.and_then(|id| catalog.get(id).cloned()));
        rule.set_actuator(actuator.and_then(|id| catalog.get(id).cloned()));
        rule
    }

    #[test]
    fn test_sensor_suggestions_sorted_by_weight() {
        let catalog = builtin();
        let language = Language::with_defaults(&catalog);
        let suggestions = language.sensor_suggestions(&RuleDefinition::new());

        let ids = ids(&suggestions);
        assert_eq!(&ids[..2], &["sensor.see", "sensor.bump"]);
        assert!(!ids.contains(&"sensor.always"));
        // Unweighted tiles keep catalog order.
        assert_eq!(&ids[2..], &["sensor.dpad", "sensor.button.a", "sensor.button.b"]);
    }

    #[test]
    fn test_actuator_suggestions_skip_hidden() {
        let catalog = builtin();
        let language = Language::with_defaults(&catalog);
        let suggestions = language.actuator_suggestions(&RuleDefinition::new());

        let ids = ids(&suggestions);
        assert_eq!(ids[0], "actuator.move");
        assert!(!ids.contains(&"actuator.call-page"));
    }

    #[test]
    fn test_filters_after_see() {
        let catalog = builtin();
        let language = Language::with_defaults(&catalog);
        let rule = rule_with(&catalog, Some("sensor.see"), None);

        let suggestions = language.filter_suggestions(&rule, 0);
        let ids = ids(&suggestions);
        assert!(ids.contains(&"filter.kodu"));
        assert!(ids.contains(&"filter.nearby"));
        assert!(ids.contains(&"filter.it"));
        assert!(ids.contains(&"filter.not"));
        assert!(!ids.contains(&"filter.me"));
        // Needs input, which See does not provide.
        assert!(!ids.contains(&"filter.pressed"));
    }

    #[test]
    fn test_subject_disallows_second_subject() {
        let catalog = builtin();
        let language = Language::with_defaults(&catalog);
        let mut rule = rule_with(&catalog, Some("sensor.see"), None);
        rule.insert_filter(0, catalog.get("filter.kodu").cloned().unwrap());

        let suggestions = language.filter_suggestions(&rule, 1);
        let ids = ids(&suggestions);
        assert!(!ids.contains(&"filter.tree"));
        assert!(ids.contains(&"filter.nearby"));

        // Suggesting before the subject ignores it.
        let before = language.filter_suggestions(&rule, 0);
        assert!(before.iter().any(|t| t.id == "filter.tree"));
    }

    #[test]
    fn test_button_allows_edge_filters() {
        let catalog = builtin();
        let language = Language::with_defaults(&catalog);
        let rule = rule_with(&catalog, Some("sensor.button.a"), None);

        let suggestions = language.filter_suggestions(&rule, 0);
        let ids = ids(&suggestions);
        assert_eq!(ids, vec!["filter.pressed", "filter.released"]);
    }

    #[test]
    fn test_no_sensor_means_no_filters() {
        let catalog = builtin();
        let language = Language::with_defaults(&catalog);
        assert!(language.filter_suggestions(&RuleDefinition::new(), 0).is_empty());
    }

    #[test]
    fn test_unconstrained_root_fails_closed() {
        let catalog = builtin();
        let language = Language::with_defaults(&catalog);
        let rule = rule_with(&catalog, Some("sensor.always"), None);
        assert!(language.filter_suggestions(&rule, 0).is_empty());
    }

    #[test]
    fn test_terminal_page_modifier_ends_run() {
        let catalog = builtin();
        let language = Language::with_defaults(&catalog);
        let mut rule = rule_with(&catalog, Some("sensor.always"), Some("actuator.switch-page"));

        let first = language.modifier_suggestions(&rule, 0);
        assert_eq!(first.len(), 5);
        assert!(first.iter().all(|t| t.in_category("page")));

        rule.insert_modifier(0, catalog.get("modifier.page-3").cloned().unwrap());
        assert!(language.modifier_suggestions(&rule, 1).is_empty());
        assert!(language.modifier_suggestions(&rule, 7).is_empty());
    }

    #[test]
    fn test_move_modifiers_and_exclusions() {
        let catalog = builtin();
        let language = Language::with_defaults(&catalog);
        let mut rule = rule_with(&catalog, Some("sensor.see"), Some("actuator.move"));

        rule.insert_modifier(0, catalog.get("modifier.quickly").cloned().unwrap());
        let suggestions = language.modifier_suggestions(&rule, 1);
        let ids = ids(&suggestions);
        assert!(ids.contains(&"modifier.quickly"));
        assert!(!ids.contains(&"modifier.slowly"));
        assert!(ids.contains(&"modifier.toward"));
    }

    #[test]
    fn test_max_count() {
        let catalog = builtin();
        let language = Language::with_defaults(&catalog);
        let mut rule = rule_with(&catalog, Some("sensor.see"), Some("actuator.move"));
        for _ in 0..3 {
            let quickly = catalog.get("modifier.quickly").cloned().unwrap();
            let end = rule.modifiers.len();
            rule.insert_modifier(end, quickly);
        }

        let suggestions = language.modifier_suggestions(&rule, 3);
        let ids = ids(&suggestions);
        assert!(!ids.contains(&"modifier.quickly"));
    }

    #[test]
    fn test_custom_default_weight() {
        let catalog = TileCatalog::from_tiles(vec![
            TileDefinition::new(TileKind::Sensor, "sensor.plain", "Plain"),
            TileDefinition::new(TileKind::Sensor, "sensor.heavy", "Heavy").with_weight(50),
        ])
        .unwrap();

        let default = Language::with_defaults(&catalog);
        assert_eq!(
            ids(&default.sensor_suggestions(&RuleDefinition::new())),
            vec!["sensor.heavy", "sensor.plain"]
        );

        let light = Language::new(&catalog, SuggestionConfig { default_weight: 1 });
        assert_eq!(
            ids(&light.sensor_suggestions(&RuleDefinition::new())),
            vec!["sensor.plain", "sensor.heavy"]
        );
    }

    #[test]
    fn test_terminal_after_insertion_point_is_ignored() {
        // Tiles at or after the insertion point do not count.
        let catalog = TileCatalog::from_tiles(vec![
            TileDefinition::new(TileKind::Actuator, "actuator.x", "X").with_constraints(
                Constraints::new().allowing(TileMatch::new().with_category("c")),
            ),
            TileDefinition::new(TileKind::Modifier, "modifier.end", "End")
                .with_category("c")
                .with_constraints(
                    Constraints::new().with_handling(HANDLING_TERMINAL, HandlingValue::Bool(true)),
                ),
            TileDefinition::new(TileKind::Modifier, "modifier.more", "More").with_category("c"),
        ])
        .unwrap();
        let language = Language::with_defaults(&catalog);

        let mut rule = RuleDefinition::new();
        rule.set_actuator(catalog.get("actuator.x").cloned());
        rule.insert_modifier(0, catalog.get("modifier.more").cloned().unwrap());
        rule.insert_modifier(1, catalog.get("modifier.end").cloned().unwrap());

        assert!(language.modifier_suggestions(&rule, 2).is_empty());
        assert_eq!(language.modifier_suggestions(&rule, 1).len(), 2);
    }

    #[test]
    fn test_ensure_valid() {
        let catalog = builtin();
        let mut rule = rule_with(&catalog, Some("sensor.see"), Some("actuator.move"));
        rule.insert_modifier(0, catalog.get("modifier.quickly").cloned().unwrap());
        rule.actuator = None;

        Language::ensure_valid(&mut rule);
        assert!(rule.modifiers.is_empty());
    }
}
