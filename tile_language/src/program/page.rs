//! Page definitions.

use super::RuleDefinition;

/// An ordered list of rules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageDefinition {
    pub rules: Vec<RuleDefinition>,
}

impl PageDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop trailing empty rules.
    pub fn trim(&mut self) {
        while self.rules.last().is_some_and(RuleDefinition::is_empty) {
            self.rules.pop();
        }
    }

    /// Trim, then append the single empty rule that serves as the editor's insertion slot.
    pub fn prepare_for_edit(&mut self) {
        self.trim();
        self.rules.push(RuleDefinition::new());
    }

    /// True if every rule is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.iter().all(RuleDefinition::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::{TileDefinition, TileKind};
    use std::sync::Arc;

    fn always_rule() -> RuleDefinition {
        let mut rule = RuleDefinition::new();
        rule.set_sensor(Some(Arc::new(TileDefinition::new(
            TileKind::Sensor,
            "sensor.always",
            "Always",
        ))));
        rule
    }

    #[test]
    fn test_trim_drops_trailing_empties_only() {
        let mut page = PageDefinition::new();
        page.rules = vec![
            RuleDefinition::new(),
            always_rule(),
            RuleDefinition::new(),
            RuleDefinition::new(),
        ];

        page.trim();
        assert_eq!(page.rules.len(), 2);
        assert!(page.rules[0].is_empty());
    }

    #[test]
    fn test_prepare_for_edit_leaves_one_slot() {
        let mut page = PageDefinition::new();
        page.rules = vec![always_rule(), RuleDefinition::new(), RuleDefinition::new()];

        page.prepare_for_edit();
        assert_eq!(page.rules.len(), 2);
        assert!(page.rules[1].is_empty());

        page.prepare_for_edit();
        assert_eq!(page.rules.len(), 2);
    }

    #[test]
    fn test_empty_page() {
        let mut page = PageDefinition::new();
        assert!(page.is_empty());
        page.prepare_for_edit();
        assert!(page.is_empty());
        page.rules.insert(0, always_rule());
        assert!(!page.is_empty());
    }
}
