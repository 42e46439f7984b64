//! Brain definitions and their save format.

use super::{BrainRecord, PageDefinition, PageRecord, RuleDefinition, RuleRecord};
use crate::error::Result;
use crate::tiles::{TileCatalog, TileKind};

/// Number of pages in every brain.
pub const PAGE_COUNT: usize = 5;

/// A complete program: exactly [`PAGE_COUNT`] pages.
///
/// Characters own one; a live character works on a clone so edits never reach the
/// original until they are committed.
#[derive(Debug, Clone, PartialEq)]
pub struct BrainDefinition {
    pages: Vec<PageDefinition>,
}

impl Default for BrainDefinition {
    fn default() -> Self {
        Self {
            pages: vec![PageDefinition::new(); PAGE_COUNT],
        }
    }
}

impl BrainDefinition {
    /// Create a brain with empty pages.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> &[PageDefinition] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&PageDefinition> {
        self.pages.get(index)
    }

    pub fn page_mut(&mut self, index: usize) -> Option<&mut PageDefinition> {
        self.pages.get_mut(index)
    }

    /// Trim trailing empty rules on every page.
    pub fn trim(&mut self) {
        self.pages.iter_mut().for_each(PageDefinition::trim);
    }

    /// Convert to the save format. Empty arrays and missing tiles are omitted.
    pub fn to_record(&self) -> BrainRecord {
        BrainRecord {
            pages: self
                .pages
                .iter()
                .map(|page| PageRecord {
                    rules: page.rules.iter().map(rule_to_record).collect(),
                })
                .collect(),
        }
    }

    /// Rebuild from the save format, resolving ids against `catalog`.
    ///
    /// Ids that do not resolve to a tile of the right kind are dropped. The page list is
    /// padded or truncated to [`PAGE_COUNT`].
    pub fn from_record(record: &BrainRecord, catalog: &TileCatalog) -> Self {
        let mut pages: Vec<PageDefinition> = record
            .pages
            .iter()
            .map(|page| PageDefinition {
                rules: page
                    .rules
                    .iter()
                    .map(|rule| rule_from_record(rule, catalog))
                    .collect(),
            })
            .collect();

        if pages.len() != PAGE_COUNT {
            tracing::warn!(
                found = pages.len(),
                expected = PAGE_COUNT,
                "saved brain has the wrong page count"
            );
            pages.resize(PAGE_COUNT, PageDefinition::new());
        }

        Self { pages }
    }

    /// Serialize to the JSON save format.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_record())?)
    }

    /// Deserialize from the JSON save format.
    pub fn from_json(json: &str, catalog: &TileCatalog) -> Result<Self> {
        let record: BrainRecord = serde_json::from_str(json)?;
        Ok(Self::from_record(&record, catalog))
    }
}

fn rule_to_record(rule: &RuleDefinition) -> RuleRecord {
    RuleRecord {
        sensor: rule.sensor.as_ref().map(|t| t.id.clone()),
        actuator: rule.actuator.as_ref().map(|t| t.id.clone()),
        filters: rule.filters.iter().map(|t| t.id.clone()).collect(),
        modifiers: rule.modifiers.iter().map(|t| t.id.clone()).collect(),
    }
}

fn rule_from_record(record: &RuleRecord, catalog: &TileCatalog) -> RuleDefinition {
    let resolve = |id: &String, kind: TileKind| {
        let tile = catalog.get_of_kind(id, kind).cloned();
        if tile.is_none() {
            tracing::warn!(tile = %id, %kind, "unresolved tile id dropped");
        }
        tile
    };

    let mut rule = RuleDefinition {
        sensor: record.sensor.as_ref().and_then(|id| resolve(id, TileKind::Sensor)),
        actuator: record
            .actuator
            .as_ref()
            .and_then(|id| resolve(id, TileKind::Actuator)),
        filters: record
            .filters
            .iter()
            .filter_map(|id| resolve(id, TileKind::Filter))
            .collect(),
        modifiers: record
            .modifiers
            .iter()
            .filter_map(|id| resolve(id, TileKind::Modifier))
            .collect(),
    };
    rule.ensure_valid();
    rule
}
