//! The brain interpreter: pages of rules evaluated once per tick.

mod rule;
mod wander;

pub use rule::*;
pub use wander::*;

use tile_language::{BrainDefinition, PageDefinition};
use tracing::{debug, trace};

use crate::entities::{CharacterId, Feeling};
use crate::stage::{Stage, StageEvent};

/// A page of runtime rules.
#[derive(Debug, Clone)]
pub struct Page {
    index: usize,
    rules: Vec<Rule>,
}

impl Page {
    pub fn new(index: usize, definition: &PageDefinition) -> Self {
        Self {
            index,
            rules: definition.rules.iter().map(Rule::new).collect(),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn reset(&mut self) {
        self.rules.iter_mut().for_each(Rule::reset);
    }
}

/// A character's running program.
///
/// Rules on the current page run in order until one of them ends the tick, either by
/// switching pages or by destroying the character.
#[derive(Debug, Clone)]
pub struct Brain {
    owner: CharacterId,
    pages: Vec<Page>,
    current_page: usize,
    done: bool,
    executing: bool,
    pending_reset: Option<usize>,
    feeling: Option<Feeling>,
    prev_feeling: Option<Feeling>,
    wander: Wander,
}

impl Brain {
    pub fn new(owner: CharacterId, definition: &BrainDefinition) -> Self {
        Self {
            owner,
            pages: definition
                .pages()
                .iter()
                .enumerate()
                .map(|(index, page)| Page::new(index, page))
                .collect(),
            current_page: 0,
            done: false,
            executing: false,
            pending_reset: None,
            feeling: None,
            prev_feeling: None,
            wander: Wander::new(),
        }
    }

    pub fn owner(&self) -> CharacterId {
        self.owner
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// True once a rule ended the tick early.
    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn is_executing(&self) -> bool {
        self.executing
    }

    pub fn feeling(&self) -> Option<Feeling> {
        self.feeling
    }

    pub fn prev_feeling(&self) -> Option<Feeling> {
        self.prev_feeling
    }

    pub fn wander(&self) -> &Wander {
        &self.wander
    }

    pub(crate) fn wander_mut(&mut self) -> &mut Wander {
        &mut self.wander
    }

    /// Stop evaluating the current page for this tick.
    pub fn end_tick(&mut self) {
        self.done = true;
    }

    pub fn set_feeling(&mut self, feeling: Option<Feeling>) {
        self.feeling = feeling;
    }

    /// Make `index` the current page and end the tick. The target page starts from
    /// fresh rule state. An index with no page leaves the brain idle.
    pub fn switch_page(&mut self, index: usize) {
        debug!(character = %self.owner, from = self.current_page, to = index, "switch page");
        self.current_page = index;
        if let Some(page) = self.pages.get_mut(index) {
            page.reset();
        }
        if self.executing {
            self.pending_reset = Some(index);
        }
        self.done = true;
    }

    /// Run the current page once.
    ///
    /// A call made while the brain is already executing returns immediately.
    pub fn execute(&mut self, stage: &mut Stage) {
        if self.executing {
            trace!(character = %self.owner, "nested execute ignored");
            return;
        }
        if self.current_page >= self.pages.len() {
            return;
        }

        self.executing = true;
        self.prev_feeling = self.feeling;
        self.done = false;

        let index = self.current_page;
        self.wander.prepare(stage, self.owner);

        let mut rules = std::mem::take(&mut self.pages[index].rules);
        for rule in rules.iter_mut() {
            rule.execute(self, stage);
            if self.done {
                break;
            }
        }
        let switched_to_self = self.pending_reset.take() == Some(index);
        if let Some(page) = self.pages.get_mut(index) {
            page.rules = rules;
            // Its rules were out while the switch happened.
            if switched_to_self {
                page.reset();
            }
        }

        let alive = stage
            .get_character(self.owner)
            .is_some_and(|c| !c.destroyed);
        if !alive {
            self.executing = false;
            return;
        }

        self.wander.update(stage);

        if self.feeling != self.prev_feeling {
            debug!(character = %self.owner, feeling = ?self.feeling, "feeling changed");
            if let Some(character) = stage.get_character_mut(self.owner) {
                character.feeling = self.feeling;
            }
            if let Some(feeling) = self.feeling {
                stage.notify(StageEvent::Expressed {
                    character: self.owner,
                    feeling,
                });
            }
        }

        self.executing = false;
    }

    /// Release all pages. Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.pages.is_empty() && self.done {
            return;
        }
        trace!(character = %self.owner, "brain destroyed");
        self.pages.clear();
        self.wander.reset();
        self.pending_reset = None;
        self.done = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::CharacterDefinition;
    use glam::Vec2;
    use tile_language::{RuleDefinition, TileCatalog};

    fn always_express(catalog: &TileCatalog) -> RuleDefinition {
        let mut rule = RuleDefinition::new();
        rule.set_sensor(catalog.get("sensor.always").cloned());
        rule.set_actuator(catalog.get("actuator.express").cloned());
        rule.insert_modifier(0, catalog.get("modifier.happy").unwrap().clone());
        rule
    }

    fn setup() -> (Stage, Brain) {
        let catalog = TileCatalog::builtin().unwrap();
        let mut definition = BrainDefinition::new();
        definition.page_mut(0).unwrap().rules.push(always_express(&catalog));
        definition.page_mut(1).unwrap().rules.push(always_express(&catalog));

        let mut stage = Stage::with_defaults();
        let id = stage.spawn(CharacterDefinition::new("kodu"), &definition, Vec2::ZERO);
        (stage, Brain::new(id, &definition))
    }

    #[test]
    fn test_new_brain_mirrors_definition() {
        let (_, brain) = setup();
        assert_eq!(brain.pages().len(), tile_language::PAGE_COUNT);
        assert_eq!(brain.page(0).unwrap().rules().len(), 1);
        assert_eq!(brain.page(4).unwrap().index(), 4);
        assert_eq!(brain.current_page(), 0);
    }

    #[test]
    fn test_execute_runs_current_page() {
        let (mut stage, mut brain) = setup();
        brain.execute(&mut stage);

        assert_eq!(brain.feeling(), Some(Feeling::Happy));
        assert!(!brain.is_done());
        assert_eq!(brain.page(0).unwrap().rules()[0].state().exec, Some(true));
        assert!(brain.page(1).unwrap().rules()[0].state().exec.is_none());
        assert_eq!(
            stage.get_character(brain.owner()).unwrap().feeling,
            Some(Feeling::Happy)
        );
    }

    #[test]
    fn test_switch_page_resets_target() {
        let (mut stage, mut brain) = setup();
        brain.switch_page(1);
        brain.execute(&mut stage);
        assert_eq!(brain.page(1).unwrap().rules()[0].state().exec, Some(true));

        brain.switch_page(1);
        assert!(brain.is_done());
        assert!(brain.page(1).unwrap().rules()[0].state().exec.is_none());
    }

    #[test]
    fn test_missing_page_is_idle() {
        let (mut stage, mut brain) = setup();
        brain.switch_page(9);
        brain.execute(&mut stage);
        assert_eq!(brain.current_page(), 9);
        assert!(brain.feeling().is_none());
        assert!(stage.drain_events().is_empty());
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let (mut stage, mut brain) = setup();
        brain.destroy();
        brain.destroy();
        assert!(brain.pages().is_empty());
        brain.execute(&mut stage);
        assert!(brain.feeling().is_none());
    }
}
