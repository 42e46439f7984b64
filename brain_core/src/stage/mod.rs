//! The stage: the arena that owns every character and drives their brains.

mod events;
mod input;
mod save;

pub use events::*;
pub use input::*;
pub use save::*;

use std::collections::HashMap;

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tile_language::{BrainDefinition, TileCatalog};
use tracing::{debug, info, trace, warn};

use crate::config::EngineConfig;
use crate::entities::{Character, CharacterDefinition, CharacterId, ImpulseType};
use crate::error::{BrainError, Result};

/// Owns characters, camera, input, the clock and the event outbox.
///
/// Characters are iterated in insertion order so a seeded run is reproducible.
#[derive(Debug, Clone)]
pub struct Stage {
    config: EngineConfig,
    characters: HashMap<CharacterId, Character>,
    order: Vec<CharacterId>,
    pub camera: Vec2,
    pub controller: Controller,
    mode: GameMode,
    clock_ms: u64,
    rng: ChaCha8Rng,
    events: Vec<StageEvent>,
}

impl Stage {
    pub fn new(config: EngineConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.simulation.seed);
        Self {
            config,
            characters: HashMap::new(),
            order: Vec::new(),
            camera: Vec2::ZERO,
            controller: Controller::default(),
            mode: GameMode::Edit,
            clock_ms: 0,
            rng,
            events: Vec::new(),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Milliseconds of simulated time since the stage was created.
    pub fn now_ms(&self) -> u64 {
        self.clock_ms
    }

    pub fn advance_clock(&mut self, dt_ms: u64) {
        self.clock_ms = self.clock_ms.saturating_add(dt_ms);
    }

    pub(crate) fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Place a character. In play mode its brain starts immediately.
    pub fn add_character(&mut self, mut character: Character) -> CharacterId {
        let id = character.id;
        if self.mode == GameMode::Play {
            character.start_brain();
        }
        debug!(character = %id, kind = character.kind(), "character added");
        if self.characters.insert(id, character).is_none() {
            self.order.push(id);
        }
        id
    }

    pub fn spawn(
        &mut self,
        definition: CharacterDefinition,
        brain_definition: &BrainDefinition,
        position: Vec2,
    ) -> CharacterId {
        self.add_character(Character::new(definition, brain_definition, position))
    }

    pub fn get_character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(&id)
    }

    pub fn get_character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.get_mut(&id)
    }

    /// Live characters in insertion order.
    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.order
            .iter()
            .filter_map(|id| self.characters.get(id))
            .filter(|c| !c.destroyed)
    }

    /// Live characters other than `id`.
    pub fn characters_except(&self, id: CharacterId) -> impl Iterator<Item = &Character> {
        self.characters().filter(move |c| c.id != id)
    }

    pub fn character_count(&self) -> usize {
        self.characters().count()
    }

    pub fn position_of(&self, id: CharacterId) -> Option<Vec2> {
        self.get_character(id)
            .filter(|c| !c.destroyed)
            .map(|c| c.position)
    }

    /// Record that `a` and `b` touched. Both see the other on their next tick.
    pub fn record_bump(&mut self, a: CharacterId, b: CharacterId) {
        if let Some(character) = self.characters.get_mut(&a) {
            character.add_bump(b);
        }
        if let Some(character) = self.characters.get_mut(&b) {
            character.add_bump(a);
        }
    }

    pub fn queue_impulse(
        &mut self,
        id: CharacterId,
        direction: Vec2,
        magnitude: f32,
        impulse_type: ImpulseType,
    ) {
        if let Some(character) = self.characters.get_mut(&id) {
            character.queue_impulse(direction, magnitude, impulse_type);
        }
    }

    pub fn has_queued_impulses(&self, id: CharacterId) -> bool {
        self.characters
            .get(&id)
            .is_some_and(|c| !c.impulses().is_empty())
    }

    /// Queue an event for the host.
    pub fn notify(&mut self, event: StageEvent) {
        trace!(?event, "stage event");
        self.events.push(event);
    }

    pub fn events(&self) -> &[StageEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<StageEvent> {
        std::mem::take(&mut self.events)
    }

    /// Switch modes. Entering edit mode tears every brain down; entering play mode
    /// builds a fresh brain per character from its current program.
    pub fn set_game_mode(&mut self, mode: GameMode) {
        self.mode = mode;
        for id in &self.order {
            if let Some(character) = self.characters.get_mut(id) {
                match mode {
                    GameMode::Edit => character.stop_brain(),
                    GameMode::Play if !character.destroyed => character.start_brain(),
                    GameMode::Play => {}
                }
            }
        }
        info!(?mode, characters = self.order.len(), "game mode changed");
    }

    /// The program a character runs, for editing. Changes apply on the next switch to play.
    pub fn brain_definition_mut(&mut self, id: CharacterId) -> Result<&mut BrainDefinition> {
        self.characters
            .get_mut(&id)
            .map(Character::brain_definition_mut)
            .ok_or(BrainError::CharacterNotFound(id))
    }

    /// Replace a character's program. Trailing empty rules are dropped.
    pub fn set_brain_definition(
        &mut self,
        id: CharacterId,
        mut definition: BrainDefinition,
    ) -> Result<()> {
        let character = self
            .characters
            .get_mut(&id)
            .ok_or(BrainError::CharacterNotFound(id))?;
        definition.trim();
        character.set_brain_definition(definition);
        Ok(())
    }

    /// Mark a character destroyed, drop its body and tear down its brain.
    ///
    /// Returns false if it was already gone. The character is removed from the stage
    /// after the current tick.
    pub fn destroy(&mut self, id: CharacterId) -> bool {
        let Some(character) = self.characters.get_mut(&id) else {
            return false;
        };
        if character.destroyed {
            return false;
        }
        character.destroyed = true;
        character.body = None;
        character.feeling = None;
        character.stop_brain();
        debug!(character = %id, "character destroyed");
        self.notify(StageEvent::CharacterDestroying(id));
        true
    }

    /// Run one character's brain, then blend its impulses into its body.
    pub fn think(&mut self, id: CharacterId) {
        let brain = match self.characters.get_mut(&id) {
            Some(character) if !character.destroyed => character.take_brain(),
            _ => return,
        };

        if let Some(mut brain) = brain {
            brain.execute(self);
            match self.characters.get_mut(&id) {
                Some(character) if !character.destroyed => character.restore_brain(brain),
                _ => brain.destroy(),
            }
        }

        if let Some(character) = self.characters.get_mut(&id) {
            if !character.destroyed {
                character.apply_impulses();
                character.bumps.clear();
            }
        }
    }

    /// Think for every character, then drop the ones destroyed along the way.
    pub fn think_all(&mut self) {
        let ids = self.order.clone();
        for id in ids {
            self.think(id);
        }
        self.reap();
    }

    /// Advance the clock and run one tick.
    pub fn tick(&mut self, dt_ms: u64) {
        self.advance_clock(dt_ms);
        self.think_all();
    }

    fn reap(&mut self) {
        let characters = &mut self.characters;
        self.order.retain(|id| {
            let keep = characters.get(id).is_some_and(|c| !c.destroyed);
            if !keep {
                characters.remove(id);
            }
            keep
        });
    }

    /// Snapshot every live character and its program.
    pub fn save(&self) -> SavedGame {
        SavedGame {
            chars: self
                .characters()
                .map(|c| CharacterState {
                    x: c.position.x,
                    y: c.position.y,
                    id: c.definition.id.clone(),
                    bdefn: c.brain_definition().to_record(),
                })
                .collect(),
        }
    }

    pub fn save_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.save())?)
    }

    /// Spawn the characters of a saved game. Entries naming an unknown character
    /// definition are skipped.
    pub fn load(
        &mut self,
        saved: &SavedGame,
        catalog: &TileCatalog,
        definitions: &HashMap<String, CharacterDefinition>,
    ) -> Vec<CharacterId> {
        let mut spawned = Vec::with_capacity(saved.chars.len());
        for state in &saved.chars {
            let Some(definition) = definitions.get(&state.id) else {
                warn!(kind = %state.id, "skipping character with unknown definition");
                continue;
            };
            let brain = BrainDefinition::from_record(&state.bdefn, catalog);
            spawned.push(self.spawn(
                definition.clone(),
                &brain,
                Vec2::new(state.x, state.y),
            ));
        }
        info!(count = spawned.len(), "saved game loaded");
        spawned
    }

    pub fn load_json(
        &mut self,
        json: &str,
        catalog: &TileCatalog,
        definitions: &HashMap<String, CharacterDefinition>,
    ) -> Result<Vec<CharacterId>> {
        let saved: SavedGame = serde_json::from_str(json)?;
        Ok(self.load(&saved, catalog, definitions))
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::with_defaults()
    }
}
