//! Characters: a definition, a position, an optional body and a brain.

use glam::Vec2;
use tile_language::BrainDefinition;

use super::{Body, CharacterDefinition, CharacterId, Feeling, ImpulseQueue, ImpulseType};
use crate::brain::Brain;

/// A character placed on the stage.
#[derive(Debug, Clone)]
pub struct Character {
    pub id: CharacterId,
    pub definition: CharacterDefinition,
    pub position: Vec2,
    pub body: Option<Body>,
    /// Characters without a sprite never pick wander destinations.
    pub has_sprite: bool,
    pub destroyed: bool,
    pub feeling: Option<Feeling>,
    /// Characters touched since the last tick.
    pub bumps: Vec<CharacterId>,
    brain_definition: BrainDefinition,
    brain: Option<Brain>,
    impulses: ImpulseQueue,
}

impl Character {
    /// Create a character with a body and sprite. The brain definition is copied.
    pub fn new(
        definition: CharacterDefinition,
        brain_definition: &BrainDefinition,
        position: Vec2,
    ) -> Self {
        let body = Body::from_defaults(&definition.defaults);
        Self {
            id: CharacterId::new(),
            definition,
            position,
            body: Some(body),
            has_sprite: true,
            destroyed: false,
            feeling: None,
            bumps: Vec::new(),
            brain_definition: brain_definition.clone(),
            brain: None,
            impulses: ImpulseQueue::new(),
        }
    }

    pub fn without_body(mut self) -> Self {
        self.body = None;
        self
    }

    pub fn without_sprite(mut self) -> Self {
        self.has_sprite = false;
        self
    }

    /// The character kind, e.g. "kodu".
    pub fn kind(&self) -> &str {
        &self.definition.id
    }

    pub fn default_speed(&self) -> f32 {
        self.definition.defaults.speed
    }

    pub fn velocity(&self) -> Option<Vec2> {
        self.body.map(|body| Vec2::new(body.vx, body.vy))
    }

    pub fn brain_definition(&self) -> &BrainDefinition {
        &self.brain_definition
    }

    pub fn brain_definition_mut(&mut self) -> &mut BrainDefinition {
        &mut self.brain_definition
    }

    /// Replace the program. Takes effect the next time the brain starts.
    pub fn set_brain_definition(&mut self, brain_definition: BrainDefinition) {
        self.brain_definition = brain_definition;
    }

    pub fn brain(&self) -> Option<&Brain> {
        self.brain.as_ref()
    }

    pub(crate) fn take_brain(&mut self) -> Option<Brain> {
        self.brain.take()
    }

    pub(crate) fn restore_brain(&mut self, brain: Brain) {
        self.brain = Some(brain);
    }

    /// Build a fresh brain from the current definition, tearing down any previous one.
    pub fn start_brain(&mut self) {
        self.stop_brain();
        self.brain = Some(Brain::new(self.id, &self.brain_definition));
    }

    pub fn stop_brain(&mut self) {
        if let Some(mut brain) = self.brain.take() {
            brain.destroy();
        }
    }

    pub fn queue_impulse(&mut self, direction: Vec2, magnitude: f32, impulse_type: ImpulseType) {
        self.impulses.push(direction, magnitude, impulse_type);
    }

    pub fn impulses(&self) -> &ImpulseQueue {
        &self.impulses
    }

    pub fn compute_impulses(&self) -> Option<Vec2> {
        self.impulses.compute()
    }

    /// Unit heading of the impulses queued so far.
    pub fn next_direction(&self) -> Option<Vec2> {
        self.compute_impulses().and_then(Vec2::try_normalize)
    }

    /// Add the blended impulse to the body's velocity. The queue is always emptied.
    pub fn apply_impulses(&mut self) {
        if let Some(impulse) = self.impulses.compute() {
            if let Some(body) = self.body.as_mut() {
                body.vx += impulse.x;
                body.vy += impulse.y;
                tracing::trace!(character = %self.id, vx = body.vx, vy = body.vy, "impulses applied");
            }
        }
        self.impulses.clear();
    }

    pub fn add_bump(&mut self, other: CharacterId) {
        if !self.bumps.contains(&other) {
            self.bumps.push(other);
        }
    }
}
