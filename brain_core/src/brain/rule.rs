//! Runtime rules and their per-tick scratch state.

use glam::Vec2;
use tile_language::{ConditionPolicy, RuleDefinition, SensorPhase, TileDefinition};

use super::Brain;
use crate::config::EngineConfig;
use crate::entities::{Character, CharacterId, Feeling, ImpulseType};
use crate::library::Behavior;
use crate::stage::{Stage, StageEvent};

const ALWAYS_SENSOR: &str = "sensor.always";
const INPUT_CAPABILITY: &str = "input";
const MOVEMENT_CATEGORY: &str = "movement";

/// A character a sensor picked up, with its squared distance from the actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub character: CharacterId,
    pub dist_sq: f32,
}

/// What a rule's tiles have established so far this tick.
///
/// Every field starts unset; absent and false are different things, which the
/// edge-triggered condition policies rely on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleState {
    pub exec: Option<bool>,
    pub targets: Option<Vec<Target>>,
    pub direct_target: Option<Target>,
    pub direction: Option<Vec2>,
    pub speed: Option<f32>,
    pub page: Option<usize>,
    pub exclusive_move: bool,
    pub dist_cutoff_sq: Option<f32>,
    pub feeling: Option<Feeling>,
}

impl RuleState {
    /// The target an actuator should act on.
    pub fn first_target(&self) -> Option<Target> {
        self.targets
            .as_ref()
            .and_then(|t| t.first().copied())
            .or(self.direct_target)
    }
}

/// Everything a behavior may read or write while its rule runs.
pub struct RuleContext<'a> {
    pub state: &'a mut RuleState,
    pub prev_state: &'a RuleState,
    pub brain: &'a mut Brain,
    pub stage: &'a mut Stage,
}

impl RuleContext<'_> {
    pub fn actor(&self) -> CharacterId {
        self.brain.owner()
    }

    pub fn character(&self) -> Option<&Character> {
        self.stage.get_character(self.actor())
    }

    pub fn config(&self) -> &EngineConfig {
        self.stage.config()
    }

    pub fn default_speed(&self) -> f32 {
        self.character().map_or(0.0, Character::default_speed)
    }

    pub fn self_target(&self) -> Target {
        Target {
            character: self.actor(),
            dist_sq: 0.0,
        }
    }
}

/// A rule instantiated from its definition, with behaviors bound to each tile.
#[derive(Debug, Clone)]
pub struct Rule {
    sensor: Behavior,
    sensor_phase: SensorPhase,
    filters: Vec<Behavior>,
    actuator: Behavior,
    modifiers: Vec<Behavior>,
    policy: ConditionPolicy,
    has_input: bool,
    has_movement: bool,
    prev_state: RuleState,
    state: RuleState,
}

impl Rule {
    pub fn new(definition: &RuleDefinition) -> Self {
        let sensor_id = definition
            .sensor
            .as_ref()
            .map_or(ALWAYS_SENSOR, |tile| tile.id.as_str());

        Self {
            sensor: Behavior::from_id(sensor_id),
            sensor_phase: definition
                .sensor
                .as_ref()
                .map(|tile| tile.phase)
                .unwrap_or_default(),
            filters: bind_sorted(&definition.filters),
            actuator: Behavior::resolve(definition.actuator.as_deref().map(|t| t.id.as_str())),
            modifiers: bind_sorted(&definition.modifiers),
            policy: definition.condition_policy(),
            has_input: definition
                .sensor
                .as_ref()
                .is_some_and(|tile| tile.provides(INPUT_CAPABILITY)),
            has_movement: definition
                .actuator
                .as_ref()
                .is_some_and(|tile| tile.in_category(MOVEMENT_CATEGORY)),
            prev_state: RuleState::default(),
            state: RuleState::default(),
        }
    }

    pub fn state(&self) -> &RuleState {
        &self.state
    }

    pub fn prev_state(&self) -> &RuleState {
        &self.prev_state
    }

    pub fn policy(&self) -> ConditionPolicy {
        self.policy
    }

    pub fn has_input(&self) -> bool {
        self.has_input
    }

    pub fn has_movement(&self) -> bool {
        self.has_movement
    }

    pub fn sensor(&self) -> Behavior {
        self.sensor
    }

    pub fn actuator(&self) -> Behavior {
        self.actuator
    }

    /// Forget both this tick's and last tick's state.
    pub fn reset(&mut self) {
        self.state = RuleState::default();
        self.prev_state = RuleState::default();
    }

    pub fn execute(&mut self, brain: &mut Brain, stage: &mut Stage) {
        let actor = brain.owner();
        if self.has_input {
            stage.notify(StageEvent::CharHasInput(actor));
        }

        self.prev_state = std::mem::take(&mut self.state);
        let mut ctx = RuleContext {
            state: &mut self.state,
            prev_state: &self.prev_state,
            brain,
            stage,
        };

        if self.sensor_phase == SensorPhase::Pre {
            self.sensor.run(&mut ctx);
        }
        for filter in &self.filters {
            filter.run(&mut ctx);
        }
        if self.sensor_phase == SensorPhase::Post {
            self.sensor.run(&mut ctx);
        }

        if !self.policy.is_satisfied(ctx.state.exec, ctx.prev_state.exec) {
            return;
        }

        if self.has_movement
            && ctx.state.direction.is_none()
            && !ctx.stage.has_queued_impulses(actor)
        {
            default_movement(&mut ctx);
        }

        for modifier in &self.modifiers {
            modifier.run(&mut ctx);
        }
        self.actuator.run(&mut ctx);
    }
}

/// Bind behaviors in ascending priority, keeping the given order among equals.
fn bind_sorted(tiles: &[std::sync::Arc<TileDefinition>]) -> Vec<Behavior> {
    let mut sorted: Vec<&TileDefinition> = tiles.iter().map(|t| t.as_ref()).collect();
    sorted.sort_by_key(|tile| tile.priority);
    sorted
        .into_iter()
        .map(|tile| Behavior::from_id(&tile.id))
        .collect()
}

/// Queue a wander step when a movement rule has nowhere to go.
fn default_movement(ctx: &mut RuleContext<'_>) {
    let actor = ctx.actor();
    let Some(direction) = ctx.brain.wander_mut().direction(ctx.stage, actor) else {
        return;
    };
    let speed = ctx.default_speed();
    ctx.stage
        .queue_impulse(actor, direction, speed, ImpulseType::Default);
    ctx.state.direction = Some(direction);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tile_language::TileCatalog;

    fn definition(sensor: Option<&str>, filters: &[&str], actuator: Option<&str>) -> RuleDefinition {
        let catalog = TileCatalog::builtin().unwrap();
        let mut rule = RuleDefinition::new();
        rule.set_sensor(sensor.and_then(|id| catalog.get(id).cloned()));
        for id in filters {
            rule.insert_filter(rule.filters.len(), catalog.get(id).unwrap().clone());
        }
        rule.set_actuator(actuator.and_then(|id| catalog.get(id).cloned()));
        rule
    }

    #[test]
    fn test_missing_sensor_means_always() {
        let rule = Rule::new(&definition(None, &[], Some("actuator.move")));
        assert_eq!(rule.sensor(), Behavior::Always);
        assert!(rule.has_movement());
        assert!(!rule.has_input());
        assert_eq!(rule.policy(), ConditionPolicy::Always);
    }

    #[test]
    fn test_input_and_policy_flags() {
        let rule = Rule::new(&definition(
            Some("sensor.button.a"),
            &["filter.released"],
            Some("actuator.camera.follow"),
        ));
        assert!(rule.has_input());
        assert!(!rule.has_movement());
        assert_eq!(rule.policy(), ConditionPolicy::HighToLow);
    }

    #[test]
    fn test_missing_actuator_is_noop() {
        let rule = Rule::new(&definition(Some("sensor.see"), &["filter.it"], None));
        assert_eq!(rule.actuator(), Behavior::Noop);
    }

    fn run_once(definition: &RuleDefinition) -> Rule {
        let mut stage = Stage::with_defaults();
        let empty = tile_language::BrainDefinition::new();
        let id = stage.spawn(crate::entities::CharacterDefinition::new("kodu"), &empty, Vec2::ZERO);
        let mut brain = Brain::new(id, &empty);
        let mut rule = Rule::new(definition);
        rule.execute(&mut brain, &mut stage);
        rule
    }

    #[test]
    fn test_sensor_phase_orders_sensor_and_filters() {
        let catalog = TileCatalog::builtin().unwrap();
        let mut definition = definition(Some("sensor.see"), &["filter.me"], None);

        let rule = run_once(&definition);
        assert_eq!(rule.state().exec, Some(true));
        assert_eq!(rule.state().targets.as_ref().map(Vec::len), Some(1));

        let post = catalog
            .get("sensor.see")
            .unwrap()
            .as_ref()
            .clone()
            .with_phase(SensorPhase::Post);
        definition.sensor = Some(std::sync::Arc::new(post));

        // Alone on the stage, the late sensor's empty sighting wins.
        let rule = run_once(&definition);
        assert_eq!(rule.state().exec, Some(false));
        assert_eq!(rule.state().targets, Some(Vec::new()));
    }

    #[test]
    fn test_first_target_prefers_target_list() {
        let listed = Target {
            character: CharacterId::new(),
            dist_sq: 4.0,
        };
        let direct = Target {
            character: CharacterId::new(),
            dist_sq: 0.0,
        };
        let mut state = RuleState {
            direct_target: Some(direct),
            ..Default::default()
        };
        assert_eq!(state.first_target(), Some(direct));

        state.targets = Some(vec![listed]);
        assert_eq!(state.first_target(), Some(listed));
    }
}
