//! Idle roaming for movement rules that name no direction.

use glam::Vec2;
use rand::Rng;

use crate::entities::CharacterId;
use crate::stage::Stage;

/// A brain's wander destination and its retarget timer.
///
/// `prepare` runs before the page, `direction` when a rule asks for a heading, and
/// `update` after the page. Asking for a heading keeps the current destination alive;
/// a tick where nobody asks cancels the timer and forgets the destination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wander {
    destination: Option<Vec2>,
    poked: bool,
    retarget_at_ms: Option<u64>,
}

impl Wander {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn destination(&self) -> Option<Vec2> {
        self.destination
    }

    pub fn retarget_at_ms(&self) -> Option<u64> {
        self.retarget_at_ms
    }

    pub fn is_poked(&self) -> bool {
        self.poked
    }

    pub fn prepare(&mut self, stage: &mut Stage, actor: CharacterId) {
        self.poked = false;
        if let Some(at) = self.retarget_at_ms {
            if stage.now_ms() >= at {
                self.retarget_at_ms = None;
                self.pick_destination(stage, actor);
            }
        }
        if self.destination.is_none() {
            self.pick_destination(stage, actor);
        }
    }

    /// Unit vector from the actor toward the destination. `None` on arrival.
    pub fn direction(&mut self, stage: &mut Stage, actor: CharacterId) -> Option<Vec2> {
        self.poked = true;
        if self.destination.is_none() {
            self.pick_destination(stage, actor);
        }
        let destination = self.destination?;
        let position = stage.position_of(actor)?;
        (destination - position).try_normalize()
    }

    pub fn update(&mut self, stage: &mut Stage) {
        if self.poked {
            if self.retarget_at_ms.is_none() {
                let wander = &stage.config().wander;
                let (min, max) = (wander.retarget_min_secs, wander.retarget_max_secs);
                let secs = if max > min {
                    stage.rng_mut().gen_range(min..max)
                } else {
                    min
                };
                self.retarget_at_ms = Some(stage.now_ms() + secs * 1000);
            }
        } else if self.retarget_at_ms.take().is_some() {
            self.destination = None;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn pick_destination(&mut self, stage: &mut Stage, actor: CharacterId) {
        match stage.get_character(actor) {
            Some(character) if character.has_sprite && !character.destroyed => {}
            _ => return,
        }
        let wander = stage.config().wander.clone();
        let camera = stage.camera;
        let half_x = wander.view_half_width + wander.margin;
        let half_y = wander.view_half_height + wander.margin;
        let rng = stage.rng_mut();
        let destination = Vec2::new(
            camera.x - half_x + rng.gen::<f32>() * half_x * 2.0,
            camera.y - half_y + rng.gen::<f32>() * half_y * 2.0,
        );
        tracing::debug!(character = %actor, x = destination.x, y = destination.y, "wander destination");
        self.destination = Some(destination);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::CharacterDefinition;
    use tile_language::BrainDefinition;

    fn stage_with_kodu() -> (Stage, CharacterId) {
        let mut stage = Stage::with_defaults();
        let id = stage.spawn(CharacterDefinition::new("kodu"), &BrainDefinition::new(), Vec2::ZERO);
        (stage, id)
    }

    #[test]
    fn test_destination_within_viewport_margin() {
        let (mut stage, id) = stage_with_kodu();
        stage.camera = Vec2::new(100.0, 50.0);
        let mut wander = Wander::new();
        for _ in 0..50 {
            wander.reset();
            wander.prepare(&mut stage, id);
            let destination = wander.destination().unwrap();
            assert!((destination.x - 100.0).abs() <= 110.0);
            assert!((destination.y - 50.0).abs() <= 90.0);
        }
    }

    #[test]
    fn test_no_destination_without_sprite() {
        let mut stage = Stage::with_defaults();
        let character = crate::entities::Character::new(
            CharacterDefinition::new("ghost"),
            &BrainDefinition::new(),
            Vec2::ZERO,
        )
        .without_sprite();
        let id = stage.add_character(character);

        let mut wander = Wander::new();
        wander.prepare(&mut stage, id);
        assert!(wander.destination().is_none());
        assert!(wander.direction(&mut stage, id).is_none());
    }

    #[test]
    fn test_poke_arms_timer_within_range() {
        let (mut stage, id) = stage_with_kodu();
        let mut wander = Wander::new();
        wander.prepare(&mut stage, id);
        let direction = wander.direction(&mut stage, id);
        assert!(direction.is_some_and(|d| (d.length() - 1.0).abs() < 1e-4));
        wander.update(&mut stage);

        let at = wander.retarget_at_ms().unwrap();
        assert!((2000..5000).contains(&at));
        assert!(at % 1000 == 0);
    }

    #[test]
    fn test_unpoked_tick_cancels_timer_and_forgets_destination() {
        let (mut stage, id) = stage_with_kodu();
        let mut wander = Wander::new();
        wander.prepare(&mut stage, id);
        wander.direction(&mut stage, id);
        wander.update(&mut stage);
        assert!(wander.retarget_at_ms().is_some());

        wander.prepare(&mut stage, id);
        wander.update(&mut stage);
        assert!(wander.retarget_at_ms().is_none());
        assert!(wander.destination().is_none());
    }

    #[test]
    fn test_timer_expiry_picks_new_destination() {
        let (mut stage, id) = stage_with_kodu();
        let mut wander = Wander::new();
        wander.prepare(&mut stage, id);
        let first = wander.destination();
        wander.direction(&mut stage, id);
        wander.update(&mut stage);

        stage.advance_clock(5000);
        wander.prepare(&mut stage, id);
        assert!(wander.retarget_at_ms().is_none());
        assert_ne!(wander.destination(), first);
    }
}
