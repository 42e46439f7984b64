//! Player input as seen by sensors.

use glam::Vec2;

/// Buttons other than the d-pad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    A,
    B,
}

/// Current controller state, written by the host before each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Controller {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub a: bool,
    pub b: bool,
}

impl Controller {
    pub fn is_pressed(&self, button: Button) -> bool {
        match button {
            Button::A => self.a,
            Button::B => self.b,
        }
    }

    /// The d-pad as a vector, `+y` pointing down. Zero when nothing is held.
    pub fn dpad(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| match (neg, pos) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dpad() {
        let mut controller = Controller::default();
        assert_eq!(controller.dpad(), Vec2::ZERO);

        controller.right = true;
        controller.up = true;
        assert_eq!(controller.dpad(), Vec2::new(1.0, -1.0));

        controller.left = true;
        assert_eq!(controller.dpad(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_buttons() {
        let controller = Controller {
            b: true,
            ..Default::default()
        };
        assert!(!controller.is_pressed(Button::A));
        assert!(controller.is_pressed(Button::B));
    }
}
