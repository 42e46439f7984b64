//! Movement impulses queued by actuators during a tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// How an impulse combines with others queued on the same tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImpulseType {
    /// Overrides everything else; only the first exclusive impulse counts.
    Exclusive,
    /// Averaged with other ambient impulses.
    Ambient,
    /// Fallback motion, used only when it is the sole impulse.
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impulse {
    pub direction: Vec2,
    pub magnitude: f32,
    pub impulse_type: ImpulseType,
}

impl Impulse {
    pub fn new(direction: Vec2, magnitude: f32, impulse_type: ImpulseType) -> Self {
        Self {
            direction,
            magnitude,
            impulse_type,
        }
    }

    fn vector(&self) -> Vec2 {
        self.direction * self.magnitude
    }
}

/// Impulses queued since the last blend.
#[derive(Debug, Clone, Default)]
pub struct ImpulseQueue {
    impulses: Vec<Impulse>,
}

impl ImpulseQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, direction: Vec2, magnitude: f32, impulse_type: ImpulseType) {
        self.impulses
            .push(Impulse::new(direction, magnitude, impulse_type));
    }

    pub fn len(&self) -> usize {
        self.impulses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.impulses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Impulse> {
        self.impulses.iter()
    }

    pub fn clear(&mut self) {
        self.impulses.clear();
    }

    /// Blend the queue into a single vector.
    ///
    /// An exclusive impulse wins outright. Otherwise ambient impulses are averaged,
    /// and a default impulse only counts when nothing else was queued.
    pub fn compute(&self) -> Option<Vec2> {
        if let Some(exclusive) = self
            .impulses
            .iter()
            .find(|i| i.impulse_type == ImpulseType::Exclusive)
        {
            return Some(exclusive.vector());
        }

        let allow_default = self.impulses.len() == 1;
        let counted: Vec<Vec2> = self
            .impulses
            .iter()
            .filter(|i| allow_default || i.impulse_type != ImpulseType::Default)
            .map(Impulse::vector)
            .collect();

        if counted.is_empty() {
            return None;
        }
        let sum: Vec2 = counted.iter().copied().sum();
        Some(sum / counted.len() as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_queue() {
        assert_eq!(ImpulseQueue::new().compute(), None);
    }

    #[test]
    fn test_ambient_average() {
        let mut queue = ImpulseQueue::new();
        queue.push(Vec2::X, 10.0, ImpulseType::Ambient);
        queue.push(Vec2::Y, 10.0, ImpulseType::Ambient);
        assert_eq!(queue.compute(), Some(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn test_exclusive_wins() {
        let mut queue = ImpulseQueue::new();
        queue.push(Vec2::X, 10.0, ImpulseType::Ambient);
        queue.push(Vec2::Y, 4.0, ImpulseType::Exclusive);
        queue.push(Vec2::NEG_X, 8.0, ImpulseType::Exclusive);
        assert_eq!(queue.compute(), Some(Vec2::new(0.0, 4.0)));
    }

    #[test]
    fn test_default_alone_counts() {
        let mut queue = ImpulseQueue::new();
        queue.push(Vec2::NEG_Y, 3.0, ImpulseType::Default);
        assert_eq!(queue.compute(), Some(Vec2::new(0.0, -3.0)));
    }

    #[test]
    fn test_default_suppressed_by_others() {
        let mut queue = ImpulseQueue::new();
        queue.push(Vec2::NEG_Y, 3.0, ImpulseType::Default);
        queue.push(Vec2::X, 6.0, ImpulseType::Ambient);
        assert_eq!(queue.compute(), Some(Vec2::new(6.0, 0.0)));
    }

    #[test]
    fn test_only_defaults_yield_nothing() {
        let mut queue = ImpulseQueue::new();
        queue.push(Vec2::X, 1.0, ImpulseType::Default);
        queue.push(Vec2::Y, 1.0, ImpulseType::Default);
        assert_eq!(queue.compute(), None);
    }
}
