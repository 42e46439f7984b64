//! Tile mechanics: condition policies, sensor phases and handling values.

use serde::{Deserialize, Serialize};

/// When a rule's actuator is allowed to fire, given this tick's and last tick's `exec`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ConditionPolicy {
    /// Fires while `exec` is true.
    #[default]
    Always,
    /// Fires while `exec` is false or absent.
    Low,
    /// Fires on the tick `exec` turns true after an explicit false.
    LowToHigh,
    /// Fires on the tick `exec` turns falsy after a true.
    HighToLow,
}

impl ConditionPolicy {
    /// Parse the value of a `condition` handling entry.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "always" => Some(ConditionPolicy::Always),
            "low" => Some(ConditionPolicy::Low),
            "low-to-high" => Some(ConditionPolicy::LowToHigh),
            "high-to-low" => Some(ConditionPolicy::HighToLow),
            _ => None,
        }
    }

    /// Evaluate the policy. `None` means the tile never wrote `exec` that tick.
    pub fn is_satisfied(&self, current: Option<bool>, previous: Option<bool>) -> bool {
        let high = current == Some(true);
        match self {
            ConditionPolicy::Always => high,
            ConditionPolicy::Low => !high,
            // An absent prior tick is not a negative.
            ConditionPolicy::LowToHigh => previous == Some(false) && high,
            ConditionPolicy::HighToLow => previous == Some(true) && !high,
        }
    }
}

/// Whether a sensor runs before or after the rule's filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SensorPhase {
    #[default]
    Pre,
    Post,
}

/// Value types for tile handling entries (`terminal`, `max-count`, `condition`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HandlingValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl HandlingValue {
    /// Loose truthiness: `false`, zero and the empty string are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            HandlingValue::Bool(b) => *b,
            HandlingValue::Int(i) => *i != 0,
            HandlingValue::Float(f) => *f != 0.0,
            HandlingValue::String(s) => !s.is_empty(),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            HandlingValue::Int(i) => Some(*i),
            HandlingValue::Float(f) => Some(*f as i64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            HandlingValue::String(s) => Some(s),
            _ => None,
        }
    }
}
