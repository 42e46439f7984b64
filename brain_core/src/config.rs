//! Engine configuration, loadable from TOML.

use serde::{Deserialize, Serialize};

use crate::error::{BrainError, Result};

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub wander: WanderConfig,

    #[serde(default)]
    pub sensing: SensingConfig,

    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl EngineConfig {
    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).map_err(|e| BrainError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

/// Idle roaming.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WanderConfig {
    /// Extra room around the viewport when picking a destination.
    pub margin: f32,
    /// Half the viewport width, in world units.
    pub view_half_width: f32,
    /// Half the viewport height, in world units.
    pub view_half_height: f32,
    /// Shortest retarget delay, in whole seconds.
    pub retarget_min_secs: u64,
    /// Exclusive upper bound of the retarget delay, in whole seconds.
    pub retarget_max_secs: u64,
}

impl Default for WanderConfig {
    fn default() -> Self {
        Self {
            margin: 30.0,
            view_half_width: 80.0,
            view_half_height: 60.0,
            retarget_min_secs: 2,
            retarget_max_secs: 5,
        }
    }
}

/// Sensor and filter tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SensingConfig {
    /// Squared distance separating "nearby" from "far away".
    pub dist_cutoff_sq: f32,
}

impl Default for SensingConfig {
    fn default() -> Self {
        Self {
            dist_cutoff_sq: 3000.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Seed for the stage RNG.
    pub seed: u64,
}
