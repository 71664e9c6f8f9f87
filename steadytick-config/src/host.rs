//! Host loop parameters.
//!
//! Everything here belongs to the process driving the core, not to the core
//! itself: iteration pacing, the synthetic input burst and the starting state.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ConfigError;

/// Host loop configuration.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
pub struct HostConfig {
    /// Sleep between iterations (milliseconds).
    #[validate(range(max = 10_000))]
    #[serde(default = "default_pacing_ms")]
    pub pacing_ms: u64,

    /// Commands injected by the synthetic producer per iteration.
    #[validate(range(max = 1_000_000))]
    #[serde(default = "default_burst_size")]
    pub burst_size: u32,

    /// Velocity change carried by each injected `Accelerate` command.
    #[validate(range(min = -1_000_000.0, max = 1_000_000.0))]
    #[serde(default = "default_burst_magnitude")]
    pub burst_magnitude: f64,

    /// Starting position of the simulated body.
    #[validate(range(min = 0.0, max = 1.0e12))]
    #[serde(default)]
    pub initial_position: f64,

    /// Starting velocity of the simulated body.
    #[validate(range(min = -1_000_000.0, max = 1_000_000.0))]
    #[serde(default = "default_initial_velocity")]
    pub initial_velocity: f64,
}

fn default_pacing_ms() -> u64 {
    16
}

fn default_burst_size() -> u32 {
    10
}

fn default_burst_magnitude() -> f64 {
    0.1
}

fn default_initial_velocity() -> f64 {
    1.0
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            pacing_ms: default_pacing_ms(),
            burst_size: default_burst_size(),
            burst_magnitude: default_burst_magnitude(),
            initial_position: 0.0,
            initial_velocity: default_initial_velocity(),
        }
    }
}

impl HostConfig {
    /// Field validation plus a NaN check, which range validators let through.
    pub fn ensure_valid(&self) -> Result<(), ConfigError> {
        self.validate()?;
        let values = [
            self.burst_magnitude,
            self.initial_position,
            self.initial_velocity,
        ];
        if values.iter().any(|v| v.is_nan()) {
            return Err(ConfigError::Invariant(
                "host parameters must not be NaN".into(),
            ));
        }
        Ok(())
    }
}
