//! Fixed-timestep parameters.
//!
//! These values bound the temporal-control core:
//! - the fixed simulation slice and the per-frame delta clamp
//! - the per-frame step cap that breaks the spiral of death
//! - the per-step command budget

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ConfigError;

/// Default fixed simulation tick (seconds).
pub const FIXED_DT_SECONDS: f64 = 0.01;
/// Default clamp applied to a single real-time delta (seconds).
pub const MAX_DT_SECONDS: f64 = 0.05;
/// Default hard cap on fixed steps per real-time iteration.
pub const MAX_STEPS_PER_FRAME: u32 = 5;
/// Default number of queued commands applied before one fixed step.
pub const MAX_COMMANDS_PER_STEP: u32 = 4;

/// Fixed-timestep configuration value object.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, Copy, PartialEq)]
pub struct TimestepConfig {
    /// Duration of one fixed simulation step (seconds).
    #[validate(range(min = 0.000_001, max = 1.0))]
    #[serde(default = "default_fixed_dt")]
    pub fixed_dt_seconds: f64,

    /// Upper bound on the real-time delta fed into the accumulator (seconds).
    #[validate(range(min = 0.000_001, max = 10.0))]
    #[serde(default = "default_max_dt")]
    pub max_dt_seconds: f64,

    /// Maximum number of fixed steps run in one iteration.
    #[validate(range(min = 1, max = 10_000))]
    #[serde(default = "default_max_steps")]
    pub max_steps_per_frame: u32,

    /// Maximum number of commands drained before a single fixed step.
    #[validate(range(min = 1, max = 1_000_000))]
    #[serde(default = "default_max_commands")]
    pub max_commands_per_step: u32,

    /// Discard queued commands when the step cap is hit.
    #[serde(default)]
    pub flush_commands_on_overload: bool,
}

fn default_fixed_dt() -> f64 {
    FIXED_DT_SECONDS
}

fn default_max_dt() -> f64 {
    MAX_DT_SECONDS
}

fn default_max_steps() -> u32 {
    MAX_STEPS_PER_FRAME
}

fn default_max_commands() -> u32 {
    MAX_COMMANDS_PER_STEP
}

impl Default for TimestepConfig {
    fn default() -> Self {
        Self {
            fixed_dt_seconds: default_fixed_dt(),
            max_dt_seconds: default_max_dt(),
            max_steps_per_frame: default_max_steps(),
            max_commands_per_step: default_max_commands(),
            flush_commands_on_overload: false,
        }
    }
}

impl TimestepConfig {
    /// Runs field validation and the `fixed_dt < max_dt` ordering check.
    pub fn ensure_valid(&self) -> Result<(), ConfigError> {
        self.validate()?;
        if !self.fixed_dt_seconds.is_finite() || !self.max_dt_seconds.is_finite() {
            return Err(ConfigError::Invariant(
                "timestep durations must be finite".into(),
            ));
        }
        if self.fixed_dt_seconds >= self.max_dt_seconds {
            return Err(ConfigError::Invariant(format!(
                "fixed_dt_seconds ({}) must be strictly below max_dt_seconds ({})",
                self.fixed_dt_seconds, self.max_dt_seconds
            )));
        }
        Ok(())
    }
}
