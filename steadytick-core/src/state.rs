//! ## steadytick-core::state
//! **Physical state and its fixed-step evolution**
//!
//! A single body on a half-line. Leaving the half-line is a terminal fault:
//! the state is clamped, flagged invalid and frozen until an external reset.
//! A non-finite position (overflow to infinity, or NaN from `inf - inf` or a
//! NaN command) counts as leaving it.

use serde::{Deserialize, Serialize};

use crate::commands::{Command, CommandKind};

/// Position/velocity pair with a validity gate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SystemState {
    pub position: f64,
    pub velocity: f64,
    #[serde(default = "default_valid")]
    pub valid: bool,
}

fn default_valid() -> bool {
    true
}

/// Result of a single [`SystemState::evolve`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The state was already invalid and did not change.
    Frozen,
    /// Position integrated normally.
    Advanced,
    /// Position went negative; the state was clamped and invalidated.
    Invalidated,
}

impl SystemState {
    /// A valid state at the given position and velocity.
    #[inline]
    pub const fn new(position: f64, velocity: f64) -> Self {
        Self {
            position,
            velocity,
            valid: true,
        }
    }

    /// Applies a command's effect on velocity. No-op while invalid.
    pub fn apply_command(&mut self, command: &Command) {
        if !self.valid {
            return;
        }
        match command.kind {
            CommandKind::Accelerate => self.velocity += command.value,
            CommandKind::Stop => self.velocity = 0.0,
        }
    }

    /// First-order Euler integration over one fixed step.
    pub fn evolve(&mut self, dt_seconds: f64) -> StepOutcome {
        if !self.valid {
            return StepOutcome::Frozen;
        }

        self.position += self.velocity * dt_seconds;

        if !self.position.is_finite() || self.position < 0.0 {
            self.position = 0.0;
            self.velocity = 0.0;
            self.valid = false;
            return StepOutcome::Invalidated;
        }
        StepOutcome::Advanced
    }
}

impl Default for SystemState {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}
