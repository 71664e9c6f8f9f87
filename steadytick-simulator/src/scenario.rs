//! Scenario files.
//!
//! A scenario scripts a deterministic run: the starting state, optional
//! timestep/queue overrides, a stall model, and a list of frames. Each frame
//! enqueues its commands and then advances the virtual clock by `delta_ms`,
//! `repeat` times.
//!
//! ```yaml
//! initial_state: { position: 0.0, velocity: 1.0 }
//! stall: { model: periodic, every: 20, stall_ms: 250 }
//! frames:
//!   - delta_ms: 16
//!     repeat: 100
//!   - delta_ms: 16
//!     commands:
//!       - { kind: accelerate, value: -3.0 }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use steadytick_config::{QueueConfig, TimestepConfig};
use steadytick_core::commands::Command;
use steadytick_core::state::SystemState;

use crate::error::SimulatorError;
use crate::stall::StallSpec;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_initial_state")]
    pub initial_state: SystemState,
    #[serde(default)]
    pub timestep: TimestepConfig,
    #[serde(default)]
    pub queue: QueueConfig,
    #[serde(default)]
    pub stall: StallSpec,
    pub frames: Vec<ScenarioFrame>,
    /// Digest the run must reproduce, if pinned.
    #[serde(default)]
    pub expected_hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioFrame {
    pub delta_ms: i64,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
    /// Enqueued once, before the first repetition.
    #[serde(default)]
    pub commands: Vec<Command>,
}

fn default_initial_state() -> SystemState {
    SystemState::new(0.0, 1.0)
}

fn default_repeat() -> u32 {
    1
}

impl Scenario {
    /// Loads and checks a scenario from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SimulatorError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SimulatorError::FileNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses and checks a scenario from YAML text.
    pub fn parse(content: &str) -> Result<Self, SimulatorError> {
        let scenario: Scenario = serde_yaml::from_str(content)?;
        scenario.check()?;
        Ok(scenario)
    }

    fn check(&self) -> Result<(), SimulatorError> {
        self.timestep.ensure_valid()?;
        self.queue.ensure_valid()?;
        if let Some(frame) = self.frames.iter().find(|f| f.delta_ms < 0) {
            return Err(SimulatorError::InvalidScenario(format!(
                "negative frame delta {} ms",
                frame.delta_ms
            )));
        }
        Ok(())
    }

    /// Total number of real-time iterations the scenario drives.
    pub fn frame_count(&self) -> u64 {
        self.frames.iter().map(|f| u64::from(f.repeat)).sum()
    }
}
