//! ## steadytick-core::sim
//! **Single-iteration entry point of the temporal core**
//!
//! [`SimulationCore`] owns the frame controller, the state of record and the
//! previous-step snapshot. The host calls [`SimulationCore::advance`] once per
//! real-time iteration with a sampled timestamp and receives the interpolated
//! display state; no timing or I/O happens in here.

use steadytick_config::TimestepConfig;

use crate::commands::CommandQueue;
use crate::error::CoreError;
use crate::frame::{FrameController, FrameReport};
use crate::interp::blend;
use crate::state::SystemState;
use crate::time::Timestamp;

/// What one iteration hands to the presentation/logging collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    pub timestamp: Timestamp,
    pub dt_ms: i64,
    /// Blend of the last two fixed-step states. Display only.
    pub display: SystemState,
    pub report: FrameReport,
}

pub struct SimulationCore {
    controller: FrameController,
    current: SystemState,
    previous: SystemState,
    queue: CommandQueue,
}

impl SimulationCore {
    /// Builds a core whose first iteration measures time from `start`.
    ///
    /// Both the current and the previous state start out as `initial`.
    pub fn new(
        config: TimestepConfig,
        queue: CommandQueue,
        initial: SystemState,
        start: Timestamp,
    ) -> Result<Self, CoreError> {
        check_initial(&initial)?;
        Ok(Self {
            controller: FrameController::new(config, start)?,
            current: initial,
            previous: initial,
            queue,
        })
    }

    /// Runs one iteration at `now` and returns the display frame.
    pub fn advance(&mut self, now: Timestamp) -> FrameOutput {
        let report = self
            .controller
            .advance(now, &self.queue, &mut self.current, &mut self.previous);
        let display = blend(&self.previous, &self.current, self.controller.alpha());

        FrameOutput {
            timestamp: now,
            dt_ms: report.dt_ms,
            display,
            report,
        }
    }

    /// Reinstates a state from outside the loop (e.g. after a fault).
    pub fn reset_state(&mut self, state: SystemState) -> Result<(), CoreError> {
        check_initial(&state)?;
        self.current = state;
        self.previous = state;
        Ok(())
    }

    /// The simulated state of record.
    #[inline]
    pub fn state(&self) -> &SystemState {
        &self.current
    }

    #[inline]
    pub fn previous(&self) -> &SystemState {
        &self.previous
    }

    #[inline]
    pub fn accumulator(&self) -> f64 {
        self.controller.accumulator()
    }

    #[inline]
    pub fn config(&self) -> &TimestepConfig {
        self.controller.config()
    }

    /// Handle to the command queue drained by this core.
    #[inline]
    pub fn queue(&self) -> &CommandQueue {
        &self.queue
    }
}

fn check_initial(state: &SystemState) -> Result<(), CoreError> {
    if !state.position.is_finite() || !state.velocity.is_finite() {
        return Err(CoreError::InvalidState(format!(
            "non-finite state {:?}",
            state
        )));
    }
    if state.valid && state.position < 0.0 {
        return Err(CoreError::InvalidState(format!(
            "valid state with negative position {}",
            state.position
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Command;

    fn core(initial: SystemState) -> SimulationCore {
        let queue = CommandQueue::with_capacity(32).unwrap();
        SimulationCore::new(TimestepConfig::default(), queue, initial, 0).unwrap()
    }

    #[test]
    fn rejects_negative_valid_start() {
        let queue = CommandQueue::with_capacity(4).unwrap();
        let result = SimulationCore::new(
            TimestepConfig::default(),
            queue,
            SystemState::new(-1.0, 0.0),
            0,
        );
        assert!(matches!(result, Err(CoreError::InvalidState(_))));
    }

    #[test]
    fn output_carries_timestamp_and_delta() {
        let mut core = core(SystemState::new(0.0, 1.0));
        let out = core.advance(16);
        assert_eq!(out.timestamp, 16);
        assert_eq!(out.dt_ms, 16);
        assert_eq!(out.report.steps, 1);
    }

    #[test]
    fn display_blends_towards_current() {
        let mut core = core(SystemState::new(0.0, 1.0));
        let out = core.advance(15);
        // One step from 0.0 to 0.01, half a tick left over.
        assert!((out.display.position - 0.005).abs() < 1e-12);
        assert!((core.state().position - 0.01).abs() < 1e-12);
        assert_eq!(core.previous().position, 0.0);
    }

    #[test]
    fn queued_commands_reach_the_state() {
        let mut core = core(SystemState::new(0.0, 0.0));
        let producer = core.queue().share();
        assert!(producer.enqueue(Command::accelerate(2.0)));
        core.advance(10);
        assert_eq!(core.state().velocity, 2.0);
        assert!((core.state().position - 0.02).abs() < 1e-12);
    }

    #[test]
    fn reset_reinstates_validity() {
        let mut core = core(SystemState::new(0.0, -5.0));
        core.advance(10);
        assert!(!core.state().valid);

        core.reset_state(SystemState::new(1.0, 0.0)).unwrap();
        assert!(core.state().valid);
        assert_eq!(core.previous(), core.state());
    }
}
