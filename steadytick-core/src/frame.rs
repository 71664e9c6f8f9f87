//! ## steadytick-core::frame
//! **Fixed-step accumulation with a per-frame step cap**
//!
//! Converts irregular wall-clock deltas into a whole number of uniform
//! simulation steps:
//! 1. clamp the delta to `max_dt` (excess real time is discarded)
//! 2. accumulate, then consume in `fixed_dt` slices, at most
//!    `max_steps_per_frame` per iteration
//! 3. on hitting the cap, drop the remaining accumulator so overload cannot
//!    compound into ever larger catch-up work
//!
//! The accumulator is kept in integer nanoseconds so that consuming a clamped
//! delta in fixed slices is exact and replays bit-for-bit.

use steadytick_config::TimestepConfig;
use tracing::{debug, trace, warn};

use crate::commands::CommandQueue;
use crate::error::CoreError;
use crate::state::{StepOutcome, SystemState};
use crate::time::Timestamp;

const NANOS_PER_MILLI: u64 = 1_000_000;
const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

/// Per-iteration diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    /// Raw elapsed time since the previous iteration.
    pub dt_ms: i64,
    /// Elapsed time after clamping, in seconds.
    pub dt_seconds: f64,
    /// Fixed steps run this iteration.
    pub steps: u32,
    /// The step cap was reached and the accumulator reset.
    pub overloaded: bool,
    /// Real time dropped by the clamp and by the cap.
    pub discarded_seconds: f64,
    /// Commands taken off the queue by this iteration's steps.
    pub commands_drained: u32,
    /// Commands dropped by the overload flush policy.
    pub commands_flushed: u32,
    /// The state crossed into the invalid region during this iteration.
    pub invalidated: bool,
}

/// Owns the accumulator and the last sampled timestamp.
#[derive(Debug, Clone)]
pub struct FrameController {
    config: TimestepConfig,
    fixed_dt_ns: u64,
    max_dt_ns: u64,
    last_tick: Timestamp,
    accumulator_ns: u64,
}

impl FrameController {
    /// Creates a controller anchored at `start`.
    pub fn new(config: TimestepConfig, start: Timestamp) -> Result<Self, CoreError> {
        config.ensure_valid()?;

        Ok(Self {
            fixed_dt_ns: seconds_to_nanos(config.fixed_dt_seconds),
            max_dt_ns: seconds_to_nanos(config.max_dt_seconds),
            config,
            last_tick: start,
            accumulator_ns: 0,
        })
    }

    #[inline]
    pub fn config(&self) -> &TimestepConfig {
        &self.config
    }

    #[inline]
    pub fn last_tick(&self) -> Timestamp {
        self.last_tick
    }

    /// Simulated time not yet consumed by a fixed step, in seconds.
    #[inline]
    pub fn accumulator(&self) -> f64 {
        self.accumulator_ns as f64 / NANOS_PER_SECOND
    }

    /// Fractional progress towards the next fixed step, in `[0, 1)`.
    #[inline]
    pub fn alpha(&self) -> f64 {
        self.accumulator_ns as f64 / self.fixed_dt_ns as f64
    }

    /// Runs one real-time iteration.
    ///
    /// `previous` receives a snapshot of `current` before every fixed step; if
    /// no step runs it keeps whatever it held.
    pub fn advance(
        &mut self,
        now: Timestamp,
        queue: &CommandQueue,
        current: &mut SystemState,
        previous: &mut SystemState,
    ) -> FrameReport {
        let elapsed = now.saturating_sub(self.last_tick);
        if elapsed < 0 {
            warn!(
                now,
                last_tick = self.last_tick,
                "Timestamp went backwards, treating as zero delta"
            );
        }
        let mut report = FrameReport {
            dt_ms: elapsed.max(0),
            ..Default::default()
        };
        self.last_tick = self.last_tick.max(now);

        let raw_ns = u64::try_from(report.dt_ms)
            .unwrap_or(0)
            .saturating_mul(NANOS_PER_MILLI);
        let clamped_ns = raw_ns.min(self.max_dt_ns);
        let mut discarded_ns = raw_ns - clamped_ns;
        if discarded_ns > 0 {
            debug!(dt_ms = report.dt_ms, "Delta clamped to max_dt");
        }
        report.dt_seconds = clamped_ns as f64 / NANOS_PER_SECOND;
        self.accumulator_ns += clamped_ns;

        let max_steps = self.config.max_steps_per_frame;
        let max_commands = self.config.max_commands_per_step;
        while self.accumulator_ns >= self.fixed_dt_ns && report.steps < max_steps {
            *previous = *current;

            let mut processed = 0;
            while processed < max_commands {
                let Some(command) = queue.drain_one() else {
                    break;
                };
                current.apply_command(&command);
                processed += 1;
            }
            report.commands_drained += processed;

            if current.evolve(self.config.fixed_dt_seconds) == StepOutcome::Invalidated {
                warn!(
                    timestamp = now,
                    step = report.steps,
                    "State left its valid region and is now frozen"
                );
                report.invalidated = true;
            }

            self.accumulator_ns -= self.fixed_dt_ns;
            report.steps += 1;
        }

        if report.steps == max_steps {
            discarded_ns += self.accumulator_ns;
            self.accumulator_ns = 0;
            report.overloaded = true;
            if self.config.flush_commands_on_overload {
                report.commands_flushed = u32::try_from(queue.clear()).unwrap_or(u32::MAX);
            }
            debug!(
                steps = report.steps,
                flushed = report.commands_flushed,
                "Step cap reached, accumulator reset"
            );
        }

        report.discarded_seconds = discarded_ns as f64 / NANOS_PER_SECOND;
        trace!(?report, "Frame advanced");
        report
    }
}

fn seconds_to_nanos(seconds: f64) -> u64 {
    (seconds * NANOS_PER_SECOND).round() as u64
}
