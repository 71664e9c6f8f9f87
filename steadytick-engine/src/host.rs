//! Host loop coordinating clock, core, producer, sink and metrics.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use opentelemetry::KeyValue;
use tokio::time::sleep;
use tracing::{debug, info, instrument};

use steadytick_config::SteadytickConfig;
use steadytick_core::commands::{Command, CommandQueue};
use steadytick_core::sim::{FrameOutput, SimulationCore};
use steadytick_core::state::SystemState;
use steadytick_core::time::Clock;
use steadytick_core::CoreError;
use steadytick_telemetry::logging::EventLogger;
use steadytick_telemetry::metrics::{FrameSample, MetricsRecorder};

use crate::error::EngineError;
use crate::producer::BurstProducer;
use crate::sink::FrameSink;

/// Totals of a finished (or interrupted) run.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LoopSummary {
    pub iterations: u64,
    pub fixed_steps: u64,
    pub overload_frames: u64,
    pub commands_rejected: u64,
    pub invalidations: u64,
    pub final_state: SystemState,
}

/// Real-time driver of a [`SimulationCore`].
///
/// Per iteration: sample the clock, advance the core, run the producer,
/// present the display frame, record metrics. Pacing happens in [`run`].
///
/// [`run`]: HostLoop::run
pub struct HostLoop<C: Clock, S: FrameSink> {
    clock: C,
    core: SimulationCore,
    producer: BurstProducer,
    sink: S,
    metrics: Arc<MetricsRecorder>,
    pacing: Duration,
    summary: LoopSummary,
}

impl<C: Clock, S: FrameSink> HostLoop<C, S> {
    pub fn new(
        clock: C,
        core: SimulationCore,
        producer: BurstProducer,
        sink: S,
        metrics: Arc<MetricsRecorder>,
        pacing: Duration,
    ) -> Self {
        let summary = LoopSummary {
            final_state: *core.state(),
            ..Default::default()
        };
        Self {
            clock,
            core,
            producer,
            sink,
            metrics,
            pacing,
            summary,
        }
    }

    /// Assembles a loop, with its own metrics registry, from validated
    /// configuration.
    ///
    /// The core's first delta is measured from the clock reading taken here.
    pub fn from_config(config: &SteadytickConfig, clock: C, sink: S) -> Result<Self, EngineError> {
        config.ensure_valid()?;
        let metrics = Arc::new(MetricsRecorder::new()?);
        debug!(timestep = ?config.timestep, "Building host loop");

        let queue = CommandQueue::with_capacity(config.queue.capacity).map_err(CoreError::from)?;
        let host = &config.host;
        let producer = BurstProducer::new(
            queue.share(),
            host.burst_size,
            Command::accelerate(host.burst_magnitude),
        );
        let initial = SystemState::new(host.initial_position, host.initial_velocity);
        let core = SimulationCore::new(config.timestep, queue, initial, clock.now())?;

        Ok(Self::new(
            clock,
            core,
            producer,
            sink,
            metrics,
            Duration::from_millis(host.pacing_ms),
        ))
    }

    /// Runs a single iteration without pacing.
    pub fn iterate(&mut self) -> Result<FrameOutput, EngineError> {
        let now = self.clock.now();
        let frame = self.core.advance(now);
        let burst = self.producer.produce();

        self.sink.present(&frame)?;

        let report = &frame.report;
        if report.invalidated {
            let state = self.core.state();
            EventLogger::log_invalidation(now, state.position, state.velocity);
        }
        if report.overloaded {
            EventLogger::log_event(
                "frame_overloaded",
                &[
                    KeyValue::new("timestamp_ms", now),
                    KeyValue::new("steps", i64::from(report.steps)),
                    KeyValue::new("discarded_seconds", report.discarded_seconds),
                    KeyValue::new("commands_flushed", i64::from(report.commands_flushed)),
                ],
            );
        }

        self.metrics.record_frame(FrameSample {
            steps: report.steps,
            overloaded: report.overloaded,
            discarded_seconds: report.discarded_seconds,
            commands_drained: report.commands_drained,
            commands_rejected: burst.rejected,
            commands_flushed: report.commands_flushed,
            invalidated: report.invalidated,
        });

        let summary = &mut self.summary;
        summary.iterations += 1;
        summary.fixed_steps += u64::from(report.steps);
        summary.overload_frames += u64::from(report.overloaded);
        summary.commands_rejected += u64::from(burst.rejected);
        summary.invalidations += u64::from(report.invalidated);
        summary.final_state = *self.core.state();

        Ok(frame)
    }

    /// Iterates until `shutdown` is raised or `max_iterations` is reached,
    /// sleeping `pacing` between iterations.
    #[instrument(skip_all)]
    pub async fn run(
        &mut self,
        shutdown: Arc<AtomicBool>,
        max_iterations: Option<u64>,
    ) -> Result<LoopSummary, EngineError> {
        info!(?max_iterations, pacing = ?self.pacing, "Starting host loop");
        let mut done = 0u64;
        while !shutdown.load(Ordering::Acquire) {
            if max_iterations.is_some_and(|max| done >= max) {
                break;
            }
            self.iterate()?;
            done += 1;
            if !self.pacing.is_zero() {
                sleep(self.pacing).await;
            }
        }
        info!(
            iterations = self.summary.iterations,
            overload_frames = self.summary.overload_frames,
            commands_rejected = self.summary.commands_rejected,
            "Host loop stopped"
        );
        Ok(self.summary)
    }

    #[inline]
    pub fn summary(&self) -> &LoopSummary {
        &self.summary
    }

    #[inline]
    pub fn core(&self) -> &SimulationCore {
        &self.core
    }

    /// Reinstates the simulated state, e.g. after the invalid-region fault.
    pub fn reset_state(&mut self, state: SystemState) -> Result<(), EngineError> {
        self.core.reset_state(state)?;
        self.summary.final_state = state;
        info!(?state, "State reset by host");
        Ok(())
    }

    #[inline]
    pub fn metrics(&self) -> &Arc<MetricsRecorder> {
        &self.metrics
    }

    /// Prometheus text exposition of this loop's counters.
    pub fn render_metrics(&self) -> Result<String, EngineError> {
        Ok(self.metrics.gather_metrics()?)
    }

    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }
}
