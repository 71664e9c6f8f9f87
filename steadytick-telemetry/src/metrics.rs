//! ## steadytick-telemetry::metrics
//! **Prometheus counters for the fixed-step loop**
//!
//! Load shedding is silent inside the core by construction (time is dropped,
//! not reported), so these counters are where it becomes observable.

use prometheus::{Counter, Histogram, HistogramOpts, IntCounter, Registry};

#[derive(Debug, Clone)]
pub struct MetricsRecorder {
    pub registry: Registry,
    pub frames: IntCounter,
    pub fixed_steps: IntCounter,
    pub overload_frames: IntCounter,
    pub discarded_seconds: Counter,
    pub commands_drained: IntCounter,
    pub commands_rejected: IntCounter,
    pub commands_flushed: IntCounter,
    pub invalidations: IntCounter,
    pub steps_per_frame: Histogram,
}

/// What one iteration contributes to the counters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameSample {
    pub steps: u32,
    pub overloaded: bool,
    pub discarded_seconds: f64,
    pub commands_drained: u32,
    pub commands_rejected: u32,
    pub commands_flushed: u32,
    pub invalidated: bool,
}

impl MetricsRecorder {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let frames = IntCounter::new("steadytick_frames_total", "Real-time iterations executed")?;
        let fixed_steps =
            IntCounter::new("steadytick_fixed_steps_total", "Fixed simulation steps run")?;
        let overload_frames = IntCounter::new(
            "steadytick_overload_frames_total",
            "Iterations that hit the per-frame step cap",
        )?;
        let discarded_seconds = Counter::new(
            "steadytick_discarded_seconds_total",
            "Real time dropped by the delta clamp and the step cap",
        )?;
        let commands_drained = IntCounter::new(
            "steadytick_commands_drained_total",
            "Commands drained from the queue by fixed steps",
        )?;
        let commands_rejected = IntCounter::new(
            "steadytick_commands_rejected_total",
            "Commands refused by a full queue",
        )?;
        let commands_flushed = IntCounter::new(
            "steadytick_commands_flushed_total",
            "Queued commands discarded on overload",
        )?;
        let invalidations = IntCounter::new(
            "steadytick_state_invalidations_total",
            "Transitions of the simulated state into the invalid region",
        )?;
        let steps_per_frame = Histogram::with_opts(
            HistogramOpts::new("steadytick_steps_per_frame", "Fixed steps run per iteration")
                .buckets(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 8.0, 16.0]),
        )?;

        registry.register(Box::new(frames.clone()))?;
        registry.register(Box::new(fixed_steps.clone()))?;
        registry.register(Box::new(overload_frames.clone()))?;
        registry.register(Box::new(discarded_seconds.clone()))?;
        registry.register(Box::new(commands_drained.clone()))?;
        registry.register(Box::new(commands_rejected.clone()))?;
        registry.register(Box::new(commands_flushed.clone()))?;
        registry.register(Box::new(invalidations.clone()))?;
        registry.register(Box::new(steps_per_frame.clone()))?;

        Ok(Self {
            registry,
            frames,
            fixed_steps,
            overload_frames,
            discarded_seconds,
            commands_drained,
            commands_rejected,
            commands_flushed,
            invalidations,
            steps_per_frame,
        })
    }

    pub fn record_frame(&self, sample: FrameSample) {
        self.frames.inc();
        self.fixed_steps.inc_by(u64::from(sample.steps));
        self.steps_per_frame.observe(f64::from(sample.steps));
        if sample.overloaded {
            self.overload_frames.inc();
        }
        if sample.discarded_seconds > 0.0 {
            self.discarded_seconds.inc_by(sample.discarded_seconds);
        }
        self.commands_drained
            .inc_by(u64::from(sample.commands_drained));
        self.commands_rejected
            .inc_by(u64::from(sample.commands_rejected));
        self.commands_flushed
            .inc_by(u64::from(sample.commands_flushed));
        if sample.invalidated {
            self.invalidations.inc();
        }
    }

    pub fn gather_metrics(&self) -> Result<String, prometheus::Error> {
        use prometheus::Encoder;
        let encoder = prometheus::TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}
