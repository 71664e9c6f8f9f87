//! ## steadytick-telemetry::logging
//! **Structured logging with tracing and OpenTelemetry key-values**
//!
//! The temporal core only emits `tracing` events; this module owns the global
//! subscriber and the shape of fault records (state invalidation, overload).

use opentelemetry::KeyValue;
use tracing::info_span;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, EnvFilter};

pub type InitError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Clone)]
pub struct EventLogger;

impl EventLogger {
    /// Installs the global subscriber. `RUST_LOG` takes precedence over `level`.
    pub fn init(level: &str, ansi: bool) -> Result<(), InitError> {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
            )
            .with_ansi(ansi)
            .with_thread_names(true)
            .with_span_events(FmtSpan::NONE)
            .try_init()
    }

    /// Records a control-loop event with structured metadata.
    #[inline]
    pub fn log_event(event_type: &str, metadata: &[KeyValue]) {
        let span = info_span!("loop_event", event_type = event_type, otel.kind = "INTERNAL");
        span.in_scope(|| {
            tracing::info!(metadata = ?metadata, "Control loop event occurred");
        });
    }

    /// Records the terminal fault of a state leaving its valid region.
    pub fn log_invalidation(timestamp_ms: i64, position: f64, velocity: f64) {
        Self::log_event(
            "state_invalidated",
            &[
                KeyValue::new("timestamp_ms", timestamp_ms),
                KeyValue::new("position", position),
                KeyValue::new("velocity", velocity),
            ],
        );
    }
}
