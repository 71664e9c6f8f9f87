//! # steadytick Telemetry
//!
//! Crate for logging and metrics around the fixed-timestep loop.

pub mod logging;
pub mod metrics;

pub use logging::EventLogger;
pub use metrics::MetricsRecorder;
