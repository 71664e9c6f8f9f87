//! ## steadytick-engine
//! **Loop orchestration around the temporal core**
//!
//! The core never sleeps, reads a clock or writes output; this crate does all
//! three. A [`HostLoop`] samples a [`Clock`](steadytick_core::time::Clock),
//! advances the [`SimulationCore`](steadytick_core::sim::SimulationCore), lets a
//! [`BurstProducer`] push synthetic input, hands the display frame to a
//! [`FrameSink`] and records metrics, then paces itself with `tokio`.

pub mod error;
pub mod host;
pub mod producer;
pub mod sink;

pub use error::EngineError;
pub use host::{HostLoop, LoopSummary};
pub use producer::{BurstOutcome, BurstProducer};
pub use sink::{ConsoleSink, FrameSink, LatestFrameSink, NullSink, TracingSink};

pub mod prelude {
    pub use super::{
        BurstProducer, ConsoleSink, EngineError, FrameSink, HostLoop, LoopSummary, TracingSink,
    };
}
