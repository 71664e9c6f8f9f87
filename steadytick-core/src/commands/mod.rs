//! ## steadytick-core::commands
//! **Bounded command channel**
//!
//! Producers (UI, sensor adapters, network handlers) enqueue [`Command`]s at
//! any cadence; the frame controller drains a bounded number per fixed step.

pub mod command;
pub mod queue;

pub use command::{Command, CommandKind};
pub use queue::{CommandQueue, QueueError};
