//! # steadytick-core
//!
//! Deterministic fixed-timestep core for real-time control loops.
//!
//! The core advances a small physical state model in uniform slices no matter
//! how irregularly the host samples wall-clock time, and accepts external
//! commands through a bounded channel.
//!
//! ### Guarantees:
//! - Every state evolution receives exactly `fixed_dt_seconds`
//! - At most `max_steps_per_frame` steps and `max_commands_per_step` commands
//!   per step, so worst-case iteration cost is a constant
//! - Overload drops simulated time instead of compounding catch-up work
//!
//! ### Key Submodules:
//! - `time`: `Clock` trait and `MonotonicClock`
//! - `commands`: `Command` records and the bounded `CommandQueue`
//! - `state`: `SystemState` and its Euler evolution
//! - `frame`: `FrameController`, the accumulator and the step cap
//! - `interp`: display-only blending
//! - `sim`: `SimulationCore::advance`, one iteration given a timestamp

pub mod commands;
pub mod error;
pub mod frame;
pub mod interp;
pub mod sim;
pub mod state;
pub mod time;

pub mod prelude {
    pub use crate::commands::*;
    pub use crate::error::*;
    pub use crate::frame::*;
    pub use crate::interp::*;
    pub use crate::sim::*;
    pub use crate::state::*;
    pub use crate::time::*;
}

pub use error::CoreError;
pub use steadytick_config::TimestepConfig;
