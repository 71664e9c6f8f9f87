//! Command records carried from producers to the state model.

use serde::{Deserialize, Serialize};

/// Intent carried by a [`Command`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum CommandKind {
    /// Add the command value to the velocity.
    Accelerate,
    /// Zero the velocity.
    Stop,
}

/// Small, copyable, time-agnostic instruction.
///
/// Commands carry no timestamp: they take effect in arrival order at the next
/// fixed step that drains them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub kind: CommandKind,
    /// Parameter interpreted by the state model (ignored by `Stop`).
    #[serde(default)]
    pub value: f64,
}

impl Command {
    #[inline]
    pub const fn new(kind: CommandKind, value: f64) -> Self {
        Self { kind, value }
    }

    #[inline]
    pub const fn accelerate(delta_velocity: f64) -> Self {
        Self::new(CommandKind::Accelerate, delta_velocity)
    }

    #[inline]
    pub const fn stop() -> Self {
        Self::new(CommandKind::Stop, 0.0)
    }
}
