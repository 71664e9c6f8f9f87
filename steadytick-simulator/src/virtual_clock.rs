//! # Virtual Clock for Simulation
//!
//! A deterministic clock used in simulation and replay mode. Time only moves
//! when the driver advances it, so a run is independent of host scheduling.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use steadytick_core::time::{Clock, Timestamp};

/// A virtual clock that advances in milliseconds.
#[derive(Clone, Debug)]
pub struct VirtualClock {
    // Shared counter of simulated milliseconds.
    offset: Arc<AtomicI64>,
}

impl VirtualClock {
    /// Creates a new virtual clock starting at `start`.
    pub fn new(start: Timestamp) -> Self {
        Self {
            offset: Arc::new(AtomicI64::new(start)),
        }
    }

    /// Advances the clock. Negative amounts are ignored to keep it monotonic,
    /// and the reading saturates at `Timestamp::MAX` instead of wrapping.
    #[inline]
    pub fn advance(&self, ms: i64) {
        if ms > 0 {
            let _ = self
                .offset
                .fetch_update(Ordering::AcqRel, Ordering::Acquire, |now| {
                    Some(now.saturating_add(ms))
                });
        }
    }
}

impl Clock for VirtualClock {
    #[inline]
    fn now(&self) -> Timestamp {
        self.offset.load(Ordering::Acquire)
    }
}
