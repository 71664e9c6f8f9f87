//! ## steadytick-core::time
//! **Monotonic time sampling**
//!
//! Timestamps are signed 64-bit millisecond counts from a process-local
//! origin. Only differences between two samples carry meaning.

use std::time::Instant;

/// Milliseconds since an arbitrary monotonic origin.
pub type Timestamp = i64;

/// Source of monotonically non-decreasing timestamps.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall-clock source backed by [`Instant`], unaffected by system time changes.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> Timestamp {
        // i64 milliseconds outlast any process by ~292 million years.
        Timestamp::try_from(self.origin.elapsed().as_millis()).unwrap_or(Timestamp::MAX)
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_near_zero() {
        let clock = MonotonicClock::new();
        assert!(clock.now() < 1_000);
    }

    #[test]
    fn never_goes_backwards() {
        let clock = MonotonicClock::new();
        let mut last = clock.now();
        for _ in 0..1_000 {
            let now = clock.now();
            assert!(now >= last);
            last = now;
        }
    }
}
