//! # Host Stall Models
//!
//! Emulate the irregular real-time deltas a host produces: scheduler jitter,
//! GC or debugger pauses. The simulator adds the stall to each nominal frame
//! delta before advancing the virtual clock.
//!
//! ## Models:
//! - `NoStall`: nominal deltas only
//! - `RandomStall`: uniform extra delay in `[0, max_ms]`, seeded
//! - `PeriodicStall`: a fixed spike every N frames

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Trait for stall models.
pub trait StallModel: Send {
    /// Returns the delta actually observed for a nominal `base_ms` frame.
    fn apply_stall(&mut self, base_ms: i64) -> i64;
}

/// Leaves every delta unchanged.
#[derive(Debug, Clone, Copy)]
pub struct NoStall;

impl StallModel for NoStall {
    #[inline]
    fn apply_stall(&mut self, base_ms: i64) -> i64 {
        base_ms
    }
}

/// Adds a uniform random delay from a seeded generator.
#[derive(Debug)]
pub struct RandomStall {
    max_ms: u64,
    rng: SmallRng,
}

impl RandomStall {
    /// * `max_ms` - largest extra delay that can be added.
    /// * `seed` - generator seed; equal seeds give equal sequences.
    pub fn new(max_ms: u64, seed: u64) -> Self {
        Self {
            max_ms,
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl StallModel for RandomStall {
    #[inline]
    fn apply_stall(&mut self, base_ms: i64) -> i64 {
        let added = self.rng.random_range(0..=self.max_ms);
        base_ms.saturating_add(i64::try_from(added).unwrap_or(i64::MAX))
    }
}

/// Injects a `stall_ms` spike on every `every`-th frame.
#[derive(Debug, Clone)]
pub struct PeriodicStall {
    every: u32,
    stall_ms: i64,
    counter: u32,
}

impl PeriodicStall {
    pub fn new(every: u32, stall_ms: i64) -> Self {
        Self {
            every: every.max(1),
            stall_ms,
            counter: 0,
        }
    }
}

impl StallModel for PeriodicStall {
    fn apply_stall(&mut self, base_ms: i64) -> i64 {
        self.counter += 1;
        if self.counter == self.every {
            self.counter = 0;
            base_ms.saturating_add(self.stall_ms)
        } else {
            base_ms
        }
    }
}

/// Serialisable description of a stall model, as found in scenario files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum StallSpec {
    #[default]
    None,
    Random {
        max_ms: u64,
        #[serde(default)]
        seed: u64,
    },
    Periodic {
        every: u32,
        stall_ms: u64,
    },
}

impl StallSpec {
    pub fn build(&self) -> Box<dyn StallModel> {
        match *self {
            StallSpec::None => Box::new(NoStall),
            StallSpec::Random { max_ms, seed } => Box::new(RandomStall::new(max_ms, seed)),
            StallSpec::Periodic { every, stall_ms } => Box::new(PeriodicStall::new(
                every,
                i64::try_from(stall_ms).unwrap_or(i64::MAX),
            )),
        }
    }
}
