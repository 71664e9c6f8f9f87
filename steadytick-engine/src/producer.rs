//! Synthetic command source.
//!
//! Stands in for a UI or network input layer by offering a burst of identical
//! commands every iteration. Producing faster than the core drains is the
//! point: it keeps the bounded queue under backpressure.

use steadytick_core::commands::{Command, CommandQueue};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BurstOutcome {
    pub accepted: u32,
    pub rejected: u32,
}

#[derive(Debug)]
pub struct BurstProducer {
    queue: CommandQueue,
    burst_size: u32,
    command: Command,
}

impl BurstProducer {
    pub fn new(queue: CommandQueue, burst_size: u32, command: Command) -> Self {
        Self {
            queue,
            burst_size,
            command,
        }
    }

    /// Offers `burst_size` copies of the command. Rejections are counted, not retried.
    pub fn produce(&self) -> BurstOutcome {
        let mut outcome = BurstOutcome::default();
        for _ in 0..self.burst_size {
            if self.queue.enqueue(self.command) {
                outcome.accepted += 1;
            } else {
                outcome.rejected += 1;
            }
        }
        outcome
    }
}
