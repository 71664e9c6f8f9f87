//! Bounded command channel between producers and the fixed-step loop.
//!
//! Backed by a fixed-size lock-free ring (`crossbeam::queue::ArrayQueue`):
//! - Bounded: the ring is allocated once and never grows
//! - Backpressure: a full queue rejects new commands, already-accepted
//!   commands keep their FIFO order
//! - Shareable: producers on other threads push through [`CommandQueue::share`]
//!   handles while the loop drains

use std::fmt;
use std::sync::Arc;

use crossbeam::queue::ArrayQueue;
use thiserror::Error;

use super::command::Command;

/// Command queue error conditions.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    #[error("Command queue capacity exceeded")]
    Full,
    #[error("Invalid capacity (must be greater than zero)")]
    InvalidCapacity,
}

/// Bounded FIFO of pending commands.
pub struct CommandQueue {
    inner: Arc<ArrayQueue<Command>>,
}

impl CommandQueue {
    /// Creates a queue holding at most `capacity` commands.
    pub fn with_capacity(capacity: usize) -> Result<Self, QueueError> {
        if capacity == 0 {
            return Err(QueueError::InvalidCapacity);
        }

        Ok(Self {
            inner: Arc::new(ArrayQueue::new(capacity)),
        })
    }

    /// Creates a new handle to the same underlying queue.
    #[inline]
    pub fn share(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }

    /// Attempts to append a command.
    ///
    /// A full queue is left untouched (length and order).
    #[inline]
    pub fn try_enqueue(&self, command: Command) -> Result<(), QueueError> {
        self.inner.push(command).map_err(|_| QueueError::Full)
    }

    /// Appends a command, returning whether it was accepted.
    #[inline]
    pub fn enqueue(&self, command: Command) -> bool {
        self.try_enqueue(command).is_ok()
    }

    /// Pops the oldest pending command.
    #[inline]
    pub fn drain_one(&self) -> Option<Command> {
        self.inner.pop()
    }

    /// Discards every pending command, returning how many were dropped.
    pub fn clear(&self) -> usize {
        let mut dropped = 0;
        while self.inner.pop().is_some() {
            dropped += 1;
        }
        dropped
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.inner.capacity()
    }
}

impl fmt::Debug for CommandQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandQueue")
            .field("len", &self.len())
            .field("capacity", &self.capacity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::CommandKind;

    fn accel(seq: u32) -> Command {
        Command::accelerate(f64::from(seq))
    }

    #[test]
    fn rejects_zero_capacity() {
        assert!(matches!(
            CommandQueue::with_capacity(0),
            Err(QueueError::InvalidCapacity)
        ));
    }

    #[test]
    fn handles_single_element() {
        let queue = CommandQueue::with_capacity(2).unwrap();
        assert!(queue.enqueue(accel(1)));
        assert_eq!(queue.drain_one(), Some(accel(1)));
        assert_eq!(queue.drain_one(), None);
    }

    #[test]
    fn full_queue_rejects_and_keeps_contents() {
        let queue = CommandQueue::with_capacity(32).unwrap();
        for i in 0..32 {
            assert!(queue.enqueue(accel(i)));
        }
        assert!(!queue.enqueue(Command::stop()));
        assert_eq!(queue.try_enqueue(Command::stop()), Err(QueueError::Full));
        assert_eq!(queue.len(), 32);

        for i in 0..32 {
            let cmd = queue.drain_one().unwrap();
            assert_eq!(cmd.kind, CommandKind::Accelerate);
            assert_eq!(cmd.value, f64::from(i));
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn shared_handles_see_same_queue() {
        let queue = CommandQueue::with_capacity(4).unwrap();
        let producer = queue.share();
        producer.enqueue(accel(7));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.drain_one(), Some(accel(7)));
        assert!(producer.is_empty());
    }

    #[test]
    fn clear_reports_dropped_count() {
        let queue = CommandQueue::with_capacity(8).unwrap();
        for i in 0..5 {
            queue.enqueue(accel(i));
        }
        assert_eq!(queue.clear(), 5);
        assert!(queue.is_empty());
        assert!(queue.enqueue(accel(9)));
    }

    #[test]
    fn wraps_buffer_correctly() {
        let queue = CommandQueue::with_capacity(4).unwrap();
        for cycle in 0..3 {
            for i in 0..4 {
                assert!(queue.enqueue(accel(i + cycle * 4)));
            }
            for i in 0..4 {
                assert_eq!(queue.drain_one(), Some(accel(i + cycle * 4)));
            }
        }
    }

    #[test]
    fn concurrent_producer_never_exceeds_capacity() {
        let queue = CommandQueue::with_capacity(16).unwrap();
        let producer = queue.share();
        let handle = std::thread::spawn(move || {
            let mut accepted = 0u32;
            for i in 0..1_000 {
                if producer.enqueue(accel(i)) {
                    accepted += 1;
                }
            }
            accepted
        });

        let mut drained = 0u32;
        let mut last = None;
        while !handle.is_finished() || !queue.is_empty() {
            assert!(queue.len() <= 16);
            if let Some(cmd) = queue.drain_one() {
                if let Some(prev) = last {
                    assert!(cmd.value > prev);
                }
                last = Some(cmd.value);
                drained += 1;
            }
        }
        let accepted = handle.join().unwrap();
        drained += queue.clear() as u32;
        assert_eq!(accepted, drained);
    }
}
