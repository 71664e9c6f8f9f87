//! Command channel sizing.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ConfigError;

/// Default bound on queued commands.
pub const MAX_QUEUE_SIZE: usize = 32;

/// Command queue configuration.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, Copy, PartialEq, Eq)]
pub struct QueueConfig {
    /// Hard upper bound on pending commands.
    #[validate(range(min = 1, max = 1_048_576))]
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_capacity() -> usize {
    MAX_QUEUE_SIZE
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

impl QueueConfig {
    /// Range check on the capacity; callers allocate the ring from it.
    pub fn ensure_valid(&self) -> Result<(), ConfigError> {
        self.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_capacity_is_valid() {
        assert!(QueueConfig::default().ensure_valid().is_ok());
    }

    #[test]
    fn rejects_capacity_beyond_bound() {
        let config = QueueConfig {
            capacity: 10_000_000_000_000,
        };
        assert!(matches!(
            config.ensure_valid(),
            Err(ConfigError::Validation(_))
        ));
    }
}
