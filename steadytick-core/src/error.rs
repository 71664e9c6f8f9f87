use steadytick_config::ConfigError;
use thiserror::Error;

use crate::commands::QueueError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid timestep configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Command queue error: {0}")]
    Queue(#[from] QueueError),

    #[error("Invalid initial state: {0}")]
    InvalidState(String),
}
