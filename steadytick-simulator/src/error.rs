use std::path::PathBuf;

use steadytick_config::ConfigError;
use steadytick_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulatorError {
    #[error("Scenario file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scenario deserialization error: {0}")]
    Serde(#[from] serde_yaml::Error),

    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    #[error("State hash mismatch: expected {expected}, got {actual}")]
    HashMismatch { expected: String, actual: String },
}
