//! Configuration errors.

use std::path::PathBuf;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested file does not exist.
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// One or more fields are outside their allowed range.
    #[error("Invalid configuration:\n{}", describe_fields(.0))]
    Validation(#[source] ValidationErrors),

    /// Fields are individually valid but inconsistent with each other.
    #[error("Configuration invariant violated: {0}")]
    Invariant(String),

    /// YAML or environment layer could not be extracted.
    #[error("Configuration parsing error: {0}")]
    Parsing(#[from] Box<figment::Error>),
}

/// One `field: reason` line per failure, sorted so output is stable.
fn describe_fields(errors: &ValidationErrors) -> String {
    let mut lines: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, failures)| {
            failures.iter().map(move |failure| {
                let reason = failure
                    .message
                    .as_ref()
                    .map_or_else(|| failure.code.to_string(), |m| m.to_string());
                format!("  {field}: {reason}")
            })
        })
        .collect();
    lines.sort();
    lines.join("\n")
}

impl From<ValidationErrors> for ConfigError {
    fn from(errors: ValidationErrors) -> Self {
        ConfigError::Validation(errors)
    }
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        ConfigError::Parsing(Box::new(error))
    }
}
