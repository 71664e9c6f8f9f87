//! # steadytick Configuration System
//!
//! Hierarchical configuration for the fixed-timestep loop and its host.
//!
//! ## Features
//! - **Single value object**: every tunable constant of the temporal core lives
//!   in [`TimestepConfig`], never in compiled-in literals
//! - **Validation**: field ranges through `validator`, cross-field ordering
//!   (`fixed_dt < max_dt`) checked before any core is built
//! - **Layering**: defaults, YAML files and `STEADYTICK_*` environment overrides

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

mod error;
mod host;
mod queue;
mod telemetry;
mod timestep;
mod validation;

pub use error::ConfigError;
pub use host::HostConfig;
pub use queue::{QueueConfig, MAX_QUEUE_SIZE};
pub use telemetry::TelemetryConfig;
pub use timestep::{
    TimestepConfig, FIXED_DT_SECONDS, MAX_COMMANDS_PER_STEP, MAX_DT_SECONDS, MAX_STEPS_PER_FRAME,
};

const BASE_FILE: &str = "config/steadytick.yaml";
const ENV_PREFIX: &str = "STEADYTICK_";

/// Top-level configuration container for all steadytick components.
#[derive(Debug, Serialize, Deserialize, Validate, Default, Clone, PartialEq)]
pub struct SteadytickConfig {
    /// Fixed-step clock parameters.
    #[validate(nested)]
    #[serde(default)]
    pub timestep: TimestepConfig,

    /// Command channel sizing.
    #[validate(nested)]
    #[serde(default)]
    pub queue: QueueConfig,

    /// Host loop pacing and synthetic input.
    #[validate(nested)]
    #[serde(default)]
    pub host: HostConfig,

    /// Logging parameters.
    #[validate(nested)]
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl SteadytickConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default values
    /// 2. `config/steadytick.yaml`, if present
    /// 3. `config/<STEADYTICK_ENV>.yaml`, if present
    /// 4. `STEADYTICK_*` environment variables (`__` separates sections)
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(SteadytickConfig::default()));

        if Path::new(BASE_FILE).exists() {
            figment = figment.merge(Yaml::file(BASE_FILE));
        } else {
            debug!("{BASE_FILE} not found, using default configuration");
        }

        if let Ok(env) = std::env::var("STEADYTICK_ENV") {
            let env_file = format!("config/{}.yaml", env);
            if Path::new(&env_file).exists() {
                figment = figment.merge(Yaml::file(env_file));
            }
        }

        Self::extract(figment)
    }

    /// Load configuration from a specific file layered over the defaults.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(path)));
        }

        let figment = Figment::from(Serialized::defaults(SteadytickConfig::default()))
            .merge(Yaml::file(path));
        Self::extract(figment)
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.ensure_valid()?;
                Ok(config)
            })
    }

    /// Field validation for every section plus the cross-field invariants.
    pub fn ensure_valid(&self) -> Result<(), ConfigError> {
        self.validate()?;
        self.timestep.ensure_valid()?;
        self.host.ensure_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "steadytick-config-{}-{}.yaml",
            name,
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn full_config_validation() {
        let config = SteadytickConfig::default();
        config.ensure_valid().expect("Default config should validate");
        assert_eq!(config.queue.capacity, 32);
        assert_eq!(config.timestep.max_steps_per_frame, 5);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = SteadytickConfig::load_from_path("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn file_overrides_defaults() {
        let path = write_temp(
            "override",
            "timestep:\n  fixed_dt_seconds: 0.02\n  flush_commands_on_overload: true\nqueue:\n  capacity: 64\n",
        );
        let config = SteadytickConfig::load_from_path(&path).unwrap();
        assert_eq!(config.timestep.fixed_dt_seconds, 0.02);
        assert!(config.timestep.flush_commands_on_overload);
        assert_eq!(config.timestep.max_dt_seconds, MAX_DT_SECONDS);
        assert_eq!(config.queue.capacity, 64);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn file_breaking_ordering_is_rejected() {
        let path = write_temp(
            "ordering",
            "timestep:\n  fixed_dt_seconds: 0.1\n  max_dt_seconds: 0.05\n",
        );
        let err = SteadytickConfig::load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invariant(_)));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn environment_override() {
        std::env::set_var("STEADYTICK_HOST__PACING_MS", "4");
        let config = SteadytickConfig::load().unwrap();
        assert_eq!(config.host.pacing_ms, 4);
        std::env::remove_var("STEADYTICK_HOST__PACING_MS");
    }
}
