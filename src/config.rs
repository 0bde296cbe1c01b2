//! File-based configuration for the binary.
//!
//! The library takes a [`BatchConfig`](crate::batch::BatchConfig)
//! directly; this module layers TOML file loading on top for the CLI.

use crate::analysis::DEFAULT_COVER_THRESHOLD;
use crate::batch::{BatchConfig, ConfigError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(String),
    #[error("failed to parse config file: {0}")]
    Parse(String),
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// Advisory-monitor settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Luminance threshold for the live lens-cover indicator.
    pub cover_threshold: f64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            cover_threshold: DEFAULT_COVER_THRESHOLD,
        }
    }
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Batch pipeline settings.
    #[serde(default)]
    pub batch: BatchConfig,
    /// Advisory-monitor settings.
    #[serde(default)]
    pub monitor: MonitorConfig,
}

impl AppConfig {
    /// Loads and validates configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AppConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| AppConfigError::FileRead(e.to_string()))?;
        let config: AppConfig =
            toml::from_str(&content).map_err(|e| AppConfigError::Parse(e.to_string()))?;
        config.batch.validate()?;
        Ok(config)
    }
}
