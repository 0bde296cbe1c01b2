//! Per-run batch configuration.
//!
//! A configuration is immutable for the duration of one run and is
//! validated before any sample is acquired, so an invalid batch never
//! creates partial state.

use crate::analysis::{DEFAULT_DARKNESS_THRESHOLD, DEFAULT_TEMP_WARN_C};
use crate::conditioning::{HashAlgorithm, OutputMode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for one batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Number of samples to accumulate (must be at least 1).
    pub samples: u32,
    /// Mean-luminance threshold a sample must stay strictly below.
    pub darkness_threshold: f64,
    /// Terminal artifact: whitened digest or raw bitstream.
    pub mode: OutputMode,
    /// Digest function used in digest mode.
    pub algorithm: HashAlgorithm,
    /// Advisory temperature warning threshold in degrees Celsius.
    pub temperature_warn_c: f64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            samples: 10,
            darkness_threshold: DEFAULT_DARKNESS_THRESHOLD,
            mode: OutputMode::default(),
            algorithm: HashAlgorithm::default(),
            temperature_warn_c: DEFAULT_TEMP_WARN_C,
        }
    }
}

impl BatchConfig {
    /// Creates a digest-mode configuration for `samples` captures.
    pub fn with_samples(samples: u32) -> Self {
        Self {
            samples,
            ..Default::default()
        }
    }

    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.samples == 0 {
            return Err(ConfigError::InvalidSampleCount);
        }
        if !self.darkness_threshold.is_finite() || self.darkness_threshold <= 0.0 {
            return Err(ConfigError::InvalidThreshold);
        }
        if !self.temperature_warn_c.is_finite() {
            return Err(ConfigError::InvalidTemperatureThreshold);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("batch size must be at least 1")]
    InvalidSampleCount,
    #[error("darkness threshold must be a positive, finite luminance value")]
    InvalidThreshold,
    #[error("temperature warning threshold must be finite")]
    InvalidTemperatureThreshold,
}
