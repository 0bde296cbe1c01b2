//! Environmental validity checks on the entropy source.
//!
//! This module judges whether a sample is acceptable (dark enough to
//! trust its noise) and whether ambient conditions warrant a warning.
//! The darkness check gates the pipeline; the cover and temperature
//! monitors are advisory only.

mod cover;
mod luminance;
mod thermal;

pub use cover::{CoverMonitor, DEFAULT_COVER_THRESHOLD};
pub use luminance::{is_dark, mean_luminance, DEFAULT_DARKNESS_THRESHOLD};
pub use thermal::{
    temperature_status, NoThermal, SharedThermalFeed, TemperatureStatus, ThermalFeed,
    DEFAULT_TEMP_WARN_C,
};
