//! Advisory temperature classification.
//!
//! Thermal noise scales with temperature, so a hot sensor actually
//! produces *more* noise, but also more non-random drift. High
//! temperature is therefore a warning surfaced alongside output, never
//! a gate on sampling.

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

/// Default warning threshold in degrees Celsius.
pub const DEFAULT_TEMP_WARN_C: f64 = 45.0;

/// Sentinel for "no reading published yet".
const UNSET: i32 = i32::MIN;

/// Advisory classification of the current device temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureStatus {
    /// Temperature at or below the warning threshold.
    Normal,
    /// Temperature above the warning threshold; noise quality may drift.
    High,
}

/// Classifies a temperature reading in tenths of a degree Celsius.
pub fn temperature_status(tenths_of_degree_c: i32, warn_c: f64) -> TemperatureStatus {
    if (tenths_of_degree_c as f64) / 10.0 > warn_c {
        TemperatureStatus::High
    } else {
        TemperatureStatus::Normal
    }
}

/// Read side of the thermal collaborator.
///
/// The collaborator pushes readings at its own cadence; the pipeline
/// only ever reads the latest value.
pub trait ThermalFeed {
    /// Returns the latest reading in tenths of a degree Celsius, or
    /// `None` if nothing has been published yet.
    fn latest_tenths(&self) -> Option<i32>;
}

/// Absent thermal collaborator: never reports a reading.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoThermal;

impl ThermalFeed for NoThermal {
    fn latest_tenths(&self) -> Option<i32> {
        None
    }
}

/// Shared latest-value cell written by the thermal collaborator.
///
/// Clone one handle into the publisher and read from another; only the
/// most recent reading is retained.
#[derive(Debug, Clone)]
pub struct SharedThermalFeed {
    cell: Arc<AtomicI32>,
}

impl SharedThermalFeed {
    /// Creates a feed with no reading published.
    pub fn new() -> Self {
        Self {
            cell: Arc::new(AtomicI32::new(UNSET)),
        }
    }

    /// Publishes a reading in tenths of a degree Celsius.
    pub fn publish(&self, tenths_of_degree_c: i32) {
        // i32::MIN is reserved as the unset sentinel.
        let value = tenths_of_degree_c.max(UNSET + 1);
        self.cell.store(value, Ordering::Relaxed);
    }
}

impl Default for SharedThermalFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl ThermalFeed for SharedThermalFeed {
    fn latest_tenths(&self) -> Option<i32> {
        match self.cell.load(Ordering::Relaxed) {
            UNSET => None,
            v => Some(v),
        }
    }
}
