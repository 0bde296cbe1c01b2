//! Prometheus metrics for pipeline observability.
//!
//! # Metrics Exposed
//!
//! ## Batch Metrics
//! - `darknoise_batches_completed_total` - Batches that ran to completion
//! - `darknoise_batches_failed_total` - Batches aborted by a failing sample
//! - `darknoise_samples_processed_total` - Samples that contributed bits
//! - `darknoise_corrected_bits_total` - Corrected bits across all batches
//! - `darknoise_last_batch_corrected_bits` - Corrected bits in the latest batch
//!
//! ## Advisory Metrics
//! - `darknoise_lens_covered` - Lens-cover indicator (1=covered, 0=uncovered)
//! - `darknoise_temperature_c` - Latest device temperature in Celsius
//!
//! The HTTP exporter (`/metrics`, `/health`) is behind the `metrics`
//! feature.

mod collector;
#[cfg(feature = "metrics")]
mod server;

pub use collector::{MetricsError, PipelineMetrics};
#[cfg(feature = "metrics")]
pub use server::{MetricsServer, MetricsServerConfig, ServerError};
