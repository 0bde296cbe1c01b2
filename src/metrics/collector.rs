//! Metrics collection and registry.

use prometheus::{Encoder, Gauge, IntCounter, IntGauge, Registry, TextEncoder};
use thiserror::Error;

/// Errors that can occur during metrics operations.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// Prometheus metrics for the harvesting pipeline.
///
/// Recording methods are `&self`: the underlying collectors are
/// internally synchronized, so a shared `Arc<PipelineMetrics>` can be
/// updated from the batch loop and scraped concurrently.
pub struct PipelineMetrics {
    registry: Registry,

    // Batch metrics
    batches_completed: IntCounter,
    batches_failed: IntCounter,
    samples_processed: IntCounter,
    corrected_bits_total: IntCounter,
    last_batch_bits: IntGauge,

    // Advisory metrics
    lens_covered: IntGauge,
    temperature_c: Gauge,
}

impl PipelineMetrics {
    /// Creates a registry with all pipeline metrics registered.
    pub fn new() -> Result<Self, MetricsError> {
        let registry = Registry::new();

        let batches_completed = IntCounter::new(
            "darknoise_batches_completed_total",
            "Batches that ran to completion",
        )?;
        let batches_failed = IntCounter::new(
            "darknoise_batches_failed_total",
            "Batches aborted by a failing sample or configuration",
        )?;
        let samples_processed = IntCounter::new(
            "darknoise_samples_processed_total",
            "Samples that passed validation and contributed bits",
        )?;
        let corrected_bits_total = IntCounter::new(
            "darknoise_corrected_bits_total",
            "Corrected bits accumulated across all batches",
        )?;
        let last_batch_bits = IntGauge::new(
            "darknoise_last_batch_corrected_bits",
            "Corrected bits produced by the most recent completed batch",
        )?;
        let lens_covered = IntGauge::new(
            "darknoise_lens_covered",
            "Advisory lens-cover indicator (1=covered, 0=uncovered)",
        )?;
        let temperature_c = Gauge::new(
            "darknoise_temperature_c",
            "Latest device temperature in degrees Celsius",
        )?;

        registry.register(Box::new(batches_completed.clone()))?;
        registry.register(Box::new(batches_failed.clone()))?;
        registry.register(Box::new(samples_processed.clone()))?;
        registry.register(Box::new(corrected_bits_total.clone()))?;
        registry.register(Box::new(last_batch_bits.clone()))?;
        registry.register(Box::new(lens_covered.clone()))?;
        registry.register(Box::new(temperature_c.clone()))?;

        Ok(Self {
            registry,
            batches_completed,
            batches_failed,
            samples_processed,
            corrected_bits_total,
            last_batch_bits,
            lens_covered,
            temperature_c,
        })
    }

    /// Records one sample that passed validation.
    pub fn record_sample(&self) {
        self.samples_processed.inc();
    }

    /// Records a completed batch and its corrected bit count.
    pub fn record_batch_completed(&self, corrected_bits: usize) {
        self.batches_completed.inc();
        self.corrected_bits_total.inc_by(corrected_bits as u64);
        self.last_batch_bits.set(corrected_bits as i64);
    }

    /// Records an aborted batch.
    pub fn record_batch_failed(&self) {
        self.batches_failed.inc();
    }

    /// Updates the advisory lens-cover indicator.
    pub fn set_lens_covered(&self, covered: bool) {
        self.lens_covered.set(covered as i64);
    }

    /// Updates the latest temperature reading.
    pub fn set_temperature_c(&self, celsius: f64) {
        self.temperature_c.set(celsius);
    }

    /// Returns the underlying Prometheus registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encodes all metrics in Prometheus text format.
    pub fn encode(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
