//! Batch accumulation state machine.
//!
//! Drives the acquire, validate, extract, correct, append loop across
//! N samples. Fail-fast: a single degraded or malformed sample aborts
//! the rest of the batch, because partial aggregation would silently
//! weaken the guarantee that output bits derive from validated-dark
//! samples only.

use super::{BatchConfig, ConfigError};
use crate::analysis::{mean_luminance, temperature_status, TemperatureStatus, ThermalFeed};
use crate::capture::{CaptureError, DecodeError, SampleSource};
use crate::conditioning::{finalize, Artifact};
use crate::extraction::{extract, von_neumann, Bits};
use thiserror::Error;

/// Lifecycle of a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchState {
    /// No run started.
    Idle,
    /// A run is in flight.
    Running,
    /// The last run produced an artifact.
    Completed,
    /// The last run aborted.
    Failed,
}

/// Terminal failure of a batch run.
///
/// Each variant carries the 1-based index of the offending sample,
/// except configuration rejection, which happens before any sample is
/// acquired.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("invalid batch configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("sample {index}: capture failed: {source}")]
    Capture { index: u32, source: CaptureError },
    #[error("sample {index}: not a valid pixel grid: {source}")]
    Decode { index: u32, source: DecodeError },
    #[error(
        "sample {index} is not dark (mean luminance {mean:.1}, threshold {threshold:.1}); \
         ensure the lens is completely covered"
    )]
    NotDark {
        index: u32,
        mean: f64,
        threshold: f64,
    },
}

impl BatchError {
    /// Returns the 1-based index of the sample that caused the failure.
    pub fn sample_index(&self) -> Option<u32> {
        match self {
            BatchError::Config(_) => None,
            BatchError::Capture { index, .. }
            | BatchError::Decode { index, .. }
            | BatchError::NotDark { index, .. } => Some(*index),
        }
    }
}

/// Progress phases reported to the caller per sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchPhase {
    /// Acquisition of the sample has been requested.
    Capturing,
    /// The sample passed validation and its bits were appended.
    Processed,
}

/// One progress report, suitable for driving UI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchProgress {
    /// Current phase.
    pub phase: BatchPhase,
    /// 1-based sample index.
    pub sample: u32,
    /// Total samples in the batch.
    pub total: u32,
}

/// Successful outcome of a batch run.
#[derive(Debug, Clone)]
pub struct BatchOutput {
    /// The terminal artifact (digest or raw bitstream).
    pub artifact: Artifact,
    /// Total corrected bits that went into the artifact.
    pub corrected_bits: usize,
    /// Number of samples that contributed.
    pub samples: u32,
    /// Advisory: highest temperature classification seen during the run.
    pub temperature: TemperatureStatus,
}

/// Runs batches against a sample source.
///
/// One batch at a time: `run` takes `&mut self`, and serializing runs
/// across runners is the caller's contract. The corrected-bit buffer
/// is owned by the in-flight run and handed to conditioning only on
/// completion; a failed or cancelled run discards it unexposed.
pub struct BatchRunner {
    config: BatchConfig,
    state: BatchState,
}

impl BatchRunner {
    /// Creates an idle runner with the given configuration.
    pub fn new(config: BatchConfig) -> Self {
        Self {
            config,
            state: BatchState::Idle,
        }
    }

    /// Returns the configuration this runner applies to each batch.
    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> BatchState {
        self.state
    }

    /// Runs one batch to completion.
    ///
    /// For each sample: acquire from `source`, check structural
    /// validity and darkness, extract and debias, append to the batch
    /// buffer, and report progress. The first failing sample aborts
    /// the remainder. Cancellation is dropping the returned future:
    /// every sample is released on the way out and no partial result
    /// escapes.
    pub async fn run<S: SampleSource>(
        &mut self,
        source: &mut S,
        thermal: &dyn ThermalFeed,
        mut on_progress: impl FnMut(BatchProgress),
    ) -> Result<BatchOutput, BatchError> {
        // Rejected before any sample is acquired; the runner stays idle.
        self.config.validate()?;

        self.state = BatchState::Running;
        let total = self.config.samples;
        let threshold = self.config.darkness_threshold;
        tracing::info!(samples = total, mode = ?self.config.mode, "batch started");

        let mut buffer = Bits::new();
        let mut temperature = TemperatureStatus::Normal;

        for index in 1..=total {
            on_progress(BatchProgress {
                phase: BatchPhase::Capturing,
                sample: index,
                total,
            });

            let sample = match source.acquire().await {
                Ok(sample) => sample,
                Err(source) => return Err(self.fail(BatchError::Capture { index, source })),
            };

            if let Err(source) = sample.ensure_valid() {
                return Err(self.fail(BatchError::Decode { index, source }));
            }

            let mean = mean_luminance(&sample);
            if mean >= threshold {
                return Err(self.fail(BatchError::NotDark {
                    index,
                    mean,
                    threshold,
                }));
            }

            if let Some(tenths) = thermal.latest_tenths() {
                if temperature_status(tenths, self.config.temperature_warn_c)
                    == TemperatureStatus::High
                {
                    tracing::warn!(
                        index,
                        temperature_c = tenths as f64 / 10.0,
                        "high temperature during capture; noise may drift"
                    );
                    temperature = TemperatureStatus::High;
                }
            }

            let raw = extract(&sample);
            let corrected = von_neumann(&raw);
            tracing::debug!(
                index,
                total,
                sequence = sample.sequence(),
                raw_bits = raw.len(),
                corrected_bits = corrected.len(),
                "sample processed"
            );
            buffer.extend_from(&corrected);

            on_progress(BatchProgress {
                phase: BatchPhase::Processed,
                sample: index,
                total,
            });
        }

        self.state = BatchState::Completed;
        let corrected_bits = buffer.len();
        tracing::info!(corrected_bits, samples = total, "batch completed");

        Ok(BatchOutput {
            artifact: finalize(buffer, self.config.mode, self.config.algorithm),
            corrected_bits,
            samples: total,
            temperature,
        })
    }

    fn fail(&mut self, error: BatchError) -> BatchError {
        self.state = BatchState::Failed;
        tracing::warn!(%error, "batch failed");
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{NoThermal, SharedThermalFeed};
    use crate::capture::{CaptureError, PixelSample, ScriptedSource};
    use crate::conditioning::{whiten, HashAlgorithm, OutputMode};

    /// Builds a dark sample whose extracted bits equal `pattern`.
    ///
    /// Bit 1 becomes pixel (1, 0, 0), bit 0 becomes (0, 0, 0); both are
    /// far below any sensible darkness threshold.
    fn sample_from_pattern(pattern: &str, sequence: u64) -> PixelSample {
        let mut rgb = Vec::with_capacity(pattern.len() * 3);
        for c in pattern.chars() {
            rgb.extend_from_slice(if c == '1' { &[1, 0, 0] } else { &[0, 0, 0] });
        }
        PixelSample::new(rgb, pattern.len() as u32, 1, sequence)
    }

    fn bright_sample(pixels: usize, sequence: u64) -> PixelSample {
        PixelSample::new(vec![200u8; pixels * 3], pixels as u32, 1, sequence)
    }

    fn config(samples: u32, mode: OutputMode) -> BatchConfig {
        BatchConfig {
            samples,
            mode,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_invalid_config_rejected_before_acquisition() {
        let mut runner = BatchRunner::new(config(0, OutputMode::Digest));
        let mut source = ScriptedSource::new();
        source.push_sample(sample_from_pattern("01", 1));

        let err = runner
            .run(&mut source, &NoThermal, |_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, BatchError::Config(_)));
        assert_eq!(err.sample_index(), None);
        assert_eq!(runner.state(), BatchState::Idle);
        // No sample was consumed.
        assert_eq!(source.remaining(), 1);
    }

    #[tokio::test]
    async fn test_raw_export_concatenates_in_capture_order() {
        // Von Neumann per sample: "0110" -> "01", "1001" -> "10",
        // "0000" -> "", "01" -> "0", "10" -> "1".
        let patterns = ["0110", "1001", "0000", "01", "10"];
        let mut source = ScriptedSource::new();
        for (i, p) in patterns.iter().enumerate() {
            source.push_sample(sample_from_pattern(p, i as u64 + 1));
        }

        let mut runner = BatchRunner::new(config(5, OutputMode::Raw));
        let output = runner
            .run(&mut source, &NoThermal, |_| {})
            .await
            .unwrap();

        assert_eq!(runner.state(), BatchState::Completed);
        assert_eq!(output.samples, 5);
        assert_eq!(output.corrected_bits, 6);
        assert_eq!(
            output.artifact,
            Artifact::Bitstream {
                bits: "011001".into()
            }
        );
    }

    #[tokio::test]
    async fn test_digest_matches_whitening_of_accumulated_bits() {
        let mut source = ScriptedSource::new();
        source.push_sample(sample_from_pattern("0110", 1));
        source.push_sample(sample_from_pattern("1010", 2));

        let mut runner = BatchRunner::new(config(2, OutputMode::Digest));
        let output = runner
            .run(&mut source, &NoThermal, |_| {})
            .await
            .unwrap();

        // "0110" -> "01", "1010" -> "11": buffer is "0111".
        let expected = whiten(
            &crate::extraction::Bits::from_bitstring("0111").unwrap(),
            HashAlgorithm::Sha256,
        );
        assert_eq!(
            output.artifact,
            Artifact::Digest {
                hex: expected,
                algorithm: HashAlgorithm::Sha256
            }
        );
        assert_eq!(output.corrected_bits, 4);
    }

    #[tokio::test]
    async fn test_bright_sample_fails_fast_with_index() {
        let mut source = ScriptedSource::new();
        source.push_sample(sample_from_pattern("0110", 1));
        source.push_sample(bright_sample(4, 2));
        source.push_sample(sample_from_pattern("0110", 3));

        let mut runner = BatchRunner::new(config(3, OutputMode::Digest));
        let err = runner
            .run(&mut source, &NoThermal, |_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, BatchError::NotDark { index: 2, .. }));
        assert_eq!(err.sample_index(), Some(2));
        assert_eq!(runner.state(), BatchState::Failed);
        // Sample 3 was never acquired (fail-fast).
        assert_eq!(source.remaining(), 1);
    }

    #[tokio::test]
    async fn test_capture_error_aborts_with_index() {
        let mut source = ScriptedSource::new();
        source.push_sample(sample_from_pattern("0110", 1));
        source.push_sample(sample_from_pattern("1001", 2));
        source.push_error(CaptureError::Failed("driver reset".into()));

        let mut runner = BatchRunner::new(config(4, OutputMode::Raw));
        let err = runner
            .run(&mut source, &NoThermal, |_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, BatchError::Capture { index: 3, .. }));
        assert_eq!(runner.state(), BatchState::Failed);
    }

    #[tokio::test]
    async fn test_malformed_sample_aborts_with_index() {
        let mut source = ScriptedSource::new();
        // Buffer length does not match the stated 4x1 dimensions.
        source.push_sample(PixelSample::new(vec![0u8; 5], 4, 1, 1));

        let mut runner = BatchRunner::new(config(1, OutputMode::Digest));
        let err = runner
            .run(&mut source, &NoThermal, |_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, BatchError::Decode { index: 1, .. }));
    }

    #[tokio::test]
    async fn test_progress_reports_both_phases_in_order() {
        let mut source = ScriptedSource::new();
        source.push_sample(sample_from_pattern("01", 1));
        source.push_sample(sample_from_pattern("10", 2));

        let mut seen = Vec::new();
        let mut runner = BatchRunner::new(config(2, OutputMode::Raw));
        runner
            .run(&mut source, &NoThermal, |p| seen.push(p))
            .await
            .unwrap();

        let expected: Vec<BatchProgress> = [
            (BatchPhase::Capturing, 1),
            (BatchPhase::Processed, 1),
            (BatchPhase::Capturing, 2),
            (BatchPhase::Processed, 2),
        ]
        .into_iter()
        .map(|(phase, sample)| BatchProgress {
            phase,
            sample,
            total: 2,
        })
        .collect();
        assert_eq!(seen, expected);
    }

    #[tokio::test]
    async fn test_high_temperature_is_advisory_not_fatal() {
        let feed = SharedThermalFeed::new();
        feed.publish(512); // 51.2 C

        let mut source = ScriptedSource::new();
        source.push_sample(sample_from_pattern("0110", 1));

        let mut runner = BatchRunner::new(config(1, OutputMode::Raw));
        let output = runner.run(&mut source, &feed, |_| {}).await.unwrap();

        assert_eq!(output.temperature, TemperatureStatus::High);
        assert_eq!(runner.state(), BatchState::Completed);
    }

    #[tokio::test]
    async fn test_normal_temperature_reported() {
        let feed = SharedThermalFeed::new();
        feed.publish(231); // 23.1 C

        let mut source = ScriptedSource::new();
        source.push_sample(sample_from_pattern("0110", 1));

        let mut runner = BatchRunner::new(config(1, OutputMode::Raw));
        let output = runner.run(&mut source, &feed, |_| {}).await.unwrap();

        assert_eq!(output.temperature, TemperatureStatus::Normal);
    }

    #[tokio::test]
    async fn test_runner_reusable_after_failure() {
        let mut runner = BatchRunner::new(config(1, OutputMode::Raw));

        let mut failing = ScriptedSource::new();
        failing.push_error(CaptureError::Failed("transient".into()));
        assert!(runner.run(&mut failing, &NoThermal, |_| {}).await.is_err());
        assert_eq!(runner.state(), BatchState::Failed);

        // A retry is an entirely new batch with a fresh buffer.
        let mut ok = ScriptedSource::new();
        ok.push_sample(sample_from_pattern("0110", 1));
        let output = runner.run(&mut ok, &NoThermal, |_| {}).await.unwrap();
        assert_eq!(output.corrected_bits, 2);
        assert_eq!(runner.state(), BatchState::Completed);
    }

    #[tokio::test]
    async fn test_cancellation_discards_partial_run() {
        use std::future::pending;

        struct Stalled {
            first: Option<PixelSample>,
        }

        impl SampleSource for Stalled {
            async fn acquire(&mut self) -> Result<PixelSample, CaptureError> {
                match self.first.take() {
                    Some(sample) => Ok(sample),
                    // Second acquisition never resolves.
                    None => pending().await,
                }
            }
        }

        let mut source = Stalled {
            first: Some(sample_from_pattern("0110", 1)),
        };
        let mut runner = BatchRunner::new(config(2, OutputMode::Raw));

        // Dropping the timed-out future abandons the run mid-acquire;
        // no partial output escapes.
        let result = tokio::time::timeout(
            std::time::Duration::from_millis(20),
            runner.run(&mut source, &NoThermal, |_| {}),
        )
        .await;
        assert!(result.is_err());
    }
}
