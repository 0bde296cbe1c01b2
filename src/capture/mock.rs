//! Mock sample sources for demos and tests.

use super::{CaptureError, PixelSample, SampleSource};
use std::collections::VecDeque;
use std::time::Duration;

/// Synthetic dark-frame sensor.
///
/// Generates dim pixels whose low bits vary from frame to frame via a
/// deterministic xorshift — NOT an entropy source, only a stand-in for
/// a covered sensor so the pipeline can be exercised end to end.
#[derive(Debug)]
pub struct MockSensor {
    width: u32,
    height: u32,
    /// Per-acquisition delay imitating sensor readout.
    frame_delay: Duration,
    sequence: u64,
    noise_state: u64,
}

impl MockSensor {
    /// Creates a sensor producing `width x height` dark frames.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            frame_delay: Duration::ZERO,
            sequence: 0,
            noise_state: 0x9e37_79b9_7f4a_7c15,
        }
    }

    /// Sets a per-frame readout delay (used by the demo binary).
    pub fn with_frame_delay(mut self, delay: Duration) -> Self {
        self.frame_delay = delay;
        self
    }

    /// Returns a low-resolution luminance plane for the cover monitor.
    ///
    /// Mirrors the advisory preview stream a real sensor would feed
    /// alongside full captures: 16x16 Y-plane bytes at the same dim
    /// level as the full frames.
    pub fn preview_luma(&mut self) -> Vec<u8> {
        (0..16 * 16).map(|_| (self.next_noise() & 0x07) as u8).collect()
    }

    fn next_noise(&mut self) -> u64 {
        let mut x = self.noise_state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.noise_state = x;
        x
    }
}

impl SampleSource for MockSensor {
    async fn acquire(&mut self) -> Result<PixelSample, CaptureError> {
        if !self.frame_delay.is_zero() {
            tokio::time::sleep(self.frame_delay).await;
        }

        let pixel_count = (self.width as usize) * (self.height as usize);
        let mut rgb = Vec::with_capacity(pixel_count * 3);
        for _ in 0..pixel_count {
            let n = self.next_noise();
            // Dark-current level: every channel stays well below the
            // darkness threshold while the low bits keep churning.
            rgb.push((n & 0x07) as u8);
            rgb.push(((n >> 3) & 0x07) as u8);
            rgb.push(((n >> 6) & 0x07) as u8);
        }

        self.sequence += 1;
        Ok(PixelSample::new(rgb, self.width, self.height, self.sequence))
    }
}

/// Replays a queued script of samples and errors.
///
/// Drives the batch state machine through exact scenarios in tests:
/// each `acquire` pops the next scripted outcome, and an empty script
/// reports the source as exhausted.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    script: VecDeque<Result<PixelSample, CaptureError>>,
}

impl ScriptedSource {
    /// Creates an empty source (every acquisition fails as exhausted).
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a successful acquisition to the script.
    pub fn push_sample(&mut self, sample: PixelSample) {
        self.script.push_back(Ok(sample));
    }

    /// Appends a failed acquisition to the script.
    pub fn push_error(&mut self, error: CaptureError) {
        self.script.push_back(Err(error));
    }

    /// Returns the number of scripted outcomes remaining.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl SampleSource for ScriptedSource {
    async fn acquire(&mut self) -> Result<PixelSample, CaptureError> {
        self.script.pop_front().unwrap_or(Err(CaptureError::Exhausted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::mean_luminance;

    #[tokio::test]
    async fn test_mock_sensor_frames_are_dark_and_valid() {
        let mut sensor = MockSensor::new(32, 24);

        let sample = sensor.acquire().await.unwrap();
        assert!(sample.ensure_valid().is_ok());
        assert_eq!(sample.sequence(), 1);
        assert!(mean_luminance(&sample) < 20.0);

        let sample2 = sensor.acquire().await.unwrap();
        assert_eq!(sample2.sequence(), 2);
    }

    #[tokio::test]
    async fn test_mock_sensor_frames_differ() {
        let mut sensor = MockSensor::new(8, 8);
        let a = sensor.acquire().await.unwrap();
        let b = sensor.acquire().await.unwrap();
        assert_ne!(a.rgb(), b.rgb());
    }

    #[tokio::test]
    async fn test_scripted_source_replays_in_order() {
        let mut source = ScriptedSource::new();
        source.push_sample(PixelSample::new(vec![0u8; 3], 1, 1, 1));
        source.push_error(CaptureError::Failed("driver reset".into()));

        assert_eq!(source.remaining(), 2);
        assert!(source.acquire().await.is_ok());
        assert!(matches!(
            source.acquire().await,
            Err(CaptureError::Failed(_))
        ));
        assert!(matches!(
            source.acquire().await,
            Err(CaptureError::Exhausted)
        ));
    }
}
