//! Sample acquisition seam.
//!
//! The camera subsystem itself (device lifecycle, permissions, decode)
//! lives outside this crate. What the pipeline needs from it is narrow:
//! one asynchronous acquisition per request, resolving to a decoded
//! sample or a capture error, with the sample released on every exit
//! path. Ownership gives the release guarantee for free: a
//! [`PixelSample`](super::PixelSample) is moved into the batch step and
//! dropped there whether the step succeeds, fails or is cancelled.

use super::PixelSample;
use thiserror::Error;

/// Errors that can occur while acquiring a sample.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("sensor unavailable: {0}")]
    Unavailable(String),
    #[error("capture failed: {0}")]
    Failed(String),
    #[error("sample source exhausted")]
    Exhausted,
}

/// Trait for sample sources.
///
/// Implementations resolve each `acquire` call exactly once, either
/// with a decoded sample or with an error. Dropping the returned future
/// cancels the in-flight acquisition; implementations must not leak the
/// underlying capture resource when that happens.
#[allow(async_fn_in_trait)]
pub trait SampleSource {
    /// Acquires the next sample, suspending until it is available.
    async fn acquire(&mut self) -> Result<PixelSample, CaptureError>;
}
