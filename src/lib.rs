//! Darknoise
//!
//! Derives unpredictable bit sequences from the pixel noise of an
//! optical sensor whose aperture is deliberately obstructed, then
//! conditions those bits into usable random output.
//!
//! # Architecture
//!
//! The pipeline runs one sample at a time, strictly in order:
//!
//! ```text
//! capture → darkness gate → extraction → debiasing → accumulation
//!                                                        ↓
//!                                     conditioning (digest or raw export)
//! ```
//!
//! # Design Principles
//!
//! - **Fail-fast**: one degraded or malformed sample aborts the batch
//! - **Validated-dark only**: output bits derive solely from samples
//!   that passed the darkness gate
//! - **Advisory, not gating**: cover and temperature monitors inform
//!   the presentation layer but never block sampling
//! - **No cryptographic claims**: this is not a certified hardware RNG
//!   and makes no formal entropy-rate guarantee
//!
//! # Example
//!
//! ```no_run
//! use darknoise::{
//!     analysis::NoThermal,
//!     batch::{BatchConfig, BatchRunner},
//!     capture::MockSensor,
//! };
//!
//! # async fn demo() -> Result<(), darknoise::batch::BatchError> {
//! let mut sensor = MockSensor::new(64, 48);
//! let mut runner = BatchRunner::new(BatchConfig::with_samples(5));
//!
//! let output = runner
//!     .run(&mut sensor, &NoThermal, |p| {
//!         println!("sample {}/{}: {:?}", p.sample, p.total, p.phase);
//!     })
//!     .await?;
//!
//! println!("{}", output.artifact.summary());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod batch;
pub mod capture;
pub mod conditioning;
pub mod config;
pub mod extraction;
pub mod metrics;

// Re-export commonly used types at crate root
pub use batch::{BatchConfig, BatchError, BatchOutput, BatchRunner, BatchState};
pub use capture::{CaptureError, MockSensor, PixelSample, SampleSource};
pub use conditioning::{Artifact, HashAlgorithm, OutputMode};
pub use extraction::Bits;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
