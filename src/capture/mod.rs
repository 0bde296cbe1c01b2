//! Sample acquisition and pixel data handling.
//!
//! This module provides the seam between the pipeline and the capture
//! collaborator: the sample type handed over per acquisition, the
//! asynchronous source trait, and mock sources for demos and tests.
//! The sensor is treated as a supplier of raw pixel data, not as a
//! source of entropy directly.

mod mock;
mod sample;
mod source;

pub use mock::{MockSensor, ScriptedSource};
pub use sample::{DecodeError, PixelSample};
pub use source::{CaptureError, SampleSource};
