//! Final conditioning of accumulated bits.
//!
//! This module turns the corrected-bit buffer of a completed batch
//! into its terminal artifact: either a cryptographic digest rendered
//! as hex, or the untouched bitstream for external statistical testing.

mod output;

pub use output::{finalize, whiten, Artifact, HashAlgorithm, OutputMode};
