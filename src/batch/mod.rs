//! Batch accumulation across independent samples.
//!
//! This module owns the correct-and-append loop: it drives sample
//! acquisition, gates each sample on darkness, accumulates corrected
//! bits in capture order, and hands the buffer to conditioning when
//! the batch completes. Any per-sample failure aborts the batch.

mod config;
mod runner;

pub use config::{BatchConfig, ConfigError};
pub use runner::{
    BatchError, BatchOutput, BatchPhase, BatchProgress, BatchRunner, BatchState,
};
