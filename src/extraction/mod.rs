//! Bit harvesting and debiasing.
//!
//! This module converts decoded pixel samples into debiased bit
//! sequences: one raw bit per pixel via channel-LSB XOR, then Von
//! Neumann correction to strip first-order bias before accumulation.

mod bits;
mod debias;
mod lsb;

pub use bits::Bits;
pub use debias::von_neumann;
pub use lsb::extract;
