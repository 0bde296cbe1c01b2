//! Per-pixel bit harvesting.
//!
//! The least significant bit of each color channel is where sensor
//! dark-current and thermal noise ends up once the lens is obstructed.
//! XORing the three channel LSBs cancels noise components common to
//! all channels and yields one bit per pixel.

use super::Bits;
use crate::capture::PixelSample;

/// Extracts one raw bit per pixel from a sample.
///
/// The output bit for each pixel is `lsb(R) ^ lsb(G) ^ lsb(B)`, in
/// scan order. Output length is always `width * height`. Pure function:
/// no state, no error conditions.
pub fn extract(sample: &PixelSample) -> Bits {
    let mut bits = Bits::with_capacity(sample.pixel_count());
    for px in sample.pixels() {
        bits.push((px[0] ^ px[1] ^ px[2]) & 1);
    }
    bits
}
