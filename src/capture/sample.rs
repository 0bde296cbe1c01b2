//! Pixel sample type representing one decoded capture.

use thiserror::Error;

/// Errors raised when a received sample is not a valid pixel grid.
#[derive(Debug, Clone, Error)]
pub enum DecodeError {
    #[error("sample has zero dimensions ({width}x{height})")]
    ZeroDimensions { width: u32, height: u32 },
    #[error("pixel buffer holds {actual} bytes, expected {expected} for {width}x{height} rgb")]
    SizeMismatch {
        actual: usize,
        expected: usize,
        width: u32,
        height: u32,
    },
}

/// A single decoded sample from the sensor.
///
/// Pixels are packed RGB8 triples in row-major scan order. The alpha
/// channel, if the sensor produced one, is stripped before this type
/// is constructed. Samples are ephemeral: each one is consumed by a
/// single batch step and dropped.
#[derive(Clone)]
pub struct PixelSample {
    /// Packed RGB data, 3 bytes per pixel.
    rgb: Vec<u8>,
    /// Sample width in pixels.
    width: u32,
    /// Sample height in pixels.
    height: u32,
    /// Monotonic sequence number assigned by the source.
    sequence: u64,
}

impl PixelSample {
    /// Creates a sample from packed RGB data.
    pub fn new(rgb: Vec<u8>, width: u32, height: u32, sequence: u64) -> Self {
        Self {
            rgb,
            width,
            height,
            sequence,
        }
    }

    /// Returns the packed RGB data.
    #[inline]
    pub fn rgb(&self) -> &[u8] {
        &self.rgb
    }

    /// Returns the sample width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the sample height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the sequence number.
    #[inline]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Returns the total number of pixels (width * height).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// Iterates over pixels as `[r, g, b]` triples in scan order.
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.rgb.chunks_exact(3)
    }

    /// Checks that the buffer length matches the stated dimensions.
    pub fn ensure_valid(&self) -> Result<(), DecodeError> {
        if self.width == 0 || self.height == 0 {
            return Err(DecodeError::ZeroDimensions {
                width: self.width,
                height: self.height,
            });
        }
        let expected = self.pixel_count() * 3;
        if self.rgb.len() != expected {
            return Err(DecodeError::SizeMismatch {
                actual: self.rgb.len(),
                expected,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for PixelSample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelSample")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("sequence", &self.sequence)
            .field("rgb_bytes", &self.rgb.len())
            .finish()
    }
}
