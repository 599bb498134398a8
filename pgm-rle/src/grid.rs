//! In-memory grayscale grid

use crate::{PgmError, Result};

/// Rectangular grid of byte samples plus image metadata
///
/// Samples are stored row-major: index = `row * width + col`.
/// A constructed grid always holds exactly `width * height` samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    max_value: u32,
    samples: Vec<u8>,
}

impl Grid {
    /// Build a grid, checking that the sample buffer matches the dimensions
    pub fn new(width: usize, height: usize, max_value: u32, samples: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(PgmError::ZeroDimensions);
        }
        let expected = sample_count(width, height)?;
        if samples.len() != expected {
            return Err(PgmError::MissingSamples {
                expected,
                found: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            max_value,
            samples,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Declared maximum sample value from the header
    pub fn max_value(&self) -> u32 {
        self.max_value
    }

    /// All samples in row-major order
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Number of samples (`width * height`)
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false for a constructed grid
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Iterate over rows, each exactly `width` samples long
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.samples.chunks_exact(self.width)
    }
}

/// `width * height`, rejecting products that overflow `usize`
pub(crate) fn sample_count(width: usize, height: usize) -> Result<usize> {
    width
        .checked_mul(height)
        .ok_or_else(|| PgmError::InvalidDimensions(format!("{width} {height}")))
}
