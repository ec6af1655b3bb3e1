//! Decoded pixel buffers

use crate::descriptor::PixelDimensions;
use crate::errors::{ReferenceError, ReferenceResult};

/// Bits per sample of a decoded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleDepth {
    Eight,
    Sixteen,
}

impl SampleDepth {
    pub fn bits(&self) -> u16 {
        match self {
            SampleDepth::Eight => 8,
            SampleDepth::Sixteen => 16,
        }
    }

    pub fn bytes(&self) -> usize {
        match self {
            SampleDepth::Eight => 1,
            SampleDepth::Sixteen => 2,
        }
    }
}

/// Interleaved samples, row-major, bands fastest
#[derive(Debug, Clone, PartialEq)]
pub enum PixelData {
    Eight(Vec<u8>),
    Sixteen(Vec<u16>),
}

/// A fully decoded image
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub dimensions: PixelDimensions,
    pub samples: PixelData,
}

impl DecodedImage {
    /// Wrap interleaved samples, checking the buffer length
    pub fn new(dimensions: PixelDimensions, samples: PixelData) -> ReferenceResult<Self> {
        let expected = dimensions.sample_count();
        let found = match &samples {
            PixelData::Eight(s) => s.len(),
            PixelData::Sixteen(s) => s.len(),
        };
        if expected != found {
            return Err(ReferenceError::ImageError(format!(
                "expected {} samples for {}, got {}", expected, dimensions, found)));
        }
        Ok(DecodedImage { dimensions, samples })
    }

    pub fn depth(&self) -> SampleDepth {
        match self.samples {
            PixelData::Eight(_) => SampleDepth::Eight,
            PixelData::Sixteen(_) => SampleDepth::Sixteen,
        }
    }

    /// One band (0-based) as little-endian sample bytes
    pub fn band(&self, index: usize) -> ReferenceResult<Vec<u8>> {
        let bands = self.dimensions.source_size_band as usize;
        if index >= bands {
            return Err(ReferenceError::ImageError(format!(
                "band {} requested from a {} band image", index, bands)));
        }

        let plane = match &self.samples {
            PixelData::Eight(s) => s.iter().skip(index).step_by(bands).copied().collect(),
            PixelData::Sixteen(s) => s
                .iter()
                .skip(index)
                .step_by(bands)
                .flat_map(|v| v.to_le_bytes())
                .collect(),
        };
        Ok(plane)
    }
}
