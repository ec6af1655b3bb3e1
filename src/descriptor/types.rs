//! Descriptor data structures

use std::fmt;

use crate::matching::MatchedPair;
use crate::metadata::MetadataRecord;
use crate::transform::AffineTransform;

/// Pixel size and band count of a source image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelDimensions {
    /// Width in pixels
    pub source_size_x: u32,
    /// Height in pixels
    pub source_size_y: u32,
    /// Number of bands
    pub source_size_band: u16,
}

impl PixelDimensions {
    pub fn new(width: u32, height: u32, bands: u16) -> Self {
        PixelDimensions {
            source_size_x: width,
            source_size_y: height,
            source_size_band: bands,
        }
    }

    /// Total number of samples across all bands
    pub fn sample_count(&self) -> usize {
        self.source_size_x as usize * self.source_size_y as usize * self.source_size_band as usize
    }

    pub fn as_tuple(&self) -> (u32, u32, u16) {
        (self.source_size_x, self.source_size_y, self.source_size_band)
    }
}

impl fmt::Display for PixelDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} ({} bands)", self.source_size_x, self.source_size_y, self.source_size_band)
    }
}

/// A matched pair with everything needed to derive its transform
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRecord {
    pub pair: MatchedPair,
    pub metadata: MetadataRecord,
    pub dimensions: PixelDimensions,
}

/// A fully derived row, ready to be written
#[derive(Debug, Clone, PartialEq)]
pub struct ImageDescriptor {
    pub pair: MatchedPair,
    pub metadata: MetadataRecord,
    pub dimensions: PixelDimensions,
    /// Physical units per pixel along x
    pub resolution_x: f64,
    /// Physical units per pixel along y
    pub resolution_y: f64,
    pub upleftx: f64,
    pub uplefty: f64,
    pub transform: AffineTransform,
}
