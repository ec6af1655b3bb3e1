//! Reading source images
//!
//! Building descriptors only needs an image's dimensions; writing the
//! georeferenced raster needs its pixels split into bands.

mod decoded;
mod standard;

use std::path::Path;

use crate::descriptor::PixelDimensions;
use crate::errors::ReferenceResult;

pub use decoded::{DecodedImage, PixelData, SampleDepth};
pub use standard::StandardImageDecoder;

/// Source of pixel dimensions and pixel data
pub trait ImageDecoder {
    /// Width, height and band count of an image
    fn dimensions(&self, path: &Path) -> ReferenceResult<PixelDimensions>;

    /// Full pixel data of an image
    fn decode(&self, path: &Path) -> ReferenceResult<DecodedImage>;
}
