//! Decoder backed by the `image` crate

use std::path::Path;

use image::{DynamicImage, ImageDecoder as _, ImageReader};
use log::debug;

use crate::descriptor::PixelDimensions;
use crate::errors::ReferenceResult;
use super::decoded::{DecodedImage, PixelData};
use super::ImageDecoder;

/// Decodes TIFF, PNG, BMP and JPEG through the `image` crate
///
/// The format is sniffed from the content, so a mislabelled extension still
/// decodes. Float images are reduced to 16 bit.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardImageDecoder;

impl StandardImageDecoder {
    pub fn new() -> Self {
        StandardImageDecoder
    }

    fn open(path: &Path) -> ReferenceResult<DynamicImage> {
        Ok(ImageReader::open(path)?.with_guessed_format()?.decode()?)
    }

    fn split(image: DynamicImage) -> (u16, PixelData) {
        match image {
            DynamicImage::ImageLuma8(buf) => (1, PixelData::Eight(buf.into_raw())),
            DynamicImage::ImageLumaA8(buf) => (2, PixelData::Eight(buf.into_raw())),
            DynamicImage::ImageRgb8(buf) => (3, PixelData::Eight(buf.into_raw())),
            DynamicImage::ImageRgba8(buf) => (4, PixelData::Eight(buf.into_raw())),
            DynamicImage::ImageLuma16(buf) => (1, PixelData::Sixteen(buf.into_raw())),
            DynamicImage::ImageLumaA16(buf) => (2, PixelData::Sixteen(buf.into_raw())),
            DynamicImage::ImageRgb16(buf) => (3, PixelData::Sixteen(buf.into_raw())),
            DynamicImage::ImageRgba16(buf) => (4, PixelData::Sixteen(buf.into_raw())),
            other @ DynamicImage::ImageRgb32F(_) => (3, PixelData::Sixteen(other.to_rgb16().into_raw())),
            other => (4, PixelData::Sixteen(other.to_rgba16().into_raw())),
        }
    }
}

impl ImageDecoder for StandardImageDecoder {
    /// Reads the header only; pixels stay on disk
    fn dimensions(&self, path: &Path) -> ReferenceResult<PixelDimensions> {
        let decoder = ImageReader::open(path)?.with_guessed_format()?.into_decoder()?;
        let (width, height) = decoder.dimensions();
        let dims = PixelDimensions::new(width, height, decoder.color_type().channel_count() as u16);
        debug!("{} is {}", path.display(), dims);
        Ok(dims)
    }

    fn decode(&self, path: &Path) -> ReferenceResult<DecodedImage> {
        let image = Self::open(path)?;
        let (width, height) = (image.width(), image.height());
        let (bands, samples) = Self::split(image);
        DecodedImage::new(PixelDimensions::new(width, height, bands), samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn noisy_png(path: &Path) {
        RgbImage::from_fn(64, 48, |x, y| Rgb([(x * 31 + y * 17) as u8, (x ^ y) as u8, (x * y) as u8]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn dimensions_match_decode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.png");
        noisy_png(&path);

        let decoder = StandardImageDecoder::new();
        let dims = decoder.dimensions(&path).unwrap();
        assert_eq!(dims, PixelDimensions::new(64, 48, 3));
        assert_eq!(decoder.decode(&path).unwrap().dimensions, dims);
    }

    #[test]
    fn dimensions_read_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("truncated.png");
        noisy_png(&path);
        let bytes = std::fs::read(&path).unwrap();
        std::fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();

        let decoder = StandardImageDecoder::new();
        assert_eq!(decoder.dimensions(&path).unwrap(), PixelDimensions::new(64, 48, 3));
        assert!(decoder.decode(&path).is_err());
    }
}
