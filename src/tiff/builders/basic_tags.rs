//! Basic TIFF tag strategies
//!
//! Dimensions, sample layout and the strip of an output raster.

use log::debug;

use crate::tiff::builder::{GeoTiffBuilder, RasterLayout};
use crate::tiff::constants::{
    extra_samples, photometric, planar_config, sample_format, tags, SOFTWARE_NAME,
};

/// Adds basic TIFF tags to the builder's IFD
pub struct BasicTagsBuilder;

impl BasicTagsBuilder {
    /// Add the tags every output raster carries
    pub fn add_raster_tags(builder: &mut GeoTiffBuilder, layout: &RasterLayout) {
        debug!("Adding raster tags for {}x{}x{} at {} bits",
               layout.width, layout.height, layout.bands, layout.depth.bits());

        let bands = layout.bands as usize;

        builder.set_long(tags::IMAGE_WIDTH, layout.width);
        builder.set_long(tags::IMAGE_LENGTH, layout.height);
        builder.set_shorts(tags::BITS_PER_SAMPLE, &vec![layout.depth.bits(); bands]);
        builder.set_shorts(tags::COMPRESSION, &[layout.compression.code()]);
        builder.set_shorts(tags::PHOTOMETRIC_INTERPRETATION, &[Self::photometric(layout.bands)]);
        builder.set_shorts(tags::SAMPLES_PER_PIXEL, &[layout.bands]);
        builder.set_long(tags::ROWS_PER_STRIP, layout.height);
        builder.set_shorts(tags::PLANAR_CONFIGURATION, &[planar_config::CHUNKY]);
        builder.set_shorts(tags::SAMPLE_FORMAT, &vec![sample_format::UNSIGNED; bands]);
        builder.set_ascii(tags::SOFTWARE, SOFTWARE_NAME);

        let extras = Self::extra_samples(layout.bands);
        if !extras.is_empty() {
            builder.set_shorts(tags::EXTRA_SAMPLES, &extras);
        }
    }

    /// BlackIsZero for gray and gray+alpha, RGB otherwise
    pub fn photometric(bands: u16) -> u16 {
        if bands < 3 {
            photometric::BLACK_IS_ZERO
        } else {
            photometric::RGB
        }
    }

    /// ExtraSamples values for the bands beyond the photometric's color bands
    pub fn extra_samples(bands: u16) -> Vec<u16> {
        let color_bands = if bands < 3 { 1 } else { 3 };
        let count = bands.saturating_sub(color_bands) as usize;

        let mut extras = vec![extra_samples::UNSPECIFIED; count];
        if bands == 2 || bands == 4 {
            extras[0] = extra_samples::UNASSOCIATED_ALPHA;
        }
        extras
    }

    /// Setup the single strip
    ///
    /// StripOffsets is a placeholder here, the writer fills in the
    /// position once the layout is known.
    pub fn setup_single_strip(builder: &mut GeoTiffBuilder, strip_len: u64) {
        debug!("Setting up single strip: {} bytes", strip_len);
        builder.set_offset(tags::STRIP_OFFSETS, 0);
        builder.set_offset(tags::STRIP_BYTE_COUNTS, strip_len);
    }
}
