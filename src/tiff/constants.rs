//! TIFF and GeoTIFF constants used when writing rasters

/// TIFF header constants
pub mod header {
    /// Standard TIFF version number (42)
    pub const TIFF_VERSION: u16 = 42;

    /// BigTIFF version number (43)
    pub const BIG_TIFF_VERSION: u16 = 43;

    /// "II" byte order marker for little-endian
    pub const LITTLE_ENDIAN_MARKER: [u8; 2] = [0x49, 0x49];

    /// BigTIFF offset size (8 bytes)
    pub const BIGTIFF_OFFSET_SIZE: u16 = 8;
}

/// Field types as defined in the TIFF spec
pub mod field_types {
    pub const ASCII: u16 = 2;      // 8-bit byte containing ASCII character
    pub const SHORT: u16 = 3;      // 16-bit unsigned integer
    pub const LONG: u16 = 4;       // 32-bit unsigned integer
    pub const DOUBLE: u16 = 12;    // Double precision IEEE floating point
    pub const LONG8: u16 = 16;     // BigTIFF 64-bit unsigned integer

    /// Bytes taken by one value of a field type
    pub fn size(field_type: u16) -> usize {
        match field_type {
            ASCII => 1,
            SHORT => 2,
            LONG => 4,
            DOUBLE | LONG8 => 8,
            _ => 1,
        }
    }
}

/// Tags written by the GeoTIFF driver
pub mod tags {
    pub const IMAGE_WIDTH: u16 = 256;
    pub const IMAGE_LENGTH: u16 = 257;
    pub const BITS_PER_SAMPLE: u16 = 258;
    pub const COMPRESSION: u16 = 259;
    pub const PHOTOMETRIC_INTERPRETATION: u16 = 262;
    pub const STRIP_OFFSETS: u16 = 273;
    pub const SAMPLES_PER_PIXEL: u16 = 277;
    pub const ROWS_PER_STRIP: u16 = 278;
    pub const STRIP_BYTE_COUNTS: u16 = 279;
    pub const PLANAR_CONFIGURATION: u16 = 284;
    pub const SOFTWARE: u16 = 305;
    pub const EXTRA_SAMPLES: u16 = 338;
    pub const SAMPLE_FORMAT: u16 = 339;

    // GeoTIFF tags
    pub const MODEL_PIXEL_SCALE_TAG: u16 = 33550;   // Pixel size in map units
    pub const MODEL_TIEPOINT_TAG: u16 = 33922;      // Links raster to world coordinates
    pub const MODEL_TRANSFORMATION_TAG: u16 = 34264; // Full 4x4 raster to model matrix
    pub const GEO_KEY_DIRECTORY_TAG: u16 = 34735;   // GeoTIFF keys structure

    /// Name of a tag for log output
    pub fn name(tag: u16) -> &'static str {
        match tag {
            IMAGE_WIDTH => "ImageWidth",
            IMAGE_LENGTH => "ImageLength",
            BITS_PER_SAMPLE => "BitsPerSample",
            COMPRESSION => "Compression",
            PHOTOMETRIC_INTERPRETATION => "PhotometricInterpretation",
            STRIP_OFFSETS => "StripOffsets",
            SAMPLES_PER_PIXEL => "SamplesPerPixel",
            ROWS_PER_STRIP => "RowsPerStrip",
            STRIP_BYTE_COUNTS => "StripByteCounts",
            PLANAR_CONFIGURATION => "PlanarConfiguration",
            SOFTWARE => "Software",
            EXTRA_SAMPLES => "ExtraSamples",
            SAMPLE_FORMAT => "SampleFormat",
            MODEL_PIXEL_SCALE_TAG => "ModelPixelScaleTag",
            MODEL_TIEPOINT_TAG => "ModelTiepointTag",
            MODEL_TRANSFORMATION_TAG => "ModelTransformationTag",
            GEO_KEY_DIRECTORY_TAG => "GeoKeyDirectoryTag",
            _ => "Unknown",
        }
    }
}

/// Compression codes
pub mod compression {
    pub const NONE: u16 = 1;
    pub const DEFLATE: u16 = 8;           // Adobe Deflate (zlib)
    pub const ZSTD: u16 = 14;
}

/// Photometric interpretation values
pub mod photometric {
    pub const BLACK_IS_ZERO: u16 = 1;
    pub const RGB: u16 = 2;
}

/// Planar configuration values
pub mod planar_config {
    pub const CHUNKY: u16 = 1;            // Components stored interleaved (RGBRGBRGB)
}

/// Sample format values
pub mod sample_format {
    pub const UNSIGNED: u16 = 1;
}

/// Extra sample values
pub mod extra_samples {
    pub const UNSPECIFIED: u16 = 0;
    pub const UNASSOCIATED_ALPHA: u16 = 2;
}

/// GeoKey ids and values
pub mod geo_keys {
    pub const KEY_DIRECTORY_VERSION: u16 = 1;
    pub const KEY_REVISION: u16 = 1;
    pub const MINOR_REVISION: u16 = 0;

    pub const GT_MODEL_TYPE: u16 = 1024;      // GTModelTypeGeoKey
    pub const GT_RASTER_TYPE: u16 = 1025;     // GTRasterTypeGeoKey
    pub const PROJECTED_CS_TYPE: u16 = 3072;  // ProjectedCSTypeGeoKey

    pub const MODEL_TYPE_PROJECTED: u16 = 1;
    pub const RASTER_PIXEL_IS_AREA: u16 = 1;
}

/// Name written to the Software tag
pub const SOFTWARE_NAME: &str = concat!("scanref ", env!("CARGO_PKG_VERSION"));
