//! GeoTIFF tag strategies
//!
//! These tags turn a plain TIFF into a GeoTIFF: the raster-to-model
//! transformation and the key directory naming the projected CRS.

use log::debug;

use crate::tiff::builder::GeoTiffBuilder;
use crate::tiff::constants::{geo_keys, tags};

/// Handles GeoTIFF tags
pub struct GeoTagsBuilder;

impl GeoTagsBuilder {
    /// Add transformation and key directory tags
    ///
    /// `geo_transform` is in GDAL order: origin x, pixel width, row rotation,
    /// origin y, column rotation, pixel height.
    pub fn add_geo_tags(builder: &mut GeoTiffBuilder, geo_transform: &[f64; 6], epsg: u16) {
        if geo_transform[2] == 0.0 && geo_transform[4] == 0.0 {
            Self::add_scale_and_tiepoint(builder, geo_transform);
        } else {
            Self::add_transformation(builder, geo_transform);
        }
        builder.set_shorts(tags::GEO_KEY_DIRECTORY_TAG, &Self::key_directory(epsg));
    }

    /// ModelPixelScale plus a tiepoint at raster (0, 0)
    fn add_scale_and_tiepoint(builder: &mut GeoTiffBuilder, gt: &[f64; 6]) {
        debug!("Georeferencing with pixel scale ({}, {}) at ({}, {})", gt[1], -gt[5], gt[0], gt[3]);

        // Pixel scale is positive downward in model space
        builder.set_doubles(tags::MODEL_PIXEL_SCALE_TAG, &[gt[1], -gt[5], 0.0]);
        builder.set_doubles(tags::MODEL_TIEPOINT_TAG, &[0.0, 0.0, 0.0, gt[0], gt[3], 0.0]);
    }

    /// Full 4x4 matrix, row-major, for rotated rasters
    fn add_transformation(builder: &mut GeoTiffBuilder, gt: &[f64; 6]) {
        debug!("Georeferencing with transformation matrix {:?}", gt);

        let matrix = [
            gt[1], gt[2], 0.0, gt[0],
            gt[4], gt[5], 0.0, gt[3],
            0.0, 0.0, 0.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ];
        builder.set_doubles(tags::MODEL_TRANSFORMATION_TAG, &matrix);
    }

    /// Key directory: header followed by (key, location, count, value) rows
    pub fn key_directory(epsg: u16) -> Vec<u16> {
        vec![
            geo_keys::KEY_DIRECTORY_VERSION, geo_keys::KEY_REVISION, geo_keys::MINOR_REVISION, 3,
            geo_keys::GT_MODEL_TYPE, 0, 1, geo_keys::MODEL_TYPE_PROJECTED,
            geo_keys::GT_RASTER_TYPE, 0, 1, geo_keys::RASTER_PIXEL_IS_AREA,
            geo_keys::PROJECTED_CS_TYPE, 0, 1, epsg,
        ]
    }
}
