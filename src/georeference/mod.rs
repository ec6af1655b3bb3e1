//! Writing georeferenced rasters
//!
//! The [`Georeferencer`] drives a [`RasterDriver`] through the usual raster
//! API: create, set the spatial reference and geotransform, write each
//! band, close. [`GeoTiffDriver`] is the built-in driver.

mod geotiff;
mod georeferencer;
#[cfg(test)]
mod tests;

use std::path::Path;

use crate::decode::SampleDepth;
use crate::errors::ReferenceResult;

pub use geotiff::{GeoTiffDriver, GeoTiffRaster};
pub use georeferencer::{output_path, Georeferencer, OUTPUT_EXTENSION};

/// Creates output rasters
pub trait RasterDriver {
    type Handle: RasterHandle;

    /// Create a raster at `path`
    fn create_raster(
        &self,
        path: &Path,
        width: u32,
        height: u32,
        bands: u16,
        depth: SampleDepth,
    ) -> ReferenceResult<Self::Handle>;
}

/// A raster being written
pub trait RasterHandle {
    /// Set the projected CRS by EPSG code
    fn set_spatial_reference(&mut self, epsg: u32) -> ReferenceResult<()>;

    /// Set the geotransform, GDAL order
    fn set_geo_transform(&mut self, geo_transform: [f64; 6]) -> ReferenceResult<()>;

    /// Write one band, numbered from 1
    fn write_band(&mut self, band: u16, data: &[u8]) -> ReferenceResult<()>;

    /// Flush the raster to its destination
    fn close(self) -> ReferenceResult<()>;
}
