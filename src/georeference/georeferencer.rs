//! Writing one descriptor as a georeferenced raster

use std::fs;
use std::path::{Path, PathBuf};

use log::info;

use crate::decode::ImageDecoder;
use crate::descriptor::ImageDescriptor;
use crate::errors::{ReferenceError, ReferenceResult};
use crate::matching::FileHandle;
use crate::utils::Logger;
use super::{RasterDriver, RasterHandle};

/// Extension of written rasters
pub const OUTPUT_EXTENSION: &str = "tif";

/// `<outfolder>/<image stem>.tif`
pub fn output_path(outfolder: &Path, image: &FileHandle) -> PathBuf {
    outfolder.join(format!("{}.{}", image.stem(), OUTPUT_EXTENSION))
}

/// Writes descriptors through a decoder and a raster driver
pub struct Georeferencer<'a, D: ImageDecoder + ?Sized, R: RasterDriver> {
    decoder: &'a D,
    driver: &'a R,
    epsg: u32,
    audit: &'a Logger,
}

impl<'a, D: ImageDecoder + ?Sized, R: RasterDriver> Georeferencer<'a, D, R> {
    pub fn new(decoder: &'a D, driver: &'a R, epsg: u32, audit: &'a Logger) -> Self {
        Georeferencer { decoder, driver, epsg, audit }
    }

    /// Write `descriptor` into `outfolder`, returning the raster's path
    ///
    /// The folder is created when missing and an existing raster of the
    /// same name is overwritten.
    pub fn reference(&self, descriptor: &ImageDescriptor, outfolder: &Path) -> ReferenceResult<PathBuf> {
        let pair = &descriptor.pair;
        info!("referencing {} and {}", pair.image.name(), pair.metadata.name());

        if !outfolder.is_dir() {
            info!("Creating output folder {}", outfolder.display());
            fs::create_dir_all(outfolder)?;
        }
        let output = output_path(outfolder, &pair.image);

        let image = self.decoder.decode(pair.image.path())?;
        if image.dimensions != descriptor.dimensions {
            return Err(ReferenceError::DimensionMismatch {
                file: pair.image.path().display().to_string(),
                expected: descriptor.dimensions.as_tuple(),
                found: image.dimensions.as_tuple(),
            });
        }

        let (width, height, bands) = descriptor.dimensions.as_tuple();
        let mut raster = self.driver.create_raster(&output, width, height, bands, image.depth())?;
        raster.set_spatial_reference(self.epsg)?;
        raster.set_geo_transform(descriptor.transform.to_geo_transform())?;
        for band in 1..=bands {
            raster.write_band(band, &image.band(band as usize - 1)?)?;
        }
        raster.close()?;

        info!("Wrote {}", output.display());
        self.audit.referenced(pair.image.name(), pair.metadata.name(), &output);
        Ok(output)
    }
}
