//! GeoTIFF raster driver

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::decode::SampleDepth;
use crate::errors::{ReferenceError, ReferenceResult};
use crate::tiff::{GeoTiffBuilder, OutputCompression, RasterLayout};
use super::{RasterDriver, RasterHandle};

/// Writes rasters as single-strip GeoTIFFs
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoTiffDriver {
    compression: OutputCompression,
}

impl GeoTiffDriver {
    pub fn new(compression: OutputCompression) -> Self {
        GeoTiffDriver { compression }
    }
}

impl RasterDriver for GeoTiffDriver {
    type Handle = GeoTiffRaster;

    fn create_raster(
        &self,
        path: &Path,
        width: u32,
        height: u32,
        bands: u16,
        depth: SampleDepth,
    ) -> ReferenceResult<GeoTiffRaster> {
        if width == 0 || height == 0 || bands == 0 {
            return Err(ReferenceError::WriteError(format!(
                "cannot create a {}x{} raster with {} bands", width, height, bands)));
        }

        debug!("Creating {} ({}x{}x{}, {} bits)", path.display(), width, height, bands, depth.bits());

        Ok(GeoTiffRaster {
            path: path.to_path_buf(),
            layout: RasterLayout {
                width,
                height,
                bands,
                depth,
                compression: self.compression,
            },
            epsg: None,
            geo_transform: None,
            bands: vec![None; bands as usize],
        })
    }
}

/// A GeoTIFF held in memory until close
///
/// Nothing touches `path` before a successful close; the file is written
/// beside it and renamed into place.
#[derive(Debug)]
pub struct GeoTiffRaster {
    path: PathBuf,
    layout: RasterLayout,
    epsg: Option<u16>,
    geo_transform: Option<[f64; 6]>,
    bands: Vec<Option<Vec<u8>>>,
}

impl GeoTiffRaster {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Interleave the written bands into one chunky strip
    fn interleave(&self) -> ReferenceResult<Vec<u8>> {
        let planes = self
            .bands
            .iter()
            .enumerate()
            .map(|(index, plane)| {
                plane.as_deref().ok_or_else(|| ReferenceError::WriteError(format!(
                    "band {} of {} was never written", index + 1, self.path.display())))
            })
            .collect::<ReferenceResult<Vec<&[u8]>>>()?;

        let sample_bytes = self.layout.depth.bytes();
        let pixels = self.layout.width as usize * self.layout.height as usize;
        let mut strip = Vec::with_capacity(self.layout.strip_len());

        for pixel in 0..pixels {
            let start = pixel * sample_bytes;
            for plane in &planes {
                strip.extend_from_slice(&plane[start..start + sample_bytes]);
            }
        }
        Ok(strip)
    }
}

impl RasterHandle for GeoTiffRaster {
    fn set_spatial_reference(&mut self, epsg: u32) -> ReferenceResult<()> {
        let code = u16::try_from(epsg).map_err(|_| ReferenceError::WriteError(format!(
            "EPSG code {} does not fit a GeoKey", epsg)))?;
        self.epsg = Some(code);
        Ok(())
    }

    fn set_geo_transform(&mut self, geo_transform: [f64; 6]) -> ReferenceResult<()> {
        if geo_transform.iter().any(|v| !v.is_finite()) {
            return Err(ReferenceError::WriteError(format!(
                "geotransform {:?} is not finite", geo_transform)));
        }
        self.geo_transform = Some(geo_transform);
        Ok(())
    }

    fn write_band(&mut self, band: u16, data: &[u8]) -> ReferenceResult<()> {
        let expected = self.layout.width as usize * self.layout.height as usize * self.layout.depth.bytes();
        if data.len() != expected {
            return Err(ReferenceError::WriteError(format!(
                "band {} has {} bytes, expected {}", band, data.len(), expected)));
        }

        let slot = (band as usize)
            .checked_sub(1)
            .and_then(|index| self.bands.get_mut(index))
            .ok_or_else(|| ReferenceError::WriteError(format!(
                "band {} out of range 1..={}", band, self.layout.bands)))?;
        *slot = Some(data.to_vec());
        Ok(())
    }

    fn close(self) -> ReferenceResult<()> {
        let epsg = self.epsg.ok_or_else(|| ReferenceError::WriteError(format!(
            "no spatial reference set for {}", self.path.display())))?;
        let geo_transform = self.geo_transform.ok_or_else(|| ReferenceError::WriteError(format!(
            "no geotransform set for {}", self.path.display())))?;

        let strip = self.layout.compression.compress(&self.interleave()?)?;

        let mut builder = GeoTiffBuilder::new(GeoTiffBuilder::needs_big_tiff(strip.len() as u64));
        builder.add_raster_tags(&self.layout);
        builder.add_geo_tags(&geo_transform, epsg);
        builder.set_strip(strip);

        let partial = partial_path(&self.path);
        let written = File::create(&partial).map_err(ReferenceError::from).and_then(|file| {
            let mut writer = BufWriter::with_capacity(1024 * 1024, file);
            builder.write_to(&mut writer)?;
            writer.flush()?;
            Ok(())
        });

        match written.and_then(|()| fs::rename(&partial, &self.path).map_err(ReferenceError::from)) {
            Ok(()) => Ok(()),
            Err(e) => {
                if partial.exists() {
                    if let Err(cleanup) = fs::remove_file(&partial) {
                        warn!("Could not remove {}: {}", partial.display(), cleanup);
                    }
                }
                Err(e)
            }
        }
    }
}

/// `<path>.partial`, the sibling a raster is written to before the rename
fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}
