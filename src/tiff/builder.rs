//! GeoTIFF file construction
//!
//! The builder collects the single IFD of an output raster together with
//! the data of its tags and the image strip, then hands everything to
//! [`WriterBuilder`] to lay the file out.

use std::collections::BTreeMap;
use std::io::Write;

use log::debug;

use crate::decode::SampleDepth;
use crate::errors::ReferenceResult;
use crate::tiff::builders::basic_tags::BasicTagsBuilder;
use crate::tiff::builders::geo_tags::GeoTagsBuilder;
use crate::tiff::builders::writer::WriterBuilder;
use crate::tiff::compression::OutputCompression;
use crate::tiff::constants::field_types;
use crate::tiff::ifd::{IFDEntry, IFD};

/// Headroom reserved for the header, IFD and tag data when deciding on BigTIFF
const DIRECTORY_HEADROOM: u64 = 64 * 1024;

/// Shape of the raster being written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterLayout {
    pub width: u32,
    pub height: u32,
    pub bands: u16,
    pub depth: SampleDepth,
    pub compression: OutputCompression,
}

impl RasterLayout {
    /// Uncompressed size of the interleaved strip in bytes
    pub fn strip_len(&self) -> usize {
        self.width as usize * self.height as usize * self.bands as usize * self.depth.bytes()
    }
}

/// Builder for creating GeoTIFF files
pub struct GeoTiffBuilder {
    is_big_tiff: bool,
    pub ifd: IFD,
    external_data: BTreeMap<u16, Vec<u8>>,
    strip: Vec<u8>,
}

impl GeoTiffBuilder {
    /// Create a new builder
    pub fn new(is_big_tiff: bool) -> Self {
        debug!("Creating new GeoTiffBuilder (is_big_tiff: {})", is_big_tiff);
        GeoTiffBuilder {
            is_big_tiff,
            ifd: IFD::new(),
            external_data: BTreeMap::new(),
            strip: Vec::new(),
        }
    }

    /// Whether a strip of this many bytes needs 64-bit offsets
    pub fn needs_big_tiff(strip_len: u64) -> bool {
        strip_len + DIRECTORY_HEADROOM > u32::MAX as u64
    }

    /// Store values for a tag, inline when they fit the entry
    fn set_tag_data(&mut self, tag: u16, field_type: u16, count: u64, data: Vec<u8>) {
        let mut entry = IFDEntry::new(tag, field_type, count, 0);
        if entry.is_value_inline(self.is_big_tiff) {
            let mut packed = [0u8; 8];
            packed[..data.len()].copy_from_slice(&data);
            entry.value_offset = u64::from_le_bytes(packed);
            self.external_data.remove(&tag);
        } else {
            self.external_data.insert(tag, data);
        }
        self.ifd.set_entry(entry);
    }

    pub fn set_shorts(&mut self, tag: u16, values: &[u16]) {
        let data = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.set_tag_data(tag, field_types::SHORT, values.len() as u64, data);
    }

    pub fn set_long(&mut self, tag: u16, value: u32) {
        self.set_tag_data(tag, field_types::LONG, 1, value.to_le_bytes().to_vec());
    }

    pub fn set_doubles(&mut self, tag: u16, values: &[f64]) {
        let data = values.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.set_tag_data(tag, field_types::DOUBLE, values.len() as u64, data);
    }

    /// Store a NUL-terminated ASCII value
    pub fn set_ascii(&mut self, tag: u16, text: &str) {
        let mut data = text.as_bytes().to_vec();
        data.push(0);
        let count = data.len() as u64;
        self.set_tag_data(tag, field_types::ASCII, count, data);
    }

    /// Store a file offset or byte count, LONG8 in BigTIFF and LONG otherwise
    pub fn set_offset(&mut self, tag: u16, value: u64) {
        if self.is_big_tiff {
            self.set_tag_data(tag, field_types::LONG8, 1, value.to_le_bytes().to_vec());
        } else {
            self.set_tag_data(tag, field_types::LONG, 1, (value as u32).to_le_bytes().to_vec());
        }
    }

    /// Add the tags describing the raster's shape and sample layout
    pub fn add_raster_tags(&mut self, layout: &RasterLayout) {
        BasicTagsBuilder::add_raster_tags(self, layout);
    }

    /// Add georeferencing tags for a GDAL-ordered geotransform
    pub fn add_geo_tags(&mut self, geo_transform: &[f64; 6], epsg: u16) {
        GeoTagsBuilder::add_geo_tags(self, geo_transform, epsg);
    }

    /// Set the image strip, already compressed
    pub fn set_strip(&mut self, strip: Vec<u8>) {
        BasicTagsBuilder::setup_single_strip(self, strip.len() as u64);
        self.strip = strip;
    }

    pub fn external_data(&self) -> &BTreeMap<u16, Vec<u8>> {
        &self.external_data
    }

    /// Write the GeoTIFF to any sink
    pub fn write_to(&self, writer: &mut impl Write) -> ReferenceResult<()> {
        WriterBuilder::write_to(writer, self.is_big_tiff, &self.ifd, &self.external_data, &self.strip)
    }
}
