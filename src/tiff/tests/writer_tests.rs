//! Tests for GeoTIFF construction and writing

use std::io::Read;

use super::test_utils::{layout, read_back, write_to_buffer, NORTH_UP};
use crate::decode::SampleDepth;
use crate::tiff::builder::GeoTiffBuilder;
use crate::tiff::builders::basic_tags::BasicTagsBuilder;
use crate::tiff::compression::OutputCompression;
use crate::tiff::constants::{field_types, tags};

#[test]
fn test_rgb_raster_round_trip() {
    let strip: Vec<u8> = (0..12).collect();
    let bytes = write_to_buffer(false, &layout(2, 2, 3, SampleDepth::Eight), &NORTH_UP, 6507, strip.clone());

    assert_eq!(&bytes[0..4], &[0x49, 0x49, 42, 0]);

    let (directory, read_strip) = read_back(bytes);
    assert!(!directory.is_big_tiff);
    assert_eq!(directory.dimensions(), Some((2, 2, 3)));
    assert_eq!(directory.get(tags::BITS_PER_SAMPLE).unwrap().as_unsigned().unwrap(), &[8, 8, 8]);
    assert_eq!(directory.unsigned(tags::PHOTOMETRIC_INTERPRETATION), Some(2));
    assert_eq!(directory.unsigned(tags::COMPRESSION), Some(1));
    assert_eq!(directory.unsigned(tags::ROWS_PER_STRIP), Some(2));
    assert!(directory.get(tags::EXTRA_SAMPLES).is_none());
    assert_eq!(read_strip, strip);
}

#[test]
fn test_geokeys_and_transform_round_trip() {
    let bytes = write_to_buffer(false, &layout(4, 2, 1, SampleDepth::Eight), &NORTH_UP, 6507, vec![0; 8]);
    let (directory, _) = read_back(bytes);

    assert_eq!(directory.epsg(), Some(6507));
    assert!(directory.get(tags::MODEL_TRANSFORMATION_TAG).is_none());
    assert_eq!(
        directory.get(tags::MODEL_PIXEL_SCALE_TAG).unwrap().as_doubles().unwrap(),
        &[0.1, 0.1, 0.0]
    );

    let gt = directory.geo_transform().unwrap();
    for (read, expected) in gt.iter().zip(NORTH_UP.iter()) {
        assert!((read - expected).abs() < 1e-12);
    }
}

#[test]
fn test_rotated_raster_uses_transformation_matrix() {
    let rotated = [10.0, 0.5, 0.25, 20.0, 0.25, -0.5];
    let bytes = write_to_buffer(false, &layout(2, 2, 1, SampleDepth::Eight), &rotated, 32633, vec![0; 4]);
    let (directory, _) = read_back(bytes);

    assert!(directory.get(tags::MODEL_PIXEL_SCALE_TAG).is_none());
    assert!(directory.get(tags::MODEL_TIEPOINT_TAG).is_none());
    assert_eq!(directory.geo_transform(), Some(rotated));
    assert_eq!(directory.epsg(), Some(32633));
}

#[test]
fn test_sixteen_bit_gray() {
    let strip: Vec<u8> = [1u16, 2, 300, 65535].iter().flat_map(|v| v.to_le_bytes()).collect();
    let bytes = write_to_buffer(false, &layout(2, 2, 1, SampleDepth::Sixteen), &NORTH_UP, 6507, strip.clone());
    let (directory, read_strip) = read_back(bytes);

    assert_eq!(directory.unsigned(tags::BITS_PER_SAMPLE), Some(16));
    assert_eq!(directory.unsigned(tags::PHOTOMETRIC_INTERPRETATION), Some(1));
    assert_eq!(directory.unsigned(tags::STRIP_BYTE_COUNTS), Some(8));
    assert_eq!(read_strip, strip);
}

#[test]
fn test_gray_alpha_packs_short_pairs_inline() {
    let bytes = write_to_buffer(false, &layout(1, 1, 2, SampleDepth::Eight), &NORTH_UP, 6507, vec![7, 255]);
    let (directory, _) = read_back(bytes);

    let bits = directory.entries.iter().find(|e| e.tag == tags::BITS_PER_SAMPLE).unwrap();
    assert_eq!(bits.count, 2);
    assert_eq!(bits.value_offset, 8 | (8 << 16));
    assert_eq!(directory.get(tags::EXTRA_SAMPLES).unwrap().as_unsigned().unwrap(), &[2]);
}

#[test]
fn test_entries_are_written_in_tag_order() {
    let bytes = write_to_buffer(false, &layout(2, 2, 4, SampleDepth::Eight), &NORTH_UP, 6507, vec![0; 16]);
    let (directory, _) = read_back(bytes);

    let written: Vec<u16> = directory.entries.iter().map(|e| e.tag).collect();
    let mut sorted = written.clone();
    sorted.sort_unstable();
    assert_eq!(written, sorted);
}

#[test]
fn test_big_tiff_layout() {
    let strip: Vec<u8> = (0..6).collect();
    let bytes = write_to_buffer(true, &layout(2, 1, 3, SampleDepth::Eight), &NORTH_UP, 6507, strip.clone());

    assert_eq!(&bytes[0..8], &[0x49, 0x49, 43, 0, 8, 0, 0, 0]);

    let (directory, read_strip) = read_back(bytes);
    assert!(directory.is_big_tiff);
    let offsets = directory.entries.iter().find(|e| e.tag == tags::STRIP_OFFSETS).unwrap();
    assert_eq!(offsets.field_type, field_types::LONG8);
    assert_eq!(directory.epsg(), Some(6507));
    assert_eq!(read_strip, strip);
}

#[test]
fn test_deflate_strip() {
    let pixels: Vec<u8> = (0..64u32).map(|i| (i / 8) as u8).collect();
    let mut raster = layout(8, 8, 1, SampleDepth::Eight);
    raster.compression = OutputCompression::Deflate;

    let compressed = raster.compression.compress(&pixels).unwrap();
    let bytes = write_to_buffer(false, &raster, &NORTH_UP, 6507, compressed);
    let (directory, strip) = read_back(bytes);

    assert_eq!(directory.unsigned(tags::COMPRESSION), Some(8));
    let mut inflated = Vec::new();
    flate2::read::ZlibDecoder::new(&strip[..]).read_to_end(&mut inflated).unwrap();
    assert_eq!(inflated, pixels);
}

#[test]
fn test_setting_a_tag_twice_replaces_it() {
    let mut builder = GeoTiffBuilder::new(false);
    builder.set_shorts(tags::BITS_PER_SAMPLE, &[8, 8, 8]);
    builder.set_shorts(tags::BITS_PER_SAMPLE, &[16]);

    assert_eq!(builder.ifd.entry_count(), 1);
    assert_eq!(builder.ifd.get_entry(tags::BITS_PER_SAMPLE).unwrap().value_offset, 16);
    assert!(builder.external_data().is_empty());
}

#[test]
fn test_photometric_and_extra_samples() {
    assert_eq!(BasicTagsBuilder::photometric(1), 1);
    assert_eq!(BasicTagsBuilder::photometric(2), 1);
    assert_eq!(BasicTagsBuilder::photometric(3), 2);
    assert!(BasicTagsBuilder::extra_samples(1).is_empty());
    assert!(BasicTagsBuilder::extra_samples(3).is_empty());
    assert_eq!(BasicTagsBuilder::extra_samples(4), vec![2]);
    assert_eq!(BasicTagsBuilder::extra_samples(5), vec![0, 0]);
}

#[test]
fn test_big_tiff_threshold() {
    assert!(!GeoTiffBuilder::needs_big_tiff(1024));
    assert!(GeoTiffBuilder::needs_big_tiff(u32::MAX as u64));
}
