//! Tests for writing descriptors

use std::path::Path;

use super::test_utils::{descriptor, FixedDecoder, RecordingDriver};
use crate::descriptor::PixelDimensions;
use crate::errors::ReferenceError;
use crate::georeference::{output_path, GeoTiffDriver, Georeferencer};
use crate::matching::FileHandle;
use crate::tiff::{tags, TagDirectory};
use crate::utils::Logger;

#[test]
fn test_writes_geotiff_named_after_image_stem() {
    let dir = tempfile::tempdir().unwrap();
    let outfolder = dir.path().join("nested").join("out");
    let decoder = FixedDecoder::rgb(200, 100);
    let driver = GeoTiffDriver::default();
    let audit = Logger::disabled();

    let georeferencer = Georeferencer::new(&decoder, &driver, 6507, &audit);
    let written = georeferencer
        .reference(&descriptor("Image_1.png", PixelDimensions::new(200, 100, 3)), &outfolder)
        .unwrap();

    assert_eq!(written, outfolder.join("Image_1.tif"));

    let mut file = std::fs::File::open(&written).unwrap();
    let directory = TagDirectory::read(&mut file).unwrap();
    assert_eq!(directory.dimensions(), Some((200, 100, 3)));
    assert_eq!(directory.epsg(), Some(6507));

    let gt = directory.geo_transform().unwrap();
    let expected = [90.0, 0.1, 0.0, 45.0, 0.0, -0.1];
    for (got, want) in gt.iter().zip(expected.iter()) {
        assert!((got - want).abs() < 1e-9, "{:?}", gt);
    }

    let strip = directory.read_strip(&mut file).unwrap();
    match &decoder.image.samples {
        crate::decode::PixelData::Eight(samples) => assert_eq!(&strip, samples),
        other => panic!("unexpected samples {:?}", other),
    }
    assert_eq!(directory.unsigned(tags::PHOTOMETRIC_INTERPRETATION), Some(2));
}

#[test]
fn test_dimension_mismatch_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let decoder = FixedDecoder::rgb(4, 4);
    let driver = GeoTiffDriver::default();
    let audit = Logger::disabled();

    let georeferencer = Georeferencer::new(&decoder, &driver, 6507, &audit);
    let err = georeferencer
        .reference(&descriptor("Image_2.png", PixelDimensions::new(8, 4, 3)), dir.path())
        .unwrap_err();

    match err {
        ReferenceError::DimensionMismatch { expected, found, .. } => {
            assert_eq!(expected, (8, 4, 3));
            assert_eq!(found, (4, 4, 3));
        },
        other => panic!("unexpected error {:?}", other),
    }
    assert!(!dir.path().join("Image_2.tif").exists());
}

#[test]
fn test_driver_calls_follow_raster_protocol() {
    let dir = tempfile::tempdir().unwrap();
    let decoder = FixedDecoder::rgb(2, 1);
    let driver = RecordingDriver::default();
    let audit = Logger::disabled();

    Georeferencer::new(&decoder, &driver, 32633, &audit)
        .reference(&descriptor("Image_3.png", PixelDimensions::new(2, 1, 3)), dir.path())
        .unwrap();

    let calls = driver.calls.borrow();
    assert_eq!(calls.len(), 7);
    assert_eq!(calls[0], "create Image_3.tif 2x1x3 8");
    assert_eq!(calls[1], "srs 32633");
    assert!(calls[2].starts_with("gt [90.0, 10.0, 0.0, 45.0, 0.0, -10.0]"));
    assert_eq!(&calls[3..], &["band 1 2", "band 2 2", "band 3 2", "close"]);
}

#[test]
fn test_audit_log_records_written_pair() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("audit.log");
    let decoder = FixedDecoder::rgb(2, 2);
    let driver = GeoTiffDriver::default();
    let audit = Logger::new(&log_path).unwrap();

    Georeferencer::new(&decoder, &driver, 6507, &audit)
        .reference(&descriptor("Image_4.png", PixelDimensions::new(2, 2, 3)), dir.path())
        .unwrap();

    let content = std::fs::read_to_string(&log_path).unwrap();
    assert!(content.starts_with("referenced Image_4.png and Image_4.Align"));
}

#[test]
fn test_output_path_uses_text_before_first_dot() {
    let image = FileHandle::new("/scans/Image_7.final.png").unwrap();
    assert_eq!(output_path(Path::new("/out"), &image), Path::new("/out/Image_7.tif"));
}
