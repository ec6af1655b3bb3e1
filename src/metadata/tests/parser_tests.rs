//! Tests for Align file parsing

use std::fs;

use crate::config::ReferencerConfig;
use crate::errors::ReferenceError;
use crate::matching::FileHandle;
use crate::metadata::{MetadataParser, MetadataSchema, SchemaExtras};

const COMPOSITE_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ImageAlignment>
  <Alignment>
    <Rotation>0.25</Rotation>
    <Center>100.5,-50</Center>
    <Size>20, 10</Size>
    <Focus>3.75</Focus>
  </Alignment>
</ImageAlignment>"#;

const SINGLE_SCAN_XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ScanAlignment>
  <Alignment>
    <CameraSettings>Brightness=0.5;Contrast=1.25;AutoExposure=0;ExposureTime=12.5</CameraSettings>
    <Rotation>-1.5</Rotation>
    <Center>35000.25,21000</Center>
    <Size>1200,900</Size>
  </Alignment>
</ScanAlignment>"#;

fn parser() -> MetadataParser {
    MetadataParser::new(ReferencerConfig::default().naming)
}

#[test]
fn test_classify_by_prefix() {
    let parser = parser();

    assert_eq!(parser.classify("Image_0001.Align"), MetadataSchema::Composite);
    assert_eq!(parser.classify("Mosaic_3.Align"), MetadataSchema::Composite);
    assert_eq!(parser.classify("ScanImage_A_EndPattern_1.Align"), MetadataSchema::SingleScan);
    assert_eq!(parser.classify("UnknownKind_1.Align"), MetadataSchema::Unknown);
}

#[test]
fn test_composite_document() {
    let record = MetadataParser::parse_document(
        MetadataSchema::Composite, "Image_1.Align", COMPOSITE_XML).unwrap();

    assert_eq!(record.rotation, 0.25);
    assert_eq!((record.center_x, record.center_y), (100.5, -50.0));
    assert_eq!((record.size_x, record.size_y), (20.0, 10.0));
    assert_eq!(record.extras, SchemaExtras::Composite { focus: 3.75 });
    assert_eq!(record.schema(), MetadataSchema::Composite);
    assert_eq!(record.brightness(), None);
}

#[test]
fn test_single_scan_document_reads_settings_by_position() {
    let record = MetadataParser::parse_document(
        MetadataSchema::SingleScan, "ScanImage_A_EndPattern_1.Align", SINGLE_SCAN_XML).unwrap();

    assert_eq!(record.rotation, -1.5);
    assert_eq!((record.center_x, record.center_y), (35000.25, 21000.0));
    assert_eq!((record.size_x, record.size_y), (1200.0, 900.0));
    assert_eq!(record.brightness(), Some(0.5));
    assert_eq!(record.contrast(), Some(1.25));
    assert_eq!(record.autoexposure(), Some(0.0));
    assert_eq!(record.exposure_time(), Some(12.5));
    assert_eq!(record.focus(), None);
}

#[test]
fn test_settings_keys_are_not_checked() {
    let xml = SINGLE_SCAN_XML.replace("Brightness=", "Gain=");
    let record = MetadataParser::parse_document(
        MetadataSchema::SingleScan, "ScanImage_A_EndPattern_1.Align", &xml).unwrap();

    assert_eq!(record.brightness(), Some(0.5));
}

#[test]
fn test_unknown_prefix_fails_before_reading() {
    // the file does not exist: reaching the disk would be an I/O error
    let file = FileHandle::new("/nonexistent/UnknownKind_7.Align").unwrap();

    let err = parser().parse(&file).unwrap_err();

    assert!(matches!(err, ReferenceError::UnrecognizedSchema(name) if name == "UnknownKind_7.Align"));
}

#[test]
fn test_missing_node_names_the_field() {
    let xml = COMPOSITE_XML.replace("<Focus>3.75</Focus>", "");

    let err = MetadataParser::parse_document(MetadataSchema::Composite, "Image_1.Align", &xml)
        .unwrap_err();

    match err {
        ReferenceError::MetadataParseError { file, reason } => {
            assert_eq!(file, "Image_1.Align");
            assert!(reason.contains("focus"), "{}", reason);
        },
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_bad_values_are_parse_errors() {
    let cases = [
        COMPOSITE_XML.replace("0.25", "quarter"),
        COMPOSITE_XML.replace("100.5,-50", "100.5"),
        COMPOSITE_XML.replace("<Rotation>0.25</Rotation>", "<Rotation/>"),
        COMPOSITE_XML.replace("</Alignment>", ""),
    ];

    for xml in &cases {
        let err = MetadataParser::parse_document(MetadataSchema::Composite, "Image_1.Align", xml)
            .unwrap_err();
        assert!(matches!(err, ReferenceError::MetadataParseError { .. }), "{:?}", err);
    }

    let short_settings = SINGLE_SCAN_XML.replace(";ExposureTime=12.5", "");
    let err = MetadataParser::parse_document(
        MetadataSchema::SingleScan, "ScanImage_A_EndPattern_1.Align", &short_settings).unwrap_err();
    assert!(matches!(err, ReferenceError::MetadataParseError { .. }));
}

#[test]
fn test_parse_reads_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Mosaic_12.Align");
    fs::write(&path, COMPOSITE_XML).unwrap();

    let record = parser().parse(&FileHandle::new(path).unwrap()).unwrap();

    assert_eq!(record.focus(), Some(3.75));
}
