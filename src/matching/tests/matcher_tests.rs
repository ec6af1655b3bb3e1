//! Tests for pairing images with metadata files

use std::collections::HashSet;

use super::test_utils::{default_matcher, folder_with};
use crate::errors::ReferenceError;
use crate::matching::{FileRole, IdentityToken};

#[test]
fn test_composite_pairs_share_stems() {
    let dir = folder_with(&["Image_1.png", "Image_1.Align", "Image_2.png", "Image_2.Align"]);
    let matcher = default_matcher();

    let pairs = matcher.match_files(dir.path(), "*.Align", "*.png").unwrap();

    assert_eq!(pairs.len(), 2);
    for pair in &pairs {
        assert_eq!(pair.image.stem(), pair.metadata.stem());
    }
}

#[test]
fn test_single_scan_pairs_agree_on_both_ids() {
    let dir = folder_with(&[
        "ScanImage_W235_9_51_Ablation_EndPattern_191028195737.png",
        "ScanImage_W235_9_51_Ablation_EndPattern_191028195737.Align",
        "ScanImage_W235_9_52_Ablation_EndPattern_191028195901.png",
        "ScanImage_W235_9_52_Ablation_EndPattern_191028195901.Align",
        "ScanImage_W235_9_52_Ablation_EndPattern_191028199999.png",
    ]);
    let matcher = default_matcher();

    let pairs = matcher.match_files(dir.path(), "*.Align", "ScanImage*.png").unwrap();

    assert_eq!(pairs.len(), 2);
    for pair in &pairs {
        let image = matcher.extractor().extract(&pair.image, FileRole::Image).unwrap();
        let meta = matcher.extractor().extract(&pair.metadata, FileRole::Metadata).unwrap();
        match (image, meta) {
            (
                IdentityToken::Scan { scan_id: a, trailing_id: b },
                IdentityToken::Scan { scan_id: c, trailing_id: d },
            ) => {
                assert_eq!(a, c);
                assert_eq!(b, d);
            },
            other => panic!("unexpected tokens {:?}", other),
        }
    }
}

#[test]
fn test_one_metadata_file_may_match_several_images() {
    let dir = folder_with(&["Mosaic_5.png", "Mosaic_5.tif", "Mosaic_5.Align"]);
    let matcher = default_matcher();

    let pairs = matcher.match_files(dir.path(), "*.Align", "Mosaic*").unwrap();

    assert_eq!(pairs.len(), 2);
    assert!(pairs.iter().all(|p| p.metadata.name() == "Mosaic_5.Align"));
}

#[test]
fn test_inclusive_image_pattern_skips_metadata_files() {
    let dir = folder_with(&["Image_1.png", "Image_1.Align"]);
    let matcher = default_matcher();

    let pairs = matcher.match_files(dir.path(), "*.Align", "*").unwrap();

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].image.name(), "Image_1.png");
}

#[test]
fn test_no_metadata_candidates_is_empty_match_set() {
    let dir = folder_with(&["Image_1.png"]);
    let matcher = default_matcher();

    let err = matcher.match_files(dir.path(), "*.Align", "*.png").unwrap_err();

    match err {
        ReferenceError::EmptyMatchSet { role, pattern } => {
            assert_eq!(role, "align");
            assert_eq!(pattern, "*.Align");
        },
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_images_that_are_only_metadata_is_empty_match_set() {
    let dir = folder_with(&["Image_1.Align", "Image_2.Align"]);
    let matcher = default_matcher();

    let err = matcher.match_files(dir.path(), "*.Align", "Image*").unwrap_err();

    assert!(matches!(err, ReferenceError::EmptyMatchSet { role: "image", .. }));
}

#[test]
fn test_unpaired_candidates_are_no_matches_found() {
    let dir = folder_with(&["Image_1.png", "Image_2.Align"]);
    let matcher = default_matcher();

    let err = matcher.match_files(dir.path(), "*.Align", "*.png").unwrap_err();

    assert!(matches!(err, ReferenceError::NoMatchesFound { metadata_count: 1, image_count: 1 }));
}

#[test]
fn test_stray_file_in_candidates_is_format_error() {
    let dir = folder_with(&["Image_1.png", "Image_1.Align", "notes.txt"]);
    let matcher = default_matcher();

    let err = matcher.match_files(dir.path(), "*.Align", "*").unwrap_err();

    assert!(matches!(err, ReferenceError::FormatError(_)));
}

#[test]
fn test_matching_is_idempotent() {
    let dir = folder_with(&[
        "Image_1.png", "Image_1.Align", "Mosaic_2.bmp", "Mosaic_2.jpg", "Mosaic_2.Align",
        "ScanImage_A_EndPattern_42.png", "ScanImage_A_EndPattern_42.align",
    ]);
    let matcher = default_matcher();

    let first = matcher.match_files(dir.path(), "*.[Aa]lign", "*").unwrap();
    let second = matcher.match_files(dir.path(), "*.[Aa]lign", "*").unwrap();

    assert_eq!(first.len(), 4);
    let first_set: HashSet<_> = first.into_iter().collect();
    let second_set: HashSet<_> = second.into_iter().collect();
    assert_eq!(first_set, second_set);
}

#[test]
fn test_patterns_may_point_into_subfolders() {
    let dir = folder_with(&["align/Image_3.Align", "raw/Image_3.tif"]);
    let matcher = default_matcher();

    let pairs = matcher.match_files(dir.path(), "align/*.Align", "raw/*.tif").unwrap();

    assert_eq!(pairs.len(), 1);
    assert!(pairs[0].image.path().ends_with("raw/Image_3.tif"));
}

#[test]
fn test_missing_folder_is_io_error() {
    let dir = folder_with(&[]);
    let matcher = default_matcher();

    let err = matcher
        .match_files(&dir.path().join("absent"), "*.Align", "*.png")
        .unwrap_err();

    assert!(matches!(err, ReferenceError::IoError(_)));
}

#[test]
fn test_recursive_patterns_search_subfolders() {
    let dir = folder_with(&[
        "Image_1.Align", "Image_1.png",
        "day2/Image_2.Align", "day2/raw/Image_2.png",
        "day2/raw/Image_9.png",
    ]);
    let matcher = default_matcher();

    let pairs = matcher.match_files(dir.path(), "**/*.Align", "**/*.png").unwrap();

    assert_eq!(pairs.len(), 2);
    assert!(pairs[0].metadata.path().ends_with("Image_1.Align"));
    assert!(pairs[0].image.path().ends_with("Image_1.png"));
    assert!(pairs[1].metadata.path().ends_with("day2/Image_2.Align"));
    assert!(pairs[1].image.path().ends_with("day2/raw/Image_2.png"));

    // without ** only the top level is searched
    let top = matcher.match_files(dir.path(), "*.Align", "*.png").unwrap();
    assert_eq!(top.len(), 1);
}
