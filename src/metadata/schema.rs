//! Metadata schema variants and their field tables
//!
//! Align files carry their values as the ordered children of the root's
//! first element. Which child means what depends on the schema, so each
//! schema lists its fields with the child index they live at.

use std::fmt;

use crate::config::NamingConfig;

/// The XML layouts an Align file may follow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataSchema {
    /// Crosshair / mosaic captures
    Composite,
    /// Individual scan captures
    SingleScan,
    /// Filename prefix not recognized
    Unknown,
}

/// How the text of a field node is read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// One number
    Scalar,
    /// Two comma separated numbers
    Pair,
    /// `key=value` entries separated by `;`, read by position
    Settings(&'static [&'static str]),
}

/// One entry of a schema's field table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    /// Index among the children of the root's first element
    pub node: usize,
    pub kind: FieldKind,
}

pub const ROTATION: &str = "rotation";
pub const CENTER: &str = "center";
pub const SIZE: &str = "size";
pub const FOCUS: &str = "focus";
pub const SETTINGS: &str = "settings";

/// Camera settings in the order they appear in the settings block
pub const SETTING_KEYS: &[&str] = &["brightness", "contrast", "autoexposure", "exposuretime"];

const COMPOSITE_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: ROTATION, node: 0, kind: FieldKind::Scalar },
    FieldSpec { name: CENTER, node: 1, kind: FieldKind::Pair },
    FieldSpec { name: SIZE, node: 2, kind: FieldKind::Pair },
    FieldSpec { name: FOCUS, node: 3, kind: FieldKind::Scalar },
];

const SINGLE_SCAN_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: SETTINGS, node: 0, kind: FieldKind::Settings(SETTING_KEYS) },
    FieldSpec { name: ROTATION, node: 1, kind: FieldKind::Scalar },
    FieldSpec { name: CENTER, node: 2, kind: FieldKind::Pair },
    FieldSpec { name: SIZE, node: 3, kind: FieldKind::Pair },
];

impl MetadataSchema {
    /// Classify a metadata file name by its prefix
    pub fn classify(file_name: &str, naming: &NamingConfig) -> Self {
        if naming.composite_prefixes.iter().any(|p| file_name.starts_with(p.as_str())) {
            MetadataSchema::Composite
        } else if file_name.starts_with(naming.single_scan.prefix.as_str()) {
            MetadataSchema::SingleScan
        } else {
            MetadataSchema::Unknown
        }
    }

    /// Field table of the schema; empty for `Unknown`
    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            MetadataSchema::Composite => COMPOSITE_FIELDS,
            MetadataSchema::SingleScan => SINGLE_SCAN_FIELDS,
            MetadataSchema::Unknown => &[],
        }
    }
}

impl fmt::Display for MetadataSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MetadataSchema::Composite => "composite",
            MetadataSchema::SingleScan => "single-scan",
            MetadataSchema::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}
