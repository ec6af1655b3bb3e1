//! Naming convention strategies
//!
//! Scanners in the wild name their output under two incompatible schemes.
//! Each scheme is a [`NamingConvention`] that decides whether it owns a file
//! name and, if so, which identity token the name carries.

use std::fmt;

use log::trace;
use regex::Regex;

use crate::config::{NamingConfig, SingleScanSettings};
use crate::errors::{ReferenceError, ReferenceResult};
use super::file_handle::FileRole;

/// Filename-derived key proving an image and its metadata describe one scan
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentityToken {
    /// Composite scans: the full stem
    Stem(String),
    /// Single scans: both ids must agree
    Scan {
        /// Text between the start and end markers
        scan_id: String,
        /// Last underscore segment with the extension stripped
        trailing_id: String,
    },
}

impl fmt::Display for IdentityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityToken::Stem(stem) => write!(f, "stem '{}'", stem),
            IdentityToken::Scan { scan_id, trailing_id } => {
                write!(f, "scan '{}' / '{}'", scan_id, trailing_id)
            },
        }
    }
}

/// Strategy for one file naming scheme
pub trait NamingConvention: fmt::Debug {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Whether this convention is responsible for `file_name`
    fn claims(&self, file_name: &str) -> bool;

    /// Extract the identity token of a claimed file name
    fn identity(&self, file_name: &str, role: FileRole) -> ReferenceResult<IdentityToken>;
}

/// Composite (crosshair / mosaic) captures, keyed by stem
#[derive(Debug, Clone)]
pub struct CompositeConvention {
    prefixes: Vec<String>,
}

impl CompositeConvention {
    pub fn new(prefixes: Vec<String>) -> Self {
        CompositeConvention { prefixes }
    }
}

impl NamingConvention for CompositeConvention {
    fn name(&self) -> &str {
        "composite"
    }

    fn claims(&self, file_name: &str) -> bool {
        self.prefixes.iter().any(|p| file_name.starts_with(p.as_str()))
    }

    fn identity(&self, file_name: &str, _role: FileRole) -> ReferenceResult<IdentityToken> {
        let stem = file_name.split('.').next().unwrap_or(file_name);
        Ok(IdentityToken::Stem(stem.to_string()))
    }
}

/// Individual scan captures, keyed by marker-delimited id plus trailing id
///
/// `ScanImage_W235_9_51_Ablation_EndPattern_191028195737.png` yields the scan
/// id `_W235_9_51_Ablation_` and the trailing id `191028195737`.
#[derive(Debug, Clone)]
pub struct SingleScanConvention {
    pattern: Regex,
    image_suffix_len: usize,
    metadata_suffix_len: usize,
}

impl SingleScanConvention {
    /// Build the convention, compiling the marker pattern
    pub fn new(settings: &SingleScanSettings) -> ReferenceResult<Self> {
        let source = format!(
            "{}(.*){}",
            regex::escape(&settings.start_marker),
            regex::escape(&settings.end_marker)
        );
        let pattern = Regex::new(&source).map_err(|e| {
            ReferenceError::ConfigError(format!("Invalid single-scan markers: {}", e))
        })?;

        Ok(SingleScanConvention {
            pattern,
            image_suffix_len: settings.image_suffix_len,
            metadata_suffix_len: settings.metadata_suffix_len,
        })
    }

    fn suffix_len(&self, role: FileRole) -> usize {
        match role {
            FileRole::Image => self.image_suffix_len,
            FileRole::Metadata => self.metadata_suffix_len,
        }
    }
}

impl NamingConvention for SingleScanConvention {
    fn name(&self) -> &str {
        "single-scan"
    }

    fn claims(&self, file_name: &str) -> bool {
        self.pattern.is_match(file_name)
    }

    fn identity(&self, file_name: &str, role: FileRole) -> ReferenceResult<IdentityToken> {
        let scan_id = self
            .pattern
            .captures(file_name)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| ReferenceError::FormatError(format!(
                "{} does not contain the single-scan markers", file_name)))?;

        let last_segment = file_name.rsplit('_').next().unwrap_or(file_name);
        let trailing_id = strip_tail(last_segment, self.suffix_len(role)).to_string();

        trace!("{} ({}) -> scan id '{}', trailing id '{}'", file_name, role.name(), scan_id, trailing_id);
        Ok(IdentityToken::Scan { scan_id, trailing_id })
    }
}

/// Drop the last `n` characters; shorter input yields an empty string
fn strip_tail(segment: &str, n: usize) -> &str {
    let keep = segment.chars().count().saturating_sub(n);
    match segment.char_indices().nth(keep) {
        Some((idx, _)) => &segment[..idx],
        None => segment,
    }
}

/// The conventions a config describes, in the order they are tried
pub fn conventions_from_config(config: &NamingConfig) -> ReferenceResult<Vec<Box<dyn NamingConvention>>> {
    Ok(vec![
        Box::new(CompositeConvention::new(config.composite_prefixes.clone())),
        Box::new(SingleScanConvention::new(&config.single_scan)?),
    ])
}
