//! Referencer configuration
//!
//! Defaults are compiled in from `naming_conventions.toml`. A user file can
//! override any table of it, and the CLI overrides single values on top.

use std::fs;
use std::path::Path;

use lazy_static::lazy_static;
use log::{debug, warn};

use crate::errors::{ReferenceError, ReferenceResult};
use crate::tiff::compression::OutputCompression;

lazy_static! {
    static ref DEFAULT_CONFIG: ReferencerConfig = {
        let content = include_str!("../naming_conventions.toml");
        ReferencerConfig::builtin().merge_toml(content).unwrap_or_else(|e| {
            warn!("Failed to parse bundled naming conventions: {}", e);
            ReferencerConfig::builtin()
        })
    };
}

/// Settings of the single-scan naming convention
#[derive(Debug, Clone, PartialEq)]
pub struct SingleScanSettings {
    /// Filename prefix that selects the single-scan metadata schema
    pub prefix: String,
    /// Literal opening the scan id
    pub start_marker: String,
    /// Literal closing the scan id
    pub end_marker: String,
    /// Characters stripped from the trailing segment of image names
    pub image_suffix_len: usize,
    /// Characters stripped from the trailing segment of metadata names
    pub metadata_suffix_len: usize,
}

/// Filename conventions shared by the matcher and the metadata parser
#[derive(Debug, Clone, PartialEq)]
pub struct NamingConfig {
    /// Extensions (after the last dot) accepted for either role
    pub accepted_extensions: Vec<String>,
    /// Prefixes of composite (crosshair/mosaic) scans
    pub composite_prefixes: Vec<String>,
    /// Single-scan settings
    pub single_scan: SingleScanSettings,
}

/// What to do when one matched pair fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the batch at the first failure
    Abort,
    /// Record the failure and carry on with the next pair
    Continue,
}

impl FailurePolicy {
    /// Parse a policy name
    pub fn from_name(name: &str) -> ReferenceResult<Self> {
        match name.to_lowercase().as_str() {
            "abort" => Ok(FailurePolicy::Abort),
            "continue" | "keep-going" => Ok(FailurePolicy::Continue),
            _ => Err(ReferenceError::ConfigError(format!("Unknown failure policy: {}", name))),
        }
    }
}

/// Complete configuration of a referencing run
#[derive(Debug, Clone, PartialEq)]
pub struct ReferencerConfig {
    pub naming: NamingConfig,
    /// EPSG code stamped on every output raster
    pub epsg: u32,
    pub compression: OutputCompression,
    pub failure_policy: FailurePolicy,
    /// Draw a progress bar while writing rasters
    pub show_progress: bool,
}

impl Default for ReferencerConfig {
    fn default() -> Self {
        DEFAULT_CONFIG.clone()
    }
}

impl ReferencerConfig {
    /// Hard-coded fallback, identical to the bundled TOML
    fn builtin() -> Self {
        ReferencerConfig {
            naming: NamingConfig {
                accepted_extensions: ["tif", "bmp", "png", "Align", "align", "jpeg", "jpg"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                composite_prefixes: vec!["Image".to_string(), "Mosaic".to_string()],
                single_scan: SingleScanSettings {
                    prefix: "ScanImage".to_string(),
                    start_marker: "ScanImage".to_string(),
                    end_marker: "EndPattern".to_string(),
                    image_suffix_len: 4,
                    metadata_suffix_len: 6,
                },
            },
            epsg: 6507,
            compression: OutputCompression::None,
            failure_policy: FailurePolicy::Abort,
            show_progress: true,
        }
    }

    /// Load a config file layered over the defaults
    pub fn from_file(path: &Path) -> ReferenceResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ReferenceError::ConfigError(format!("Cannot read {}: {}", path.display(), e))
        })?;
        Self::default().merge_toml(&content)
    }

    /// Parse a TOML string layered over the defaults
    pub fn from_toml_str(content: &str) -> ReferenceResult<Self> {
        Self::default().merge_toml(content)
    }

    /// Override the values present in `content`, keep the rest
    pub fn merge_toml(mut self, content: &str) -> ReferenceResult<Self> {
        let value: toml::Value = content
            .parse()
            .map_err(|e| ReferenceError::ConfigError(format!("Failed to parse TOML: {}", e)))?;

        if let Some(files) = table(&value, "files")? {
            if let Some(exts) = string_list(files, "files", "accepted_extensions")? {
                self.naming.accepted_extensions = exts;
            }
        }

        if let Some(composite) = table(&value, "composite")? {
            if let Some(prefixes) = string_list(composite, "composite", "prefixes")? {
                self.naming.composite_prefixes = prefixes;
            }
        }

        if let Some(single) = table(&value, "single_scan")? {
            let settings = &mut self.naming.single_scan;
            if let Some(v) = string(single, "single_scan", "prefix")? {
                settings.prefix = v;
            }
            if let Some(v) = string(single, "single_scan", "start_marker")? {
                settings.start_marker = v;
            }
            if let Some(v) = string(single, "single_scan", "end_marker")? {
                settings.end_marker = v;
            }
            if let Some(v) = unsigned(single, "single_scan", "image_suffix_len")? {
                settings.image_suffix_len = narrow(v, "single_scan", "image_suffix_len")?;
            }
            if let Some(v) = unsigned(single, "single_scan", "metadata_suffix_len")? {
                settings.metadata_suffix_len = narrow(v, "single_scan", "metadata_suffix_len")?;
            }
        }

        if let Some(output) = table(&value, "output")? {
            if let Some(epsg) = unsigned(output, "output", "epsg")? {
                self.epsg = narrow(epsg, "output", "epsg")?;
            }
            if let Some(name) = string(output, "output", "compression")? {
                self.compression = OutputCompression::from_name(&name)?;
            }
            if let Some(name) = string(output, "output", "failure_policy")? {
                self.failure_policy = FailurePolicy::from_name(&name)?;
            }
            if let Some(progress) = output.get("progress") {
                self.show_progress = progress.as_bool().ok_or_else(|| {
                    ReferenceError::ConfigError("output.progress must be a boolean".to_string())
                })?;
            }
        }

        self.validate()?;
        debug!("Loaded referencer config: {:?}", self);
        Ok(self)
    }

    /// Reject settings no naming convention could work with
    pub fn validate(&self) -> ReferenceResult<()> {
        if self.naming.accepted_extensions.is_empty() {
            return Err(ReferenceError::ConfigError(
                "files.accepted_extensions must not be empty".to_string()));
        }
        if self.naming.composite_prefixes.iter().any(|p| p.is_empty()) {
            return Err(ReferenceError::ConfigError(
                "composite.prefixes must not contain empty strings".to_string()));
        }
        let single = &self.naming.single_scan;
        if single.prefix.is_empty() || single.start_marker.is_empty() || single.end_marker.is_empty() {
            return Err(ReferenceError::ConfigError(
                "single_scan prefix and markers must not be empty".to_string()));
        }
        if self.epsg == 0 || self.epsg > u16::MAX as u32 {
            return Err(ReferenceError::ConfigError(format!(
                "EPSG code {} does not fit a GeoTIFF key", self.epsg)));
        }
        Ok(())
    }
}

fn table<'v>(value: &'v toml::Value, name: &str) -> ReferenceResult<Option<&'v toml::value::Table>> {
    match value.get(name) {
        None => Ok(None),
        Some(v) => v.as_table().map(Some).ok_or_else(|| {
            ReferenceError::ConfigError(format!("[{}] must be a table", name))
        }),
    }
}

fn string(table: &toml::value::Table, section: &str, key: &str) -> ReferenceResult<Option<String>> {
    match table.get(key) {
        None => Ok(None),
        Some(v) => v.as_str().map(|s| Some(s.to_string())).ok_or_else(|| {
            ReferenceError::ConfigError(format!("{}.{} must be a string", section, key))
        }),
    }
}

fn unsigned(table: &toml::value::Table, section: &str, key: &str) -> ReferenceResult<Option<u64>> {
    match table.get(key) {
        None => Ok(None),
        Some(v) => match v.as_integer() {
            Some(i) if i >= 0 => Ok(Some(i as u64)),
            _ => Err(ReferenceError::ConfigError(format!(
                "{}.{} must be a non-negative integer", section, key))),
        },
    }
}

fn narrow<T: TryFrom<u64>>(value: u64, section: &str, key: &str) -> ReferenceResult<T> {
    T::try_from(value).map_err(|_| {
        ReferenceError::ConfigError(format!("{}.{} = {} is out of range", section, key, value))
    })
}

fn string_list(table: &toml::value::Table, section: &str, key: &str) -> ReferenceResult<Option<Vec<String>>> {
    let Some(v) = table.get(key) else {
        return Ok(None);
    };
    let err = || ReferenceError::ConfigError(format!("{}.{} must be a list of strings", section, key));
    let items = v.as_array().ok_or_else(err)?;
    items
        .iter()
        .map(|item| item.as_str().map(str::to_string).ok_or_else(err))
        .collect::<ReferenceResult<Vec<_>>>()
        .map(Some)
}
