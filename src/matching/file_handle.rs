//! Discovered files and matched pairs

use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::{ReferenceError, ReferenceResult};

/// Role a file plays in a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileRole {
    /// Raster image
    Image,
    /// Align (XML) sidecar
    Metadata,
}

impl FileRole {
    pub fn name(&self) -> &'static str {
        match self {
            FileRole::Image => "image",
            FileRole::Metadata => "metadata",
        }
    }
}

/// A discovered file: its path plus its basename
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileHandle {
    path: PathBuf,
    name: String,
}

impl FileHandle {
    /// Create a handle, failing for paths without a UTF-8 file name
    pub fn new(path: impl Into<PathBuf>) -> ReferenceResult<Self> {
        let path = path.into();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| ReferenceError::FormatError(format!(
                "{} has no usable file name", path.display())))?;
        Ok(FileHandle { path, name })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Basename including all extensions
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Basename up to the first dot
    pub fn stem(&self) -> &str {
        self.name.split('.').next().unwrap_or(&self.name)
    }

    /// Text after the last dot, if the name has one
    pub fn extension(&self) -> Option<&str> {
        self.name.rsplit_once('.').map(|(_, ext)| ext)
    }
}

impl fmt::Display for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// An image together with the metadata file describing the same scan
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MatchedPair {
    pub image: FileHandle,
    pub metadata: FileHandle,
}

impl MatchedPair {
    pub fn new(image: FileHandle, metadata: FileHandle) -> Self {
        MatchedPair { image, metadata }
    }
}

impl fmt::Display for MatchedPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <-> {}", self.image.name(), self.metadata.name())
    }
}
