//! Error types for the referencing pipeline
//!
//! Every failure the batch can hit is one variant of [`ReferenceError`].
//! None of them are retried; the message names the offending file or
//! pattern so the operator can fix the input folder.

use std::fmt;
use std::io;

/// Referencing error types
#[derive(Debug)]
pub enum ReferenceError {
    /// I/O error
    IoError(io::Error),
    /// Unsupported extension or a filename no naming convention recognizes
    FormatError(String),
    /// A discovery pattern yielded no candidates
    EmptyMatchSet {
        /// Which files the pattern was discovering ("align" or "image")
        role: &'static str,
        /// The glob pattern as given
        pattern: String,
    },
    /// Candidates existed but no image/metadata pair shared an identity
    NoMatchesFound {
        /// Number of metadata candidates examined
        metadata_count: usize,
        /// Number of image candidates examined
        image_count: usize,
    },
    /// Metadata filename prefix not in the supported set
    UnrecognizedSchema(String),
    /// Malformed or incomplete metadata XML
    MetadataParseError {
        /// Metadata file name
        file: String,
        /// What was wrong with it
        reason: String,
    },
    /// Zero divisor while deriving the transform
    ArithmeticError(String),
    /// Image could not be decoded
    ImageError(String),
    /// Decoded pixels disagree with the dimensions the descriptor was built from
    DimensionMismatch {
        /// Image path
        file: String,
        /// (width, height, bands) recorded in the descriptor
        expected: (u32, u32, u16),
        /// (width, height, bands) found when decoding
        found: (u32, u32, u16),
    },
    /// Invalid configuration value
    ConfigError(String),
    /// Output raster could not be assembled
    WriteError(String),
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for ReferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceError::IoError(e) => write!(f, "I/O error: {}", e),
            ReferenceError::FormatError(msg) => write!(f, "Format error: {}", msg),
            ReferenceError::EmptyMatchSet { role, pattern } => write!(
                f,
                "No {} files found with pattern {}. Did you forget quotes around the wildcard pattern?",
                role, pattern
            ),
            ReferenceError::NoMatchesFound { metadata_count, image_count } => write!(
                f,
                "There were no matches between the {} align files and the {} image files",
                metadata_count, image_count
            ),
            ReferenceError::UnrecognizedSchema(name) => write!(
                f,
                "{} did not start with an expected metadata prefix",
                name
            ),
            ReferenceError::MetadataParseError { file, reason } => {
                write!(f, "Failed to parse metadata {}: {}", file, reason)
            },
            ReferenceError::ArithmeticError(msg) => write!(f, "Arithmetic error: {}", msg),
            ReferenceError::ImageError(msg) => write!(f, "Image error: {}", msg),
            ReferenceError::DimensionMismatch { file, expected, found } => write!(
                f,
                "{} decoded as {}x{}x{} but was described as {}x{}x{}",
                file, found.0, found.1, found.2, expected.0, expected.1, expected.2
            ),
            ReferenceError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            ReferenceError::WriteError(msg) => write!(f, "Write error: {}", msg),
            ReferenceError::GenericError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for ReferenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReferenceError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ReferenceError {
    fn from(error: io::Error) -> Self {
        ReferenceError::IoError(error)
    }
}

impl From<image::ImageError> for ReferenceError {
    fn from(error: image::ImageError) -> Self {
        ReferenceError::ImageError(error.to_string())
    }
}

/// Result type for referencing operations
pub type ReferenceResult<T> = Result<T, ReferenceError>;
