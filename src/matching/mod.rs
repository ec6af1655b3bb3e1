//! Matching scanned images to their Align metadata files
//!
//! File names are reduced to identity tokens by pluggable naming
//! conventions; an image and a metadata file belong together exactly when
//! their tokens are equal.

mod convention;
mod file_handle;
mod identifier;
mod matcher;
mod pattern;
#[cfg(test)]
mod tests;

pub use convention::{
    conventions_from_config, CompositeConvention, IdentityToken, NamingConvention,
    SingleScanConvention,
};
pub use file_handle::{FileHandle, FileRole, MatchedPair};
pub use identifier::IdentifierExtractor;
pub use matcher::FileMatcher;
pub use pattern::FilePattern;
