//! Identity token extraction

use log::debug;

use crate::config::NamingConfig;
use crate::errors::{ReferenceError, ReferenceResult};
use super::convention::{conventions_from_config, IdentityToken, NamingConvention};
use super::file_handle::{FileHandle, FileRole};

/// Turns file names into identity tokens
///
/// The extension is checked first, then the conventions are tried in order
/// and the first one claiming the name produces the token.
#[derive(Debug)]
pub struct IdentifierExtractor {
    accepted_extensions: Vec<String>,
    conventions: Vec<Box<dyn NamingConvention>>,
}

impl IdentifierExtractor {
    /// Extractor for the conventions of a naming config
    pub fn from_config(config: &NamingConfig) -> ReferenceResult<Self> {
        Ok(Self::with_conventions(
            config.accepted_extensions.clone(),
            conventions_from_config(config)?,
        ))
    }

    /// Extractor with caller-supplied conventions
    pub fn with_conventions(
        accepted_extensions: Vec<String>,
        conventions: Vec<Box<dyn NamingConvention>>,
    ) -> Self {
        IdentifierExtractor { accepted_extensions, conventions }
    }

    /// Fail unless the file carries an accepted extension
    pub fn check_extension(&self, file: &FileHandle) -> ReferenceResult<()> {
        match file.extension() {
            Some(ext) if self.accepted_extensions.iter().any(|a| a == ext) => Ok(()),
            _ => Err(ReferenceError::FormatError(format!(
                "{} does not have an accepted format: {:?}",
                file.name(), self.accepted_extensions
            ))),
        }
    }

    /// Extract the identity token of a file in the given role
    pub fn extract(&self, file: &FileHandle, role: FileRole) -> ReferenceResult<IdentityToken> {
        self.check_extension(file)?;

        let convention = self
            .conventions
            .iter()
            .find(|c| c.claims(file.name()))
            .ok_or_else(|| ReferenceError::FormatError(format!(
                "{} does not follow any known naming convention", file.name())))?;

        let token = convention.identity(file.name(), role)?;
        debug!("{} {} -> {} ({})", role.name(), file.name(), token, convention.name());
        Ok(token)
    }
}
