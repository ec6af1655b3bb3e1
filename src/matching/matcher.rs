//! Pairing images with their metadata files

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::NamingConfig;
use crate::errors::{ReferenceError, ReferenceResult};
use super::file_handle::{FileHandle, FileRole, MatchedPair};
use super::identifier::IdentifierExtractor;
use super::pattern::FilePattern;

/// Discovers candidate files and pairs them by identity token
#[derive(Debug)]
pub struct FileMatcher {
    extractor: IdentifierExtractor,
}

impl FileMatcher {
    pub fn new(extractor: IdentifierExtractor) -> Self {
        FileMatcher { extractor }
    }

    /// Matcher for the conventions of a naming config
    pub fn from_config(config: &NamingConfig) -> ReferenceResult<Self> {
        Ok(Self::new(IdentifierExtractor::from_config(config)?))
    }

    pub fn extractor(&self) -> &IdentifierExtractor {
        &self.extractor
    }

    /// Discover metadata and image candidates in `folder` and pair them
    ///
    /// Pairs come out metadata-major in sorted listing order, so repeated
    /// runs over the same folder give the same result.
    pub fn match_files(
        &self,
        folder: &Path,
        metadata_pattern: &str,
        image_pattern: &str,
    ) -> ReferenceResult<Vec<MatchedPair>> {
        let (metadata, images) = self.discover(folder, metadata_pattern, image_pattern)?;
        let pairs = self.pair_candidates(&metadata, &images)?;
        info!("Matched {} image(s) to {} metadata file(s) in {}",
              pairs.len(), metadata.len(), folder.display());
        Ok(pairs)
    }

    /// Find the metadata and image candidates, images minus metadata files
    pub fn discover(
        &self,
        folder: &Path,
        metadata_pattern: &str,
        image_pattern: &str,
    ) -> ReferenceResult<(Vec<FileHandle>, Vec<FileHandle>)> {
        let metadata = FilePattern::new(metadata_pattern)?.discover(folder)?;
        if metadata.is_empty() {
            return Err(ReferenceError::EmptyMatchSet {
                role: "align",
                pattern: metadata_pattern.to_string(),
            });
        }

        let metadata_paths: HashSet<PathBuf> =
            metadata.iter().map(|m| m.path().to_path_buf()).collect();
        let images: Vec<FileHandle> = FilePattern::new(image_pattern)?
            .discover(folder)?
            .into_iter()
            .filter(|img| !metadata_paths.contains(img.path()))
            .collect();
        if images.is_empty() {
            return Err(ReferenceError::EmptyMatchSet {
                role: "image",
                pattern: image_pattern.to_string(),
            });
        }

        debug!("Discovered {} metadata and {} image candidates", metadata.len(), images.len());
        Ok((metadata, images))
    }

    /// Keep every (image, metadata) combination whose tokens are equal
    pub fn pair_candidates(
        &self,
        metadata: &[FileHandle],
        images: &[FileHandle],
    ) -> ReferenceResult<Vec<MatchedPair>> {
        let metadata_tokens = metadata
            .iter()
            .map(|m| self.extractor.extract(m, FileRole::Metadata))
            .collect::<ReferenceResult<Vec<_>>>()?;
        let image_tokens = images
            .iter()
            .map(|i| self.extractor.extract(i, FileRole::Image))
            .collect::<ReferenceResult<Vec<_>>>()?;

        let mut pairs = Vec::new();
        for (meta, meta_token) in metadata.iter().zip(&metadata_tokens) {
            for (image, image_token) in images.iter().zip(&image_tokens) {
                if image_token == meta_token {
                    debug!("Matched {} to {}", image.name(), meta.name());
                    pairs.push(MatchedPair::new(image.clone(), meta.clone()));
                }
            }
        }

        if pairs.is_empty() {
            return Err(ReferenceError::NoMatchesFound {
                metadata_count: metadata.len(),
                image_count: images.len(),
            });
        }
        Ok(pairs)
    }
}
