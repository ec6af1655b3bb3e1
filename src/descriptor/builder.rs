//! Joining matched pairs with metadata and pixel dimensions

use log::{debug, info};

use crate::decode::ImageDecoder;
use crate::errors::ReferenceResult;
use crate::matching::MatchedPair;
use crate::metadata::MetadataParser;
use super::types::ImageRecord;

/// Builds one [`ImageRecord`] per matched pair
pub struct ImageDescriptorBuilder<'a, D: ImageDecoder + ?Sized> {
    parser: &'a MetadataParser,
    decoder: &'a D,
}

impl<'a, D: ImageDecoder + ?Sized> ImageDescriptorBuilder<'a, D> {
    pub fn new(parser: &'a MetadataParser, decoder: &'a D) -> Self {
        ImageDescriptorBuilder { parser, decoder }
    }

    /// Parse the pair's metadata file and read the image's dimensions
    pub fn build(&self, pair: &MatchedPair) -> ReferenceResult<ImageRecord> {
        let metadata = self.parser.parse(&pair.metadata)?;
        let dimensions = self.decoder.dimensions(pair.image.path())?;
        debug!("Record for {}: {:?}, {}", pair, metadata, dimensions);

        Ok(ImageRecord {
            pair: pair.clone(),
            metadata,
            dimensions,
        })
    }

    /// Build records for every pair, stopping at the first failure
    pub fn build_all(&self, pairs: &[MatchedPair]) -> ReferenceResult<Vec<ImageRecord>> {
        info!("Reading metadata and dimensions for {} pair(s)", pairs.len());
        pairs.iter().map(|pair| self.build(pair)).collect()
    }
}
