//! Batch facade over the whole pipeline
//!
//! A [`Referencer`] matches the files of an input folder, reads each
//! pair's metadata and pixel size, derives the transform and writes one
//! georeferenced raster per pair.

use std::fmt;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::config::{FailurePolicy, ReferencerConfig};
use crate::decode::{ImageDecoder, StandardImageDecoder};
use crate::descriptor::{ImageDescriptor, ImageDescriptorBuilder, ImageRecord};
use crate::errors::{ReferenceError, ReferenceResult};
use crate::georeference::{GeoTiffDriver, Georeferencer, RasterDriver};
use crate::matching::{FileMatcher, MatchedPair};
use crate::metadata::MetadataParser;
use crate::transform::AffineTransformBuilder;
use crate::utils::{Logger, ProgressTracker};

/// Default glob for Align files
pub const DEFAULT_METADATA_PATTERN: &str = "*.Align";
/// Default glob for scan images
pub const DEFAULT_IMAGE_PATTERN: &str = "ScanImage*.png";

/// A pair that could not be referenced
#[derive(Debug)]
pub struct RowFailure {
    pub pair: MatchedPair,
    pub error: ReferenceError,
}

/// Outcome of a batch
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Number of matched pairs
    pub matched: usize,
    /// Rasters written, in pair order
    pub written: Vec<PathBuf>,
    /// Pairs skipped under [`FailurePolicy::Continue`]
    pub failures: Vec<RowFailure>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} matched, {} written, {} failed",
               self.matched, self.written.len(), self.failures.len())?;
        for failure in &self.failures {
            write!(f, "\n  {}: {}", failure.pair, failure.error)?;
        }
        Ok(())
    }
}

/// Matches, describes and georeferences scans
pub struct Referencer<D: ImageDecoder = StandardImageDecoder, R: RasterDriver = GeoTiffDriver> {
    config: ReferencerConfig,
    matcher: FileMatcher,
    parser: MetadataParser,
    decoder: D,
    driver: R,
    audit: Logger,
}

impl Referencer<StandardImageDecoder, GeoTiffDriver> {
    /// Referencer using the `image` crate decoder and the GeoTIFF driver
    pub fn new(config: ReferencerConfig) -> ReferenceResult<Self> {
        let driver = GeoTiffDriver::new(config.compression);
        Self::with_collaborators(config, StandardImageDecoder::new(), driver)
    }
}

impl<D: ImageDecoder, R: RasterDriver> Referencer<D, R> {
    /// Referencer with a custom decoder and raster driver
    pub fn with_collaborators(config: ReferencerConfig, decoder: D, driver: R) -> ReferenceResult<Self> {
        config.validate()?;
        let matcher = FileMatcher::from_config(&config.naming)?;
        let parser = MetadataParser::new(config.naming.clone());

        Ok(Referencer {
            config,
            matcher,
            parser,
            decoder,
            driver,
            audit: Logger::disabled(),
        })
    }

    /// Record written and skipped pairs to `audit`
    pub fn with_audit_log(mut self, audit: Logger) -> Self {
        self.audit = audit;
        self
    }

    pub fn config(&self) -> &ReferencerConfig {
        &self.config
    }

    /// Pair the images and Align files of `infolder`
    pub fn match_files(
        &self,
        infolder: &Path,
        metadata_pattern: &str,
        image_pattern: &str,
    ) -> ReferenceResult<Vec<MatchedPair>> {
        self.matcher.match_files(infolder, metadata_pattern, image_pattern)
    }

    /// Read metadata and pixel dimensions for every pair
    pub fn build_records(&self, pairs: &[MatchedPair]) -> ReferenceResult<Vec<ImageRecord>> {
        ImageDescriptorBuilder::new(&self.parser, &self.decoder).build_all(pairs)
    }

    /// Records with their transforms derived
    pub fn build_descriptors(&self, pairs: &[MatchedPair]) -> ReferenceResult<Vec<ImageDescriptor>> {
        AffineTransformBuilder::derive_all(self.build_records(pairs)?)
    }

    /// Write one descriptor into `outfolder`
    pub fn georeference(&self, descriptor: &ImageDescriptor, outfolder: &Path) -> ReferenceResult<PathBuf> {
        self.georeferencer().reference(descriptor, outfolder)
    }

    fn georeferencer(&self) -> Georeferencer<'_, D, R> {
        Georeferencer::new(&self.decoder, &self.driver, self.config.epsg, &self.audit)
    }

    /// Reference every pair of `infolder` into `outfolder`
    ///
    /// Matching errors always end the batch. Under [`FailurePolicy::Abort`]
    /// the whole table is built before anything is written and the first
    /// failing row ends the batch; under [`FailurePolicy::Continue`] each
    /// row is built and written on its own and failures land in the report.
    pub fn reference_all(
        &self,
        infolder: &Path,
        outfolder: &Path,
        metadata_pattern: &str,
        image_pattern: &str,
    ) -> ReferenceResult<BatchReport> {
        let pairs = self.match_files(infolder, metadata_pattern, image_pattern)?;
        let mut report = BatchReport {
            matched: pairs.len(),
            ..BatchReport::default()
        };

        let progress = if self.config.show_progress {
            ProgressTracker::new(pairs.len() as u64, "Referencing")
        } else {
            ProgressTracker::hidden()
        };

        match self.config.failure_policy {
            FailurePolicy::Abort => {
                let descriptors = self.build_descriptors(&pairs)?;
                let georeferencer = self.georeferencer();
                for descriptor in &descriptors {
                    progress.set_message(descriptor.pair.image.name());
                    report.written.push(georeferencer.reference(descriptor, outfolder)?);
                    progress.increment(1);
                }
            },
            FailurePolicy::Continue => {
                let builder = ImageDescriptorBuilder::new(&self.parser, &self.decoder);
                let georeferencer = self.georeferencer();
                for pair in pairs {
                    progress.set_message(pair.image.name());
                    let written = builder
                        .build(&pair)
                        .and_then(AffineTransformBuilder::derive)
                        .and_then(|descriptor| georeferencer.reference(&descriptor, outfolder));

                    match written {
                        Ok(path) => report.written.push(path),
                        Err(error) => {
                            warn!("Skipping {}: {}", pair, error);
                            self.audit.skipped(pair.image.name(), pair.metadata.name(), &error.to_string());
                            report.failures.push(RowFailure { pair, error });
                        },
                    }
                    progress.increment(1);
                }
            },
        }

        progress.finish();
        info!("Batch finished: {} matched, {} written, {} failed",
              report.matched, report.written.len(), report.failures.len());
        Ok(report)
    }
}
