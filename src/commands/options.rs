//! Options shared by every command
//!
//! Configuration is layered: bundled defaults, then `--config`, then the
//! individual flags.

use std::path::PathBuf;

use clap::ArgMatches;
use log::debug;

use crate::config::{FailurePolicy, ReferencerConfig};
use crate::errors::{ReferenceError, ReferenceResult};
use crate::referencer::{DEFAULT_IMAGE_PATTERN, DEFAULT_METADATA_PATTERN};
use crate::tiff::OutputCompression;

/// Parsed command-line options
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub infolder: PathBuf,
    pub outfolder: PathBuf,
    pub metadata_pattern: String,
    pub image_pattern: String,
    pub config: ReferencerConfig,
}

impl RunOptions {
    pub fn from_args(args: &ArgMatches) -> ReferenceResult<Self> {
        let infolder = args.get_one::<String>("infolder")
            .map(PathBuf::from)
            .ok_or_else(|| ReferenceError::GenericError("Missing input folder".to_string()))?;
        let outfolder = args.get_one::<String>("outfolder")
            .map(PathBuf::from)
            .ok_or_else(|| ReferenceError::GenericError("Missing output folder".to_string()))?;

        let metadata_pattern = args.get_one::<String>("align-pattern")
            .cloned()
            .unwrap_or_else(|| DEFAULT_METADATA_PATTERN.to_string());
        let image_pattern = args.get_one::<String>("image-pattern")
            .cloned()
            .unwrap_or_else(|| DEFAULT_IMAGE_PATTERN.to_string());

        let mut config = match args.get_one::<String>("config") {
            Some(path) => ReferencerConfig::from_file(&PathBuf::from(path))?,
            None => ReferencerConfig::default(),
        };

        if let Some(epsg) = args.get_one::<String>("epsg") {
            config.epsg = epsg.parse::<u32>()
                .map_err(|_| ReferenceError::ConfigError(format!("Invalid EPSG code: {}", epsg)))?;
        }
        if let Some(name) = args.get_one::<String>("compression") {
            config.compression = OutputCompression::from_name(name)?;
        }
        if args.get_flag("keep-going") {
            config.failure_policy = FailurePolicy::Continue;
        }
        if args.get_flag("no-progress") {
            config.show_progress = false;
        }
        config.validate()?;

        debug!("Options: {} -> {} ({}, {}), {:?}",
               infolder.display(), outfolder.display(), metadata_pattern, image_pattern, config);

        Ok(RunOptions {
            infolder,
            outfolder,
            metadata_pattern,
            image_pattern,
            config,
        })
    }
}
