//! Batch referencing command
//!
//! The default command: write one GeoTIFF per matched pair.

use std::path::PathBuf;

use clap::ArgMatches;
use log::{error, info};

use crate::commands::command_traits::Command;
use crate::commands::options::RunOptions;
use crate::errors::{ReferenceError, ReferenceResult};
use crate::referencer::Referencer;
use crate::utils::Logger;

/// Default audit log file
pub const DEFAULT_LOG_FILE: &str = "scanref.log";

/// Command for referencing every pair of a folder
pub struct ReferenceCommand {
    options: RunOptions,
    /// Audit log of written and skipped pairs
    log_file: PathBuf,
}

impl ReferenceCommand {
    pub fn new(args: &ArgMatches) -> ReferenceResult<Self> {
        let options = RunOptions::from_args(args)?;
        let log_file = args.get_one::<String>("log-file")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

        Ok(ReferenceCommand { options, log_file })
    }
}

impl Command for ReferenceCommand {
    fn execute(&self) -> ReferenceResult<()> {
        info!("Referencing {} into {}", self.options.infolder.display(), self.options.outfolder.display());

        let audit = Logger::new(&self.log_file)?;
        let referencer = Referencer::new(self.options.config.clone())?.with_audit_log(audit);

        let report = referencer.reference_all(
            &self.options.infolder,
            &self.options.outfolder,
            &self.options.metadata_pattern,
            &self.options.image_pattern,
        )?;

        println!("{}", report);
        if report.is_success() {
            Ok(())
        } else {
            error!("{} of {} pair(s) failed", report.failures.len(), report.matched);
            Err(ReferenceError::GenericError(format!(
                "{} of {} pair(s) failed", report.failures.len(), report.matched)))
        }
    }
}
