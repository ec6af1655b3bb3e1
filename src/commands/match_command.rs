//! Match listing command

use clap::ArgMatches;
use log::info;

use crate::commands::command_traits::Command;
use crate::commands::options::RunOptions;
use crate::errors::ReferenceResult;
use crate::matching::FileMatcher;

/// Command listing matched pairs without writing anything
pub struct MatchCommand {
    options: RunOptions,
}

impl MatchCommand {
    pub fn new(args: &ArgMatches) -> ReferenceResult<Self> {
        Ok(MatchCommand {
            options: RunOptions::from_args(args)?,
        })
    }
}

impl Command for MatchCommand {
    fn execute(&self) -> ReferenceResult<()> {
        info!("Listing matches in {}", self.options.infolder.display());

        let matcher = FileMatcher::from_config(&self.options.config.naming)?;
        let pairs = matcher.match_files(
            &self.options.infolder,
            &self.options.metadata_pattern,
            &self.options.image_pattern,
        )?;

        for pair in &pairs {
            println!("{}\t{}", pair.image.name(), pair.metadata.name());
        }
        Ok(())
    }
}
