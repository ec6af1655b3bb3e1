//! CLI command implementations
//!
//! This module contains implementations of the commands
//! supported by the CLI application using the Command pattern.

pub mod cli;
pub mod command_traits;
pub mod options;
pub mod reference_command;
pub mod match_command;
pub mod describe_command;

pub use cli::build_cli;
pub use command_traits::{Command, CommandFactory};
pub use options::RunOptions;
pub use reference_command::{ReferenceCommand, DEFAULT_LOG_FILE};
pub use match_command::MatchCommand;
pub use describe_command::DescribeCommand;

use clap::ArgMatches;
use crate::errors::ReferenceResult;

/// Factory for creating command instances based on CLI arguments
pub struct ScanrefCommandFactory;

impl ScanrefCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        ScanrefCommandFactory
    }
}

impl Default for ScanrefCommandFactory {
    fn default() -> Self {
        ScanrefCommandFactory::new()
    }
}

impl CommandFactory for ScanrefCommandFactory {
    fn create_command(&self, args: &ArgMatches) -> ReferenceResult<Box<dyn Command>> {
        if args.get_flag("list-matches") {
            Ok(Box::new(MatchCommand::new(args)?))
        } else if args.get_flag("describe") {
            Ok(Box::new(DescribeCommand::new(args)?))
        } else {
            // Default to referencing
            Ok(Box::new(ReferenceCommand::new(args)?))
        }
    }
}
