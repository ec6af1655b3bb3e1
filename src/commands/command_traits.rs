//! Command pattern interfaces
//!
//! This module defines the core Command pattern interfaces
//! for the CLI application.

use crate::errors::ReferenceResult;

/// Represents an executable command in the application
///
/// Command objects encapsulate the logic for a specific CLI operation,
/// allowing for separation of concerns and better testability.
pub trait Command {
    /// Execute the command
    fn execute(&self) -> ReferenceResult<()>;
}

/// Factory for creating commands from CLI arguments
pub trait CommandFactory {
    /// Create the Command the CLI arguments ask for
    fn create_command(&self, args: &clap::ArgMatches) -> ReferenceResult<Box<dyn Command>>;
}
