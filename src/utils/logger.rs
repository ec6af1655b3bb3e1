//! Audit log of referenced pairs
//!
//! Runs alongside the `log` facade: diagnostics go through `env_logger`,
//! while this file records one line per pair written or skipped so a
//! batch can be reviewed after the fact.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use log::warn;

/// File-backed audit logger
pub struct Logger {
    /// File handle for log output
    file: Mutex<Option<File>>,
}

impl Logger {
    /// Creates a new logger, truncating the log file
    pub fn new(log_file: &Path) -> io::Result<Self> {
        let file = File::create(log_file)?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
        })
    }

    /// A logger that records nothing
    pub fn disabled() -> Self {
        Logger {
            file: Mutex::new(None),
        }
    }

    /// Logs a message to the log file
    pub fn log(&self, message: &str) -> io::Result<()> {
        let mut guard = match self.file.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(file) = &mut *guard {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Log a message, reporting but not propagating write failures
    pub fn record(&self, message: &str) {
        if let Err(e) = self.log(message) {
            warn!("Could not write audit log entry: {}", e);
        }
    }

    /// Record that a pair was written
    pub fn referenced(&self, image: &str, metadata: &str, output: &Path) {
        self.record(&format!("referenced {} and {} -> {}", image, metadata, output.display()));
    }

    /// Record that a pair failed and was skipped
    pub fn skipped(&self, image: &str, metadata: &str, reason: &str) {
        self.record(&format!("skipped {} and {}: {}", image, metadata, reason));
    }
}

impl Default for Logger {
    fn default() -> Self {
        Logger::disabled()
    }
}
