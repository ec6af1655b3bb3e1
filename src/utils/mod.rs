//! Utility modules for common functionality
//!
//! The audit logger and the batch progress bar.

pub mod logger;
mod progress;

pub use logger::Logger;
pub use progress::ProgressTracker;
