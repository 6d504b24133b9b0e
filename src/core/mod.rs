//! Core functionality for command output
//!
//! Contains result records, their dual text/JSON rendering, and progress
//! reporting.

pub mod format;
pub mod progress;
pub mod record;

pub use format::OutputMode;
pub use progress::ProgressReporter;
pub use record::{FieldValue, ResultRecord};
