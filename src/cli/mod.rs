//! Command-line interface module
//!
//! Provides option declaration, usage rendering and command orchestration.

pub mod runner;
pub mod spec;
pub mod usage;

pub use runner::{CommandRunner, EXIT_FAILURE, EXIT_SUCCESS, EXIT_USAGE};
pub use spec::{ArgumentSpec, OptionDescriptor, OptionKind, OptionValue, ParseOutcome, ParsedArguments};
