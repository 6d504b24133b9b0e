//! Error types for the command-line toolkit
//!
//! Provides structured error handling with a clear split between user-input
//! errors (reported as one-line diagnostics) and programmer-misuse errors
//! (fatal with full detail).

use thiserror::Error;

/// Main error type for the toolkit
#[derive(Error, Debug)]
pub enum CliError {
    /// An option name was registered twice on the same spec
    #[error("option --{name} is already registered")]
    DuplicateOption { name: String },

    /// An option name does not satisfy the naming rules
    #[error("invalid option name {name:?}: expected lowercase letters, digits and hyphens")]
    InvalidOptionName { name: String },

    /// A supplied value failed type coercion for its option
    #[error("invalid value {raw:?} for option --{option}: expected {expected}")]
    InvalidValue {
        option: String,
        raw: String,
        expected: &'static str,
    },

    /// Wrong number of positional arguments
    #[error("expected {expected} positional argument(s), got {actual}")]
    Arity { expected: String, actual: usize },

    /// A result field holds a value with no canonical text rendering
    #[error("field {field:?} has no canonical rendering: {reason}")]
    UnsupportedFieldType {
        field: String,
        reason: &'static str,
    },

    /// A component was driven through an illegal state transition
    #[error("invalid state: {operation} called on a {state} reporter")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    /// Progress output could not be written to its destination
    #[error("failed to write progress output")]
    Render {
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl From<std::io::Error> for CliError {
    fn from(source: std::io::Error) -> Self {
        Self::Render { source }
    }
}

impl CliError {
    /// Create a new duplicate-option error
    pub fn duplicate_option(name: impl Into<String>) -> Self {
        Self::DuplicateOption { name: name.into() }
    }

    /// Create a new invalid-option-name error
    pub fn invalid_option_name(name: impl Into<String>) -> Self {
        Self::InvalidOptionName { name: name.into() }
    }

    /// Create a new invalid-value error
    pub fn invalid_value(
        option: impl Into<String>,
        raw: impl Into<String>,
        expected: &'static str,
    ) -> Self {
        Self::InvalidValue {
            option: option.into(),
            raw: raw.into(),
            expected,
        }
    }

    /// Create a new arity error
    pub fn arity(expected: impl Into<String>, actual: usize) -> Self {
        Self::Arity {
            expected: expected.into(),
            actual,
        }
    }

    /// Create a new unsupported-field-type error
    pub fn unsupported_field(field: impl Into<String>, reason: &'static str) -> Self {
        Self::UnsupportedFieldType {
            field: field.into(),
            reason,
        }
    }

    /// Create a new invalid-state error
    pub fn invalid_state(operation: &'static str, state: &'static str) -> Self {
        Self::InvalidState { operation, state }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this error is bad user input rather than a bug in the tool.
    ///
    /// User-input errors are caught at the orchestration boundary and turned
    /// into a one-line diagnostic with a usage-error exit code; everything
    /// else propagates with full detail.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::InvalidValue { .. } | Self::Arity { .. })
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, CliError>;
