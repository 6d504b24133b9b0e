//! Environment variable handling
//!
//! Maps option names to environment override variables and looks them up
//! once at startup, before flag parsing.

use std::env;

/// Environment variable name for an option override.
///
/// Option names are uppercased and hyphens become underscores, so prefix
/// `FSTAT` and option `lines-only` give `FSTAT_LINES_ONLY`.
pub fn override_name(prefix: &str, option: &str) -> String {
    let option = option.to_ascii_uppercase().replace('-', "_");
    format!("{}_{}", prefix, option)
}

/// Look up the environment override for an option, if any
pub fn lookup_override(prefix: &str, option: &str) -> Option<String> {
    env::var(override_name(prefix, option)).ok()
}

/// Get an environment variable with a default value
pub fn var_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Set an option override (mainly for testing)
pub fn set_override(prefix: &str, option: &str, value: &str) {
    unsafe { env::set_var(override_name(prefix, option), value) }
}

/// Remove an option override (mainly for testing)
pub fn remove_override(prefix: &str, option: &str) {
    unsafe { env::remove_var(override_name(prefix, option)) }
}
