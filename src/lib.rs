//! # cmdkit
//!
//! A composable skeleton for building command-line tools. The library
//! provides typed option declaration with environment-variable default
//! overrides, deterministic usage rendering, dual text/JSON result output,
//! and interactivity-gated progress reporting, tied together by a small
//! orchestration layer.
//!
//! ## Features
//!
//! - Typed options with defaults, help text and `PREFIX_NAME` env overrides
//! - `--help` that short-circuits before any work is performed
//! - One result record, two renderings: `key: value` text or compact JSON
//! - Spinner/bar progress that stays silent when output is piped
//! - One-line diagnostics and conventional exit codes for bad input
//!
//! ## Example
//!
//! ```no_run
//! use cmdkit::cli::{CommandRunner, OptionValue};
//! use cmdkit::core::{FieldValue, ResultRecord};
//!
//! let runner = CommandRunner::new("greet", "[options] <name>")?
//!     .option("greeting", OptionValue::Str("hello".to_string()), "word to greet with")?
//!     .positional_arity(1, Some(1));
//!
//! let code = runner.run(std::env::args().skip(1), |args| {
//!     let mut record = ResultRecord::new();
//!     record.push(
//!         "message",
//!         FieldValue::Str(format!("{} {}", args.str_value("greeting"), args.positionals()[0])),
//!     );
//!     Ok(record)
//! });
//! std::process::exit(code);
//! # Ok::<(), cmdkit::error::CliError>(())
//! ```

pub mod cli;
pub mod core;
pub mod error;
pub mod utils;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with appropriate verbosity
pub fn setup_logging(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
