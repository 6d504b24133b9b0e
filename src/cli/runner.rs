//! Command orchestration
//!
//! Ties the pieces together: environment overrides, argument parsing, the
//! help short-circuit, arity validation, the work step, and result
//! rendering. Help must never reach the work step; that ordering is the
//! whole point of the design.

use crate::cli::spec::{ArgumentSpec, OptionValue, ParseOutcome, ParsedArguments};
use crate::cli::usage;
use crate::core::format::{self, OutputMode};
use crate::core::record::ResultRecord;
use crate::error::{CliError, Result};
use anyhow::Context;
use tracing::debug;

/// Clean exit
pub const EXIT_SUCCESS: i32 = 0;
/// The work step failed
pub const EXIT_FAILURE: i32 = 1;
/// Bad arguments; usage-error convention
pub const EXIT_USAGE: i32 = 2;

/// Orchestrates a single command invocation
#[derive(Debug)]
pub struct CommandRunner {
    program: String,
    synopsis: String,
    spec: ArgumentSpec,
    arity: (usize, Option<usize>),
}

impl CommandRunner {
    /// Create a runner for `program`.
    ///
    /// The reserved `--json` flag is registered here; tools registering
    /// their own `json` option get a `DuplicateOption` error.
    pub fn new(program: impl Into<String>, synopsis: impl Into<String>) -> Result<Self> {
        let mut spec = ArgumentSpec::new()?;
        spec.register(
            "json",
            OptionValue::Flag(false),
            "output the result as a single JSON object",
        )?;
        Ok(Self {
            program: program.into(),
            synopsis: synopsis.into(),
            spec,
            arity: (0, None),
        })
    }

    /// Enable environment-variable default overrides under `prefix`
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.spec.env_prefix(prefix);
        self
    }

    /// Register a tool-specific option
    pub fn option(
        mut self,
        name: impl Into<String>,
        default: OptionValue,
        help: impl Into<String>,
    ) -> Result<Self> {
        self.spec.register(name, default, help)?;
        Ok(self)
    }

    /// Declare the accepted positional-argument count; `None` is unbounded
    pub fn positional_arity(mut self, min: usize, max: Option<usize>) -> Self {
        self.arity = (min, max);
        self
    }

    /// Run the command and return the process exit code.
    ///
    /// `argv` is the argument vector without the program name. User-input
    /// errors become a one-line diagnostic on stderr and the usage exit
    /// code; no partial work happens before validation completes.
    pub fn run<I, F>(self, argv: I, work: F) -> i32
    where
        I: IntoIterator<Item = String>,
        F: FnOnce(&ParsedArguments) -> anyhow::Result<ResultRecord>,
    {
        match self.execute(argv, work) {
            Ok(code) => code,
            Err(error) => match error.downcast_ref::<CliError>() {
                Some(cli) if cli.is_user_error() => {
                    eprintln!("error: {}", cli);
                    EXIT_USAGE
                }
                _ => {
                    eprintln!("error: {:#}", error);
                    EXIT_FAILURE
                }
            },
        }
    }

    fn execute<I, F>(self, argv: I, work: F) -> anyhow::Result<i32>
    where
        I: IntoIterator<Item = String>,
        F: FnOnce(&ParsedArguments) -> anyhow::Result<ResultRecord>,
    {
        let parsed = match self.spec.parse(argv)? {
            ParseOutcome::Help => {
                debug!("help requested, exiting before any work");
                print!(
                    "{}",
                    usage::render(&self.program, &self.synopsis, self.spec.options())
                );
                return Ok(EXIT_SUCCESS);
            }
            ParseOutcome::Parsed(parsed) => parsed,
        };

        let (min, max) = self.arity;
        parsed.arity(min, max)?;

        let record = work(&parsed).context("command failed")?;

        let mode = OutputMode::from_flag(parsed.flag("json"));
        println!("{}", format::render(&record, mode)?);
        Ok(EXIT_SUCCESS)
    }
}
