#![allow(clippy::cargo_common_metadata)]
use anyhow::{Context, Result};
use chrono::Utc;
use cmdkit::cli::{CommandRunner, OptionValue, ParsedArguments};
use cmdkit::core::{FieldValue, ProgressReporter, ResultRecord};
use cmdkit::setup_logging;
use std::fs;
use std::process;

fn main() -> Result<()> {
    // Declare the tool's surface
    let runner = CommandRunner::new("fstat", "[options] <path>...")?
        .env_prefix("FSTAT")
        .option(
            "label",
            OptionValue::Str("total".to_string()),
            "label for the report",
        )?
        .option(
            "limit",
            OptionValue::Int(0),
            "stop after this many files (0 = unlimited)",
        )?
        .option("debug", OptionValue::Flag(false), "enable debug output")?
        .positional_arity(1, None);

    // Parse, validate and execute; the runner owns the exit code
    process::exit(runner.run(std::env::args().skip(1), scan))
}

/// Count lines and bytes across the given paths
fn scan(args: &ParsedArguments) -> Result<ResultRecord> {
    // Logging can only honor --debug once parsing has happened
    setup_logging(args.flag("debug"))?;

    let paths = args.positionals();
    let limit = args.int_value("limit");
    let selected = if limit > 0 {
        &paths[..paths.len().min(limit as usize)]
    } else {
        paths
    };
    let truncated = selected.len() < paths.len();

    let mut progress = ProgressReporter::stdout("scanning", Some(selected.len() as u64));
    let mut lines: i64 = 0;
    let mut bytes: u64 = 0;
    for path in selected {
        let content =
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;
        lines += content.lines().count() as i64;
        bytes += content.len() as u64;
        progress.tick()?;
    }
    progress.finish()?;

    let mut record = ResultRecord::new();
    record
        .push("label", FieldValue::Str(args.str_value("label").to_string()))
        .push("files", FieldValue::Int(selected.len() as i64))
        .push("lines", FieldValue::Int(lines))
        .push("bytes", FieldValue::Bytes(bytes))
        .push("truncated", FieldValue::Bool(truncated))
        .push("generated", FieldValue::Timestamp(Utc::now()));
    Ok(record)
}
