//! Result rendering
//!
//! Renders a result record as line-oriented text or as a compact JSON
//! object. Both modes walk the record's declared field order, so identical
//! records always produce byte-identical output.

use crate::core::record::ResultRecord;
use crate::error::{CliError, Result};
use tracing::{debug, instrument};

/// How a result record is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// One `key: value` line per field
    #[default]
    Text,
    /// A single-line compact JSON object
    Json,
}

impl OutputMode {
    /// Mode selected by the reserved `--json` flag
    pub fn from_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

/// Render a record in the requested mode.
///
/// The returned string carries no trailing newline in either mode.
#[instrument(skip(record))]
pub fn render(record: &ResultRecord, mode: OutputMode) -> Result<String> {
    debug!("rendering {} field(s) as {:?}", record.len(), mode);
    match mode {
        OutputMode::Text => render_text(record),
        OutputMode::Json => render_json(record),
    }
}

fn render_text(record: &ResultRecord) -> Result<String> {
    let mut lines = Vec::with_capacity(record.len());
    for (name, value) in record.fields() {
        lines.push(format!("{}: {}", name, value.to_text(name)?));
    }
    Ok(lines.join("\n"))
}

fn render_json(record: &ResultRecord) -> Result<String> {
    // serde_json would silently turn a non-finite number into null; reject
    // it first so the failure names the field.
    for (name, value) in record.fields() {
        value.to_text(name)?;
    }
    serde_json::to_string(record)
        .map_err(|e| CliError::config(format!("JSON serialization failed: {}", e)))
}
