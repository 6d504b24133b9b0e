//! Result records
//!
//! An insertion-ordered collection of named scalar fields, produced by a
//! command's work step and rendered exactly once. The record itself
//! guarantees field order, so renderings never depend on map iteration.

use crate::error::{CliError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single field value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Free-form text
    Str(String),
    /// Signed integer
    Int(i64),
    /// Floating-point number; non-finite values have no canonical rendering
    Float(f64),
    /// Boolean, rendered `true`/`false`
    Bool(bool),
    /// Byte count, rendered as a plain decimal
    Bytes(u64),
    /// Timestamp, rendered as RFC 3339 / ISO-8601 in UTC
    Timestamp(DateTime<Utc>),
}

impl FieldValue {
    /// Canonical text rendering of the value.
    ///
    /// `field` names the owning field in the error when no canonical rule
    /// applies.
    pub fn to_text(&self, field: &str) -> Result<String> {
        match self {
            Self::Str(v) => Ok(v.clone()),
            Self::Int(v) => Ok(v.to_string()),
            Self::Float(v) if v.is_finite() => Ok(v.to_string()),
            Self::Float(_) => Err(CliError::unsupported_field(field, "non-finite number")),
            Self::Bool(v) => Ok(v.to_string()),
            Self::Bytes(v) => Ok(v.to_string()),
            Self::Timestamp(v) => Ok(v.to_rfc3339_opts(SecondsFormat::Secs, true)),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Str(v) => serializer.serialize_str(v),
            Self::Int(v) => serializer.serialize_i64(*v),
            Self::Float(v) => serializer.serialize_f64(*v),
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::Bytes(v) => serializer.serialize_u64(*v),
            Self::Timestamp(v) => {
                serializer.serialize_str(&v.to_rfc3339_opts(SecondsFormat::Secs, true))
            }
        }
    }
}

/// Ordered field map representing one command invocation's output
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultRecord {
    fields: Vec<(String, FieldValue)>,
}

impl ResultRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, keeping declaration order.
    ///
    /// Pushing an existing name replaces its value in place, so the field
    /// set and order stay fixed.
    pub fn push(&mut self, name: impl Into<String>, value: FieldValue) -> &mut Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
        self
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Fields in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for ResultRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
