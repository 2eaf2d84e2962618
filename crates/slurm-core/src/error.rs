//! Errors raised while parsing and normalising a report.
//!
//! Every variant aborts the report it occurred in. Field-level variants carry
//! the report kind, the field and, once known, the record's natural key, so a
//! failure can be traced back to the Slurm schema change that caused it.

use thiserror::Error;

use crate::decode::DecodeError;

#[derive(Debug, Error)]
pub enum IngestError {
    /// A raw field with no entry in the registry for its report kind.
    #[error("unknown field `{field}` in {kind} record{}", record_suffix(.record))]
    UnknownField {
        kind: &'static str,
        field: String,
        record: Option<String>,
    },

    /// The report envelope is not what the report kind expects.
    #[error("malformed {kind} report: {reason}")]
    MalformedReport { kind: &'static str, reason: String },

    /// A composite value that does not match its grammar.
    #[error("cannot decode `{field}` in {kind} record{} from {value}: {source}", record_suffix(.record))]
    Decode {
        kind: &'static str,
        field: String,
        record: Option<String>,
        value: String,
        #[source]
        source: DecodeError,
    },

    /// A field whose value has the wrong JSON type for its translator.
    #[error("field `{field}` in {kind} record{} should be {expected}, found {found}", record_suffix(.record))]
    UnexpectedType {
        kind: &'static str,
        field: String,
        record: Option<String>,
        expected: &'static str,
        found: &'static str,
    },

    /// An element of the envelope array that is not a JSON object.
    #[error("{kind} record #{index} is not a JSON object")]
    InvalidRecord { kind: &'static str, index: usize },
}

fn record_suffix(record: &Option<String>) -> String {
    match record {
        Some(key) => format!(" `{key}`"),
        None => String::new(),
    }
}

impl IngestError {
    pub fn malformed(kind: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedReport {
            kind,
            reason: reason.into(),
        }
    }

    /// Attach the record's natural key to a field-level error that lacks one.
    pub fn with_record(mut self, key: Option<String>) -> Self {
        match &mut self {
            Self::UnknownField { record, .. }
            | Self::Decode { record, .. }
            | Self::UnexpectedType { record, .. } => {
                if record.is_none() {
                    *record = key;
                }
            }
            Self::MalformedReport { .. } | Self::InvalidRecord { .. } => {}
        }
        self
    }

    /// The offending field, for field-level errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::UnknownField { field, .. }
            | Self::Decode { field, .. }
            | Self::UnexpectedType { field, .. } => Some(field),
            Self::MalformedReport { .. } | Self::InvalidRecord { .. } => None,
        }
    }
}
