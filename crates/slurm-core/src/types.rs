//! Core types for slurm-core.
//!
//! This module defines the data structures shared across the pipeline: the
//! [`RawRecord`] as emitted by Slurm, the normalised [`CanonicalRecord`], and
//! the [`ReportKind`] descriptor that binds a report envelope to its field
//! registry.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::registry::{self, Registry};
use crate::translator::Translator;

/// One unnormalised entry of a report, exactly as decoded from JSON.
pub type RawRecord = serde_json::Map<String, Value>;

// ---------------------------------------------------------------------------
// Report kinds
// ---------------------------------------------------------------------------

/// Everything the pipeline needs to know about one kind of report.
///
/// Supporting a new kind of report means adding one more `static` of this
/// type: the normalizer and the stream parser only ever go through it.
#[derive(Debug)]
pub struct ReportKind {
    /// Singular name used in logs and errors (`node`, `job`).
    pub name: &'static str,
    /// Top-level key holding the array of raw records.
    pub envelope_key: &'static str,
    /// Field registry for records of this kind.
    pub registry: &'static Registry,
    /// Canonical fields that identify a record across successive reports.
    /// These fields are copied verbatim, so they carry the same name in the
    /// raw record.
    pub natural_key: &'static [&'static str],
}

/// Node status reports (`sinfo --json`).
pub static NODES: ReportKind = ReportKind {
    name: "node",
    envelope_key: "nodes",
    registry: &registry::NODE_FIELDS,
    natural_key: &["name"],
};

/// Job accounting reports (`sacct --json`).
pub static JOBS: ReportKind = ReportKind {
    name: "job",
    envelope_key: "jobs",
    registry: &registry::JOB_FIELDS,
    natural_key: &["job_id"],
};

/// Every report kind known to this build.
pub static REPORT_KINDS: &[&ReportKind] = &[&NODES, &JOBS];

impl ReportKind {
    /// Find a report kind by its envelope key (`nodes`) or its name (`node`).
    pub fn find(name: &str) -> Option<&'static ReportKind> {
        REPORT_KINDS
            .iter()
            .copied()
            .find(|kind| kind.envelope_key == name || kind.name == name)
    }

    /// The translator registered for `field`, if any.
    pub fn lookup(&self, field: &str) -> Option<&'static Translator> {
        self.registry.get(field)
    }

    /// Build the natural key from whatever holds the record's fields.
    ///
    /// Multi-field keys are joined with `/`. Returns `None` if any part is
    /// missing or is not a string or number.
    pub fn key_from<'a>(&self, get: impl Fn(&str) -> Option<&'a Value>) -> Option<String> {
        let mut parts = Vec::with_capacity(self.natural_key.len());
        for field in self.natural_key {
            match get(field)? {
                Value::String(s) => parts.push(s.clone()),
                Value::Number(n) => parts.push(n.to_string()),
                _ => return None,
            }
        }
        Some(parts.join("/"))
    }
}

impl PartialEq for ReportKind {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ReportKind {}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

// ---------------------------------------------------------------------------
// Canonical records
// ---------------------------------------------------------------------------

/// A normalised record, ready to be handed to an upsert sink.
///
/// Keys are unique. They are kept sorted so that serialised output is stable;
/// the order carries no meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRecord {
    kind: &'static ReportKind,
    fields: BTreeMap<String, Value>,
}

impl CanonicalRecord {
    /// An empty record of the given kind.
    pub fn new(kind: &'static ReportKind) -> Self {
        Self {
            kind,
            fields: BTreeMap::new(),
        }
    }

    pub fn kind(&self) -> &'static ReportKind {
        self.kind
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> BTreeMap<String, Value> {
        self.fields
    }

    /// The record's natural key, if all of its parts are present.
    pub fn natural_key(&self) -> Option<String> {
        self.kind.key_from(|field| self.fields.get(field))
    }

    pub(crate) fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }
}

impl Serialize for CanonicalRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}
