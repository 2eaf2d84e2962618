//! Test builders: ergonomic constructors for raw records.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use serde_json::Value;
use slurm_ingest::RawRecord;

// ---------------------------------------------------------------------------
// RawRecordBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`RawRecord`] test fixtures.
///
/// # Example
///
/// ```rust
/// let raw = RawRecordBuilder::node("cn-a001")
///     .field("state", "idle")
///     .field("real_memory", 1800)
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct RawRecordBuilder {
    fields: RawRecord,
}

impl RawRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A node record with its `name` already set.
    pub fn node(name: &str) -> Self {
        Self::new().field("name", name)
    }

    /// A job record with its `job_id` already set.
    pub fn job(job_id: u64) -> Self {
        Self::new().field("job_id", job_id)
    }

    /// Start from an existing JSON object.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self { fields },
            other => panic!("RawRecordBuilder::from_value needs an object, got {other}"),
        }
    }

    pub fn field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(key.to_string(), value.into());
        self
    }

    pub fn without(mut self, key: &str) -> Self {
        self.fields.remove(key);
        self
    }

    pub fn build(self) -> RawRecord {
        self.fields
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}
