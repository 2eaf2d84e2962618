//! The upsert contract.

use slurm_core::{CanonicalRecord, ReportKind};

use crate::StoreError;

/// Identity of a record in the store: which cluster, which kind of record,
/// and the natural key within that kind.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordKey {
    pub cluster: String,
    pub kind: &'static str,
    pub key: String,
}

impl std::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.cluster, self.kind, self.key)
    }
}

/// Result of merging one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No record with this key existed.
    Inserted,
    /// An existing record was merged; lists the fields whose value changed.
    Updated { changed_fields: Vec<String> },
}

/// Destination for canonical records.
///
/// Implementations insert a record whose key is absent and merge it into
/// the existing one otherwise. How fields are merged is up to the sink.
pub trait UpsertSink {
    fn upsert(
        &mut self,
        cluster: &str,
        record: CanonicalRecord,
    ) -> Result<UpsertOutcome, StoreError>;

    /// Flush buffered output, if any. Called once after a report is drained.
    fn flush(&mut self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Key a record for `cluster`, or fail if its natural key is incomplete.
pub fn natural_key(cluster: &str, record: &CanonicalRecord) -> Result<RecordKey, StoreError> {
    let kind: &ReportKind = record.kind();
    let key = record
        .natural_key()
        .ok_or_else(|| StoreError::MissingNaturalKey {
            kind: kind.name,
            fields: kind.natural_key.join(", "),
        })?;
    Ok(RecordKey {
        cluster: cluster.to_string(),
        kind: kind.name,
        key,
    })
}
