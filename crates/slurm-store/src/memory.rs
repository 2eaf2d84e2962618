//! In-memory store with reference merge semantics.
//!
//! A record whose key is absent is inserted. A record whose key is present
//! overwrites the fields it carries and leaves the others alone, so a field
//! that disappears from a later report keeps its last known value.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::Value;
use slurm_core::CanonicalRecord;
use tracing::trace;

use crate::sink::{natural_key, RecordKey, UpsertOutcome, UpsertSink};
use crate::StoreError;

/// A merged record and when it was first and last written.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    pub fields: BTreeMap<String, Value>,
    pub first_seen: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    records: BTreeMap<RecordKey, StoredRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, key: &RecordKey) -> Option<&StoredRecord> {
        self.records.get(key)
    }

    /// Look a record up by its parts.
    pub fn find(&self, cluster: &str, kind: &str, key: &str) -> Option<&StoredRecord> {
        self.records
            .iter()
            .find(|(k, _)| k.cluster == cluster && k.kind == kind && k.key == key)
            .map(|(_, record)| record)
    }

    /// All records, ordered by key.
    pub fn iter(&self) -> impl Iterator<Item = (&RecordKey, &StoredRecord)> {
        self.records.iter()
    }
}

impl UpsertSink for MemoryStore {
    fn upsert(
        &mut self,
        cluster: &str,
        record: CanonicalRecord,
    ) -> Result<UpsertOutcome, StoreError> {
        let key = natural_key(cluster, &record)?;
        let now = Utc::now();

        let Some(stored) = self.records.get_mut(&key) else {
            trace!(key = %key, "inserting record");
            self.records.insert(
                key,
                StoredRecord {
                    fields: record.into_fields(),
                    first_seen: now,
                    last_updated: now,
                },
            );
            return Ok(UpsertOutcome::Inserted);
        };

        let mut changed_fields = Vec::new();
        for (field, value) in record.into_fields() {
            if stored.fields.get(&field) != Some(&value) {
                changed_fields.push(field.clone());
                stored.fields.insert(field, value);
            }
        }
        stored.last_updated = now;
        trace!(key = %key, changed = changed_fields.len(), "merged record");
        Ok(UpsertOutcome::Updated { changed_fields })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use slurm_core::{normalize, RawRecord, NODES};

    fn node(value: Value) -> CanonicalRecord {
        let raw: RawRecord = value.as_object().cloned().unwrap_or_default();
        normalize(&NODES, raw).unwrap()
    }

    #[test]
    fn insert_then_merge() {
        let mut store = MemoryStore::new();
        let outcome = store
            .upsert("mila", node(json!({"name": "cn-a001", "state": "idle", "reason": "ok"})))
            .unwrap();
        assert_eq!(outcome, UpsertOutcome::Inserted);

        let outcome = store
            .upsert("mila", node(json!({"name": "cn-a001", "state": "down"})))
            .unwrap();
        assert_eq!(
            outcome,
            UpsertOutcome::Updated {
                changed_fields: vec!["state".to_string()]
            }
        );

        let stored = store.find("mila", "node", "cn-a001").unwrap();
        assert_eq!(stored.fields["state"], json!("down"));
        assert_eq!(stored.fields["reason"], json!("ok"));
        assert!(stored.last_updated >= stored.first_seen);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn clusters_do_not_collide() {
        let mut store = MemoryStore::new();
        store.upsert("mila", node(json!({"name": "cn-a001"}))).unwrap();
        store.upsert("narval", node(json!({"name": "cn-a001"}))).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn record_without_key_is_rejected() {
        let mut store = MemoryStore::new();
        let err = store.upsert("mila", node(json!({"state": "idle"}))).unwrap_err();
        assert!(matches!(err, StoreError::MissingNaturalKey { kind: "node", .. }));
        assert!(store.is_empty());
    }
}
