//! slurm-store: hand-off of canonical records to persistent storage.
//!
//! The normalization pipeline ends at a sequence of
//! [`CanonicalRecord`](slurm_core::CanonicalRecord)s. This crate defines how
//! they are handed over: the [`UpsertSink`] contract, keyed by each record's
//! natural key, and the [`ingest`] driver that pulls a report stream into a
//! sink one record at a time.
//!
//! # Available sinks
//!
//! | Sink | Purpose |
//! |------|---------|
//! | [`MemoryStore`] | Reference merge semantics, tests |
//! | [`JsonLinesSink`] | One JSON document per record, for external loaders |
//!
//! The datastore proper lives outside this workspace; it implements
//! [`UpsertSink`] with whatever merge policy it needs.

pub mod error;
pub mod ingest;
pub mod jsonl;
pub mod memory;
pub mod sink;

pub use error::StoreError;
pub use ingest::{ingest, IngestFailure, IngestSummary};
pub use jsonl::JsonLinesSink;
pub use memory::{MemoryStore, StoredRecord};
pub use sink::{natural_key, RecordKey, UpsertOutcome, UpsertSink};
