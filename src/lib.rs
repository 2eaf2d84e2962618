//! slurm-ingest: Slurm report normalization.
//!
//! Turns the JSON reports of `sinfo --json` (nodes) and `sacct --json` (jobs)
//! into canonical records and hands them to an upsert sink. This crate
//! re-exports the pipeline layers so that integration tests and benches can
//! import them from one place.
//!
//! # Architecture
//!
//! ```text
//! report bytes ──► report::parse ──► normalizer ──► ReportStream ──► ingest ──► UpsertSink
//!                                       │
//!                        registry ──► translator ──► decode
//! ```
//!
//! Parsing is lazy: each record is normalised and handed to the sink before
//! the next one is decoded.

pub use slurm_core::{
    config, decode, error, normalizer, registry, report, translator, types, CanonicalRecord,
    IngestError, RawRecord, ReportKind, ReportStream, Translator, JOBS, NODES, REPORT_KINDS,
};
pub use slurm_core::{normalize, parse};
pub use slurm_store as store;
pub use slurm_store::{ingest, IngestFailure, IngestSummary, UpsertOutcome, UpsertSink};
