//! slurm-core: normalization pipeline for Slurm inspection reports.
//!
//! This crate turns the JSON reports of `sinfo --json` and `sacct --json`
//! into canonical records for the monitoring datastore.
//!
//! # Architecture
//!
//! ```text
//! report bytes ──► report::parse ──► normalizer::normalize ──► CanonicalRecord
//!                                        │
//!                         registry ──► translator ──► decode
//! ```
//!
//! Everything here is synchronous and free of shared mutable state: the
//! registries are immutable statics and the decoders are pure, so separate
//! reports can be normalised on separate threads without coordination.

pub mod config;
pub mod decode;
pub mod error;
pub mod normalizer;
pub mod registry;
pub mod report;
pub mod translator;
pub mod types;

pub use error::IngestError;
pub use normalizer::normalize;
pub use report::{parse, ReportStream};
pub use translator::Translator;
pub use types::{CanonicalRecord, RawRecord, ReportKind, JOBS, NODES, REPORT_KINDS};
