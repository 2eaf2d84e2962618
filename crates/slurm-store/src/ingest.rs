//! Drive a report stream into a sink.
//!
//! Records are upserted as soon as the stream yields them. When the stream
//! fails, the records already handed off stay handed off; the caller learns
//! how many there were.

use slurm_core::{IngestError, ReportStream};
use thiserror::Error;
use tracing::{info, warn};

use crate::sink::{UpsertOutcome, UpsertSink};
use crate::StoreError;

/// Counts for one fully ingested report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub records: usize,
    pub inserted: usize,
    pub updated: usize,
}

#[derive(Debug, Error)]
pub enum IngestFailure {
    /// The report itself could not be normalised.
    #[error("report aborted after {handed_off} records: {source}")]
    Report {
        handed_off: usize,
        #[source]
        source: IngestError,
    },

    /// The sink refused a record.
    #[error("sink rejected record #{index}: {source}")]
    Sink {
        index: usize,
        #[source]
        source: StoreError,
    },
}

impl IngestFailure {
    /// Records handed to the sink before the failure.
    pub fn handed_off(&self) -> usize {
        match self {
            IngestFailure::Report { handed_off, .. } => *handed_off,
            IngestFailure::Sink { index, .. } => *index,
        }
    }
}

/// Pull every record of `stream` into `sink` under `cluster`.
pub fn ingest<S: UpsertSink + ?Sized>(
    stream: ReportStream<'_>,
    cluster: &str,
    sink: &mut S,
) -> Result<IngestSummary, IngestFailure> {
    let kind = stream.kind();
    let mut summary = IngestSummary::default();

    for (index, record) in stream.enumerate() {
        let record = record.map_err(|source| {
            warn!(kind = kind.name, cluster, handed_off = index, error = %source, "report aborted");
            IngestFailure::Report {
                handed_off: index,
                source,
            }
        })?;
        match sink.upsert(cluster, record) {
            Ok(UpsertOutcome::Inserted) => summary.inserted += 1,
            Ok(UpsertOutcome::Updated { .. }) => summary.updated += 1,
            Err(source) => return Err(IngestFailure::Sink { index, source }),
        }
        summary.records += 1;
    }

    sink.flush().map_err(|source| IngestFailure::Sink {
        index: summary.records,
        source,
    })?;
    info!(
        kind = kind.name,
        cluster,
        records = summary.records,
        inserted = summary.inserted,
        updated = summary.updated,
        "report ingested"
    );
    Ok(summary)
}
