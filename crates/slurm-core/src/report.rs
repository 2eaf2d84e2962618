//! Report stream parser.
//!
//! [`parse`] checks the report envelope up front and returns a
//! [`ReportStream`]: an iterator that decodes, normalises and yields one
//! record at a time, in report order. A record is not decoded until the
//! consumer asks for it, so a consumer can act on early records before later
//! ones are touched, and can stop pulling at any time.
//!
//! The first error ends the stream.

use std::collections::HashMap;
use std::iter::{Enumerate, FusedIterator};

use serde_json::value::RawValue;
use tracing::debug;

use crate::error::IngestError;
use crate::normalizer::normalize;
use crate::types::{CanonicalRecord, RawRecord, ReportKind};

/// Validate the envelope of a report and stream its records.
///
/// Fails with [`IngestError::MalformedReport`] if the bytes are not a JSON
/// object, or if the kind's envelope key is missing or not an array. Other
/// top-level keys (`meta`, `errors`, `warnings`) are ignored.
pub fn parse<'a>(
    bytes: &'a [u8],
    kind: &'static ReportKind,
) -> Result<ReportStream<'a>, IngestError> {
    let envelope: HashMap<String, &'a RawValue> = serde_json::from_slice(bytes)
        .map_err(|e| IngestError::malformed(kind.name, format!("not a JSON object: {e}")))?;

    let section = envelope.get(kind.envelope_key).copied().ok_or_else(|| {
        IngestError::malformed(kind.name, format!("missing `{}` key", kind.envelope_key))
    })?;
    let records: Vec<&'a RawValue> = serde_json::from_str(section.get()).map_err(|_| {
        IngestError::malformed(kind.name, format!("`{}` is not an array", kind.envelope_key))
    })?;

    debug!(kind = kind.name, records = records.len(), "parsed report envelope");
    Ok(ReportStream {
        kind,
        total: records.len(),
        records: records.into_iter().enumerate(),
        done: false,
    })
}

/// Lazily normalised records of one report. See [`parse`].
pub struct ReportStream<'a> {
    kind: &'static ReportKind,
    total: usize,
    records: Enumerate<std::vec::IntoIter<&'a RawValue>>,
    done: bool,
}

impl ReportStream<'_> {
    pub fn kind(&self) -> &'static ReportKind {
        self.kind
    }

    /// Number of records in the envelope, yielded or not.
    pub fn len_hint(&self) -> usize {
        self.total
    }

    fn next_record(&self, index: usize, raw: &RawValue) -> Result<CanonicalRecord, IngestError> {
        let record: RawRecord =
            serde_json::from_str(raw.get()).map_err(|_| IngestError::InvalidRecord {
                kind: self.kind.name,
                index,
            })?;
        normalize(self.kind, record)
    }
}

impl Iterator for ReportStream<'_> {
    type Item = Result<CanonicalRecord, IngestError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let Some((index, raw)) = self.records.next() else {
            self.done = true;
            return None;
        };
        let result = self.next_record(index, raw);
        if result.is_err() {
            debug!(kind = self.kind.name, index, total = self.total, "aborting report");
            self.done = true;
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (0, Some(self.records.len()))
        }
    }
}

impl FusedIterator for ReportStream<'_> {}
