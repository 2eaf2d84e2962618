//! JSON-lines sink: one document per record for an external loader.
//!
//! ```text
//! {"cluster":"mila","kind":"node","key":"cn-a001","record":{"name":"cn-a001",...}}
//! ```
//!
//! The sink keeps no state of its own: the loader on the other end owns the
//! merge, so every record is reported as [`UpsertOutcome::Inserted`].

use std::io::Write;

use serde::Serialize;
use slurm_core::CanonicalRecord;

use crate::sink::{natural_key, UpsertOutcome, UpsertSink};
use crate::StoreError;

#[derive(Serialize)]
struct Line<'a> {
    cluster: &'a str,
    kind: &'static str,
    key: &'a str,
    record: &'a CanonicalRecord,
}

pub struct JsonLinesSink<W: Write> {
    writer: W,
    pretty: bool,
    written: usize,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
            written: 0,
        }
    }

    /// Pretty-print each document (no longer one document per line).
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Records written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> UpsertSink for JsonLinesSink<W> {
    fn upsert(
        &mut self,
        cluster: &str,
        record: CanonicalRecord,
    ) -> Result<UpsertOutcome, StoreError> {
        let key = natural_key(cluster, &record)?;
        let line = Line {
            cluster,
            kind: key.kind,
            key: &key.key,
            record: &record,
        };
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &line)?;
        } else {
            serde_json::to_writer(&mut self.writer, &line)?;
        }
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(UpsertOutcome::Inserted)
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        self.writer.flush()?;
        Ok(())
    }
}
