//! Normalizer: turns one [`RawRecord`] into a [`CanonicalRecord`].
//!
//! Every field of the raw record must have a translator in the registry of
//! its report kind. The record is checked for unknown fields before anything
//! is translated, and the output is only returned once every field has been
//! applied, so callers never see a partial record.

use tracing::{trace, warn};

use crate::error::IngestError;
use crate::types::{CanonicalRecord, RawRecord, ReportKind};

/// Normalise one raw record of the given kind.
pub fn normalize(
    kind: &'static ReportKind,
    raw: RawRecord,
) -> Result<CanonicalRecord, IngestError> {
    let key = kind.key_from(|field| raw.get(field));

    let translators = raw
        .keys()
        .map(|field| kind.lookup(field).ok_or(field))
        .collect::<Result<Vec<_>, _>>();
    let translators = match translators {
        Ok(translators) => translators,
        Err(field) => {
            warn!(kind = kind.name, field = %field, record = ?key, "unknown field in report");
            return Err(IngestError::UnknownField {
                kind: kind.name,
                field: field.clone(),
                record: key,
            });
        }
    };

    let mut out = CanonicalRecord::new(kind);
    for ((field, value), translator) in raw.into_iter().zip(translators) {
        if let Err(err) = translator.apply(&field, value, &mut out) {
            warn!(
                kind = kind.name,
                field = %field,
                record = ?key,
                error = %err,
                "cannot translate field"
            );
            return Err(err.with_record(key));
        }
    }

    trace!(kind = kind.name, record = ?key, fields = out.len(), "normalized record");
    Ok(out)
}
