//! `sacct` TRES entry lists.
//!
//! `sacct --json` reports a job's trackable resources as an array of
//! objects instead of a string:
//!
//! ```json
//! [{"type": "cpu", "name": "", "id": 1, "count": 4},
//!  {"type": "mem", "name": "", "id": 2, "count": 16384},
//!  {"type": "gres", "name": "gpu", "id": 1001, "count": 1}]
//! ```
//!
//! They decode to the same shape as a TRES string: `type` or `type/name`
//! mapped to a count. Memory counts are megabytes in this format and are
//! converted to bytes.

use std::collections::BTreeMap;

use serde_json::Value;

use super::key_values::unit_multiplier;
use super::{type_name, DecodeError, Grammar, Quantity};

pub fn decode_tres_entries(entries: &[Value]) -> Result<BTreeMap<String, Quantity>, DecodeError> {
    let mut out = BTreeMap::new();
    for (i, entry) in entries.iter().enumerate() {
        let Value::Object(entry) = entry else {
            return Err(err(format!("entry {i} is {}", type_name(entry))));
        };
        let ty = entry
            .get("type")
            .and_then(Value::as_str)
            .filter(|ty| !ty.is_empty())
            .ok_or_else(|| err(format!("entry {i} has no type")))?;
        let count = entry
            .get("count")
            .and_then(Value::as_u64)
            .ok_or_else(|| err(format!("entry {i} ({ty}) has no count")))?;

        let key = match entry.get("name").and_then(Value::as_str) {
            Some(name) if !name.is_empty() => format!("{ty}/{name}"),
            _ => ty.to_string(),
        };
        let count = if ty == "mem" {
            count
                .checked_mul(unit_multiplier("M"))
                .ok_or_else(|| err(format!("memory count {count} overflows")))?
        } else {
            count
        };
        if out.insert(key.clone(), Quantity::Count(count)).is_some() {
            return Err(err(format!("duplicate key `{key}`")));
        }
    }
    Ok(out)
}

fn err(reason: impl Into<String>) -> DecodeError {
    DecodeError::new(Grammar::TresEntries, reason)
}
