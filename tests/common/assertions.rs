//! Domain-specific assertion macros for slurm-ingest harnesses.
//!
//! These add failure messages that say which record and which field broke
//! the expectation.

// ---------------------------------------------------------------------------
// Field assertions
// ---------------------------------------------------------------------------

/// Assert that a `CanonicalRecord` has a field with an expected value.
///
/// ```rust
/// assert_has_field!(record, "arch", "x86_64");
/// ```
#[macro_export]
macro_rules! assert_has_field {
    ($record:expr, $key:expr, $value:expr) => {{
        let record: &slurm_ingest::CanonicalRecord = &$record;
        let key: &str = $key;
        let expected = serde_json::json!($value);
        match record.get(key) {
            Some(actual) if *actual == expected => {}
            Some(actual) => panic!(
                "assert_has_field! failed:\n  record[{:?}]\n  expected: {}\n  actual:   {}",
                key, expected, actual
            ),
            None => panic!(
                "assert_has_field! failed: field {:?} not found in record.\n  Available fields: {:?}",
                key,
                record.keys().collect::<Vec<_>>()
            ),
        }
    }};
}

/// Assert that a `CanonicalRecord` has no field under `key`.
#[macro_export]
macro_rules! assert_no_field {
    ($record:expr, $key:expr) => {{
        let record: &slurm_ingest::CanonicalRecord = &$record;
        let key: &str = $key;
        if let Some(value) = record.get(key) {
            panic!(
                "assert_no_field! failed: field {:?} is present with value {}",
                key, value
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// Error assertions
// ---------------------------------------------------------------------------

/// Assert that a result is an `UnknownField` error naming `field`.
#[macro_export]
macro_rules! assert_unknown_field {
    ($result:expr, $field:expr) => {{
        match $result {
            Err(slurm_ingest::IngestError::UnknownField { field, .. }) if field == $field => {}
            Err(other) => panic!(
                "assert_unknown_field! failed: expected unknown field {:?}, got error: {}",
                $field, other
            ),
            Ok(_) => panic!(
                "assert_unknown_field! failed: expected unknown field {:?}, got a record",
                $field
            ),
        }
    }};
}

/// Assert that the set of keys of a record is exactly `keys`, in any order.
pub fn assert_keys(record: &slurm_ingest::CanonicalRecord, keys: &[&str]) {
    let mut actual: Vec<&str> = record.keys().collect();
    let mut expected = keys.to_vec();
    actual.sort_unstable();
    expected.sort_unstable();
    pretty_assertions::assert_eq!(actual, expected, "canonical record keys");
}
