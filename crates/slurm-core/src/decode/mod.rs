//! Composite value decoders.
//!
//! Some Slurm fields pack structured data into a single value: GRES strings
//! such as `gpu:rtx8000:8(S:0-1)`, TRES strings such as
//! `cpu=40,mem=386618M,billing=96`, and the per-job TRES entry lists of
//! `sacct`. Each shape has a [`Grammar`]; a `Decode` translator names the
//! grammar to apply.
//!
//! Decoders are pure functions of their input. They know nothing about the
//! record the value came from: the normalizer attaches that context when a
//! decode fails.

mod key_values;
mod resource_list;
mod tres_entries;

pub use key_values::{decode_key_values, Quantity};
pub use resource_list::{decode_resource_list, Resource};
pub use tres_entries::decode_tres_entries;

use serde_json::Value;
use thiserror::Error;

/// The grammars a `Decode` translator can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grammar {
    /// Comma-separated `type[:name][:count][(qualifier)]` segments.
    ResourceList,
    /// Comma-separated `key=value` pairs with optional unit suffixes.
    KeyValues,
    /// `sacct` TRES entries: an array of `{type, name, count}` objects.
    TresEntries,
}

impl std::fmt::Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Grammar::ResourceList => write!(f, "resource list"),
            Grammar::KeyValues => write!(f, "key=value list"),
            Grammar::TresEntries => write!(f, "TRES entry list"),
        }
    }
}

/// A value that does not match its grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {grammar}: {reason}")]
pub struct DecodeError {
    pub grammar: Grammar,
    pub reason: String,
}

impl DecodeError {
    pub(crate) fn new(grammar: Grammar, reason: impl Into<String>) -> Self {
        Self {
            grammar,
            reason: reason.into(),
        }
    }
}

impl Grammar {
    /// Decode a JSON value with this grammar.
    ///
    /// `null` decodes to `null` for every grammar. Resource lists also accept
    /// an array of strings (as in `gres_detail`), which is joined with `,`.
    pub fn decode(self, value: &Value) -> Result<Value, DecodeError> {
        match (self, value) {
            (_, Value::Null) => Ok(Value::Null),
            (Grammar::ResourceList, Value::String(s)) => {
                Ok(resources_to_value(decode_resource_list(s)?))
            }
            (Grammar::ResourceList, Value::Array(items)) => {
                let parts = items
                    .iter()
                    .map(|item| {
                        item.as_str().ok_or_else(|| {
                            let found = type_name(item);
                            DecodeError::new(self, format!("expected strings, found {found}"))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(resources_to_value(decode_resource_list(&parts.join(","))?))
            }
            (Grammar::KeyValues, Value::String(s)) => {
                Ok(quantities_to_value(decode_key_values(s)?))
            }
            (Grammar::TresEntries, Value::Array(items)) => {
                Ok(quantities_to_value(decode_tres_entries(items)?))
            }
            (Grammar::TresEntries, other) => {
                let found = type_name(other);
                Err(DecodeError::new(self, format!("expected an array, found {found}")))
            }
            (_, other) => {
                let found = type_name(other);
                Err(DecodeError::new(self, format!("expected a string, found {found}")))
            }
        }
    }
}

fn resources_to_value(resources: Vec<Resource>) -> Value {
    Value::Array(resources.into_iter().map(Value::from).collect())
}

fn quantities_to_value(quantities: std::collections::BTreeMap<String, Quantity>) -> Value {
    Value::Object(quantities.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
}

/// Short JSON type name for error messages.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
