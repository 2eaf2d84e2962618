//! Translators: what happens to one raw field during normalisation.
//!
//! A translator is bound to a field name by its registry entry. Applying it
//! writes zero or more canonical fields into the output record and touches
//! nothing else.

use serde_json::Value;

use crate::decode::{type_name, Grammar};
use crate::error::IngestError;
use crate::types::CanonicalRecord;

/// Sub-field table of a [`Translator::Flatten`].
pub type Subfields = &'static [(&'static str, Translator)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Translator {
    /// Keep the value under its original key.
    Copy,
    /// Keep the value under a new key.
    Rename(&'static str),
    /// Drop the value.
    Ignore,
    /// Parse a composite value and store the result under `key`.
    Decode { key: &'static str, grammar: Grammar },
    /// Lift the members of a nested object into the record, each through its
    /// own translator. Members missing from the table are unknown fields
    /// reported as `parent.member`.
    Flatten(Subfields),
}

impl Translator {
    /// Translate `value` of `field` into `out`.
    pub fn apply(
        &self,
        field: &str,
        value: Value,
        out: &mut CanonicalRecord,
    ) -> Result<(), IngestError> {
        match *self {
            Translator::Copy => out.insert(field, value),
            Translator::Rename(key) => out.insert(key, value),
            Translator::Ignore => {}
            Translator::Decode { key, grammar } => {
                let decoded = grammar.decode(&value).map_err(|source| IngestError::Decode {
                    kind: out.kind().name,
                    field: field.to_string(),
                    record: None,
                    value: value.to_string(),
                    source,
                })?;
                out.insert(key, decoded);
            }
            Translator::Flatten(subfields) => flatten(field, subfields, value, out)?,
        }
        Ok(())
    }

    /// Canonical keys this translator can write when bound to `field`.
    pub fn output_keys<'a>(&'a self, field: &'a str) -> Vec<&'a str> {
        match self {
            Translator::Copy => vec![field],
            Translator::Rename(key) | Translator::Decode { key, .. } => vec![*key],
            Translator::Ignore => Vec::new(),
            Translator::Flatten(subfields) => subfields
                .iter()
                .flat_map(|(sub, translator)| translator.output_keys(sub))
                .collect(),
        }
    }
}

fn flatten(
    field: &str,
    subfields: Subfields,
    value: Value,
    out: &mut CanonicalRecord,
) -> Result<(), IngestError> {
    let members = match value {
        Value::Null => return Ok(()),
        Value::Object(members) => members,
        other => {
            return Err(IngestError::UnexpectedType {
                kind: out.kind().name,
                field: field.to_string(),
                record: None,
                expected: "an object",
                found: type_name(&other),
            })
        }
    };
    for (member, value) in members {
        let path = format!("{field}.{member}");
        let translator = subfields
            .iter()
            .find_map(|(name, translator)| (*name == member).then_some(translator))
            .ok_or_else(|| IngestError::UnknownField {
                kind: out.kind().name,
                field: path.clone(),
                record: None,
            })?;
        match translator {
            // Copied members keep their own name, not the dotted path.
            Translator::Copy => out.insert(member, value),
            _ => translator.apply(&path, value, out)?,
        }
    }
    Ok(())
}
