//! Key=value aggregate grammar (TRES strings).
//!
//! `cpu=40,mem=386618M,billing=96,gres/gpu=8`
//!
//! Integers are kept as counts. A number followed by one of `K M G T P` is a
//! size and becomes a byte count using binary multiples, the way Slurm prints
//! them (`1M` = 1024 * 1024). Decimal sizes (`1.50G`) are rounded to the
//! nearest byte. Any other value is kept as text.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use super::{DecodeError, Grammar};

static QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<number>[0-9]+(?:\.[0-9]+)?)(?P<unit>[KMGTP])?$")
        .expect("valid quantity regex")
});

/// A decoded value: a count (bytes, when a unit was given) or raw text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Quantity {
    Count(u64),
    Text(String),
}

impl From<Quantity> for Value {
    fn from(q: Quantity) -> Self {
        match q {
            Quantity::Count(n) => Value::from(n),
            Quantity::Text(s) => Value::String(s),
        }
    }
}

/// Decode a comma-separated `key=value` string.
pub fn decode_key_values(input: &str) -> Result<BTreeMap<String, Quantity>, DecodeError> {
    let mut out = BTreeMap::new();
    let input = input.trim();
    if input.is_empty() {
        return Ok(out);
    }
    for pair in input.split(',') {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| err(format!("`{pair}` is not a key=value pair")))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(err(format!("empty key in `{pair}`")));
        }
        let quantity = parse_quantity(value.trim())?;
        if out.insert(key.to_string(), quantity).is_some() {
            return Err(err(format!("duplicate key `{key}`")));
        }
    }
    Ok(out)
}

fn err(reason: impl Into<String>) -> DecodeError {
    DecodeError::new(Grammar::KeyValues, reason)
}

/// Byte multiplier for a Slurm size suffix.
pub(crate) fn unit_multiplier(unit: &str) -> u64 {
    match unit {
        "K" => 1 << 10,
        "M" => 1 << 20,
        "G" => 1 << 30,
        "T" => 1 << 40,
        "P" => 1 << 50,
        _ => 1,
    }
}

fn parse_quantity(raw: &str) -> Result<Quantity, DecodeError> {
    let Some(caps) = QUANTITY.captures(raw) else {
        return Ok(Quantity::Text(raw.to_string()));
    };
    let number = &caps["number"];
    let unit = caps.name("unit").map(|m| m.as_str());

    match (number.parse::<u64>(), unit) {
        (Ok(n), None) => Ok(Quantity::Count(n)),
        (Ok(n), Some(unit)) => n
            .checked_mul(unit_multiplier(unit))
            .map(Quantity::Count)
            .ok_or_else(|| err(format!("`{raw}` overflows a byte count"))),
        // Decimal without a unit, or an integer too large for u64.
        (Err(_), None) => Ok(Quantity::Text(raw.to_string())),
        (Err(_), Some(unit)) => {
            let scaled = number
                .parse::<f64>()
                .map(|f| (f * unit_multiplier(unit) as f64).round())
                .map_err(|_| err(format!("bad number in `{raw}`")))?;
            // `u64::MAX as f64` rounds up to 2^64, which does not fit.
            if !scaled.is_finite() || scaled >= u64::MAX as f64 {
                return Err(err(format!("`{raw}` overflows a byte count")));
            }
            Ok(Quantity::Count(scaled as u64))
        }
    }
}
