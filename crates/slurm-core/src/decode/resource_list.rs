//! Resource-list grammar (GRES strings).
//!
//! ```text
//! list     := "" | "(null)" | "N/A" | segment ("," segment)*
//! segment  := type [":" name] [":" count] ["(" qualifier ")"]
//! ```
//!
//! A two-part segment is `type:count` when the second part is all digits,
//! `type:name` otherwise. Commas inside a qualifier do not split segments.
//! The qualifier (`S:0-1`, `IDX:0-7`) is kept verbatim.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{json, Value};

use super::{DecodeError, Grammar};

static SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<body>[^()]+)(?:\((?P<qualifier>[^()]*)\))?$").expect("valid segment regex")
});
static TYPE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][\w./-]*$").expect("valid type regex"));
static NAME_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.+/-]+$").expect("valid name regex"));

/// One entry of a resource list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub resource_type: String,
    pub name: Option<String>,
    /// Defaults to 1 when the segment gives no count.
    pub count: u64,
    pub qualifier: Option<String>,
}

impl From<Resource> for Value {
    fn from(r: Resource) -> Self {
        json!({
            "resource_type": r.resource_type,
            "name": r.name,
            "count": r.count,
            "qualifier": r.qualifier,
        })
    }
}

/// Decode a resource-list string into its entries, in order.
pub fn decode_resource_list(input: &str) -> Result<Vec<Resource>, DecodeError> {
    let input = input.trim();
    if matches!(input, "" | "(null)" | "N/A") {
        return Ok(Vec::new());
    }
    split_top_level(input)?
        .into_iter()
        .map(parse_segment)
        .collect()
}

fn err(reason: impl Into<String>) -> DecodeError {
    DecodeError::new(Grammar::ResourceList, reason)
}

fn split_top_level(input: &str) -> Result<Vec<&str>, DecodeError> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| err(format!("unbalanced `)` at offset {i}")))?;
            }
            ',' if depth == 0 => {
                segments.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(err("unbalanced `(`"));
    }
    segments.push(&input[start..]);
    Ok(segments)
}

fn parse_segment(segment: &str) -> Result<Resource, DecodeError> {
    let segment = segment.trim();
    if segment.is_empty() {
        return Err(err("empty segment"));
    }
    let caps = SEGMENT
        .captures(segment)
        .ok_or_else(|| err(format!("malformed segment `{segment}`")))?;
    let qualifier = caps.name("qualifier").map(|m| m.as_str().to_string());

    let parts: Vec<&str> = caps["body"].split(':').collect();
    let (resource_type, name, count) = match parts.as_slice() {
        [ty] => (*ty, None, None),
        [ty, second] if is_count(second) => (*ty, None, Some(*second)),
        [ty, name] => (*ty, Some(*name), None),
        [ty, name, count] => (*ty, Some(*name), Some(*count)),
        _ => return Err(err(format!("too many `:` parts in `{segment}`"))),
    };

    if !TYPE_TOKEN.is_match(resource_type) {
        return Err(err(format!("bad resource type `{resource_type}` in `{segment}`")));
    }
    if let Some(name) = name {
        if !NAME_TOKEN.is_match(name) {
            return Err(err(format!("bad resource name `{name}` in `{segment}`")));
        }
    }
    let count = match count {
        Some(c) => c
            .parse::<u64>()
            .map_err(|_| err(format!("bad count `{c}` in `{segment}`")))?,
        None => 1,
    };

    Ok(Resource {
        resource_type: resource_type.to_string(),
        name: name.map(str::to_string),
        count,
        qualifier,
    })
}

fn is_count(part: &str) -> bool {
    !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn resource(ty: &str, name: Option<&str>, count: u64, qualifier: Option<&str>) -> Resource {
        Resource {
            resource_type: ty.to_string(),
            name: name.map(str::to_string),
            count,
            qualifier: qualifier.map(str::to_string),
        }
    }

    #[test]
    fn full_segment() {
        assert_eq!(
            decode_resource_list("gpu:rtx8000:8(S:0-1)").unwrap(),
            vec![resource("gpu", Some("rtx8000"), 8, Some("S:0-1"))]
        );
    }

    #[rstest]
    #[case::bare("gpu", resource("gpu", None, 1, None))]
    #[case::count_only("tpu:0", resource("tpu", None, 0, None))]
    #[case::name_only("gpu:rtx8000", resource("gpu", Some("rtx8000"), 1, None))]
    #[case::dashed_name(
        "gpu:nvidia_a100-sxm4-80gb:4",
        resource("gpu", Some("nvidia_a100-sxm4-80gb"), 4, None)
    )]
    #[case::qualifier_with_comma("gpu:2(IDX:0,3)", resource("gpu", None, 2, Some("IDX:0,3")))]
    fn single_segments(#[case] input: &str, #[case] expected: Resource) {
        assert_eq!(decode_resource_list(input).unwrap(), vec![expected]);
    }

    #[test]
    fn keeps_segment_order() {
        let decoded = decode_resource_list("gpu:rtx8000:8(IDX:0-7),tpu:0").unwrap();
        assert_eq!(
            decoded,
            vec![
                resource("gpu", Some("rtx8000"), 8, Some("IDX:0-7")),
                resource("tpu", None, 0, None),
            ]
        );
    }

    #[rstest]
    #[case("")]
    #[case("(null)")]
    #[case("N/A")]
    fn empty_markers(#[case] input: &str) {
        assert!(decode_resource_list(input).unwrap().is_empty());
    }

    #[rstest]
    #[case::empty_segment("gpu:2,,tpu:1")]
    #[case::trailing_comma("gpu:2,")]
    #[case::open_paren("gpu:2(S:0-1")]
    #[case::close_paren("gpu:2)S")]
    #[case::nested_paren("gpu:2(S:(0))")]
    #[case::text_after_qualifier("gpu:2(S:0)x")]
    #[case::bad_count("gpu:a100:many")]
    #[case::too_many_parts("gpu:a100:2:3")]
    #[case::bad_type("9gpu:2")]
    #[case::empty_name("gpu::2")]
    fn malformed_segments_fail(#[case] input: &str) {
        let err = decode_resource_list(input).unwrap_err();
        assert_eq!(err.grammar, Grammar::ResourceList);
    }
}
