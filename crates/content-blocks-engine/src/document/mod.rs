//! Versioned content-blocks documents.
//!
//! A stored value looks like:
//!
//! ```json
//! {
//!   "version": 2,
//!   "header": { "definitionId": "...", "content": [ ... ] },
//!   "blocks": [ { "definitionId": "...", "content": [ ... ] } ]
//! }
//! ```
//!
//! Only version 2 is understood. Anything else, including values that are
//! not JSON objects at all, is [`Ingest::Opaque`] and must be passed through
//! untouched.

mod block;

use serde_json::{Map, Value};

pub use block::{Block, BlockMut};

pub const SUPPORTED_VERSION: i64 = 2;

const VERSION: &str = "version";
const HEADER: &str = "header";
const BLOCKS: &str = "blocks";

/// Why a value was not treated as a supported document
#[derive(Debug, Clone, PartialEq)]
pub enum OpaqueReason {
    NotJson,
    UnsupportedVersion(Option<i64>),
}

/// Outcome of reading a raw property value
#[derive(Debug)]
pub enum Ingest {
    Null,
    Opaque { text: String, reason: OpaqueReason },
    Supported(BlockDocument),
}

/// A parsed version 2 document
#[derive(Debug, Clone, PartialEq)]
pub struct BlockDocument {
    root: Map<String, Value>,
}

impl BlockDocument {
    /// Read a raw value, which may be JSON text or an already parsed object
    pub fn ingest(value: &Value) -> Ingest {
        let root = match value {
            Value::Null => return Ingest::Null,
            Value::String(text) => match parse_object(text) {
                Some(root) => root,
                None => {
                    return Ingest::Opaque {
                        text: text.clone(),
                        reason: OpaqueReason::NotJson,
                    };
                }
            },
            Value::Object(root) => root.clone(),
            other => {
                return Ingest::Opaque {
                    text: other.to_string(),
                    reason: OpaqueReason::NotJson,
                };
            }
        };

        let version = read_version(&root);
        if version != Some(SUPPORTED_VERSION) {
            return Ingest::Opaque {
                text: text_form(value),
                reason: OpaqueReason::UnsupportedVersion(version),
            };
        }

        Ingest::Supported(Self { root })
    }

    pub fn version(&self) -> Option<i64> {
        read_version(&self.root)
    }

    /// The selected block, if there is one and it is an object
    pub fn header(&self) -> Option<Block<'_>> {
        self.root.get(HEADER).and_then(Block::from_value)
    }

    /// Block variants in document order; non-object entries are skipped
    pub fn blocks(&self) -> impl Iterator<Item = Block<'_>> {
        self.root
            .get(BLOCKS)
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Block::from_value)
    }

    /// Number of entries in `blocks`, block-shaped or not
    pub fn block_count(&self) -> usize {
        self.root
            .get(BLOCKS)
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    pub fn header_mut(&mut self) -> Option<BlockMut<'_>> {
        self.root.get_mut(HEADER).and_then(BlockMut::from_value)
    }

    /// Mutable block views; entries that are not objects keep their slot
    pub fn blocks_mut(&mut self) -> impl Iterator<Item = BlockMut<'_>> {
        self.root
            .get_mut(BLOCKS)
            .and_then(Value::as_array_mut)
            .into_iter()
            .flatten()
            .filter_map(BlockMut::from_value)
    }

    /// Indented JSON, keys in their original order
    pub fn to_pretty_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.root)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }
}

/// The value's text as the host would see it
pub fn text_form(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn parse_object(text: &str) -> Option<Map<String, Value>> {
    let trimmed = text.trim_start();
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return None;
    }
    match serde_json::from_str(text) {
        Ok(Value::Object(root)) => Some(root),
        _ => None,
    }
}

fn read_version(root: &Map<String, Value>) -> Option<i64> {
    match root.get(VERSION)? {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn supported(value: &Value) -> BlockDocument {
        match BlockDocument::ingest(value) {
            Ingest::Supported(doc) => doc,
            other => panic!("expected a supported document, got {other:?}"),
        }
    }

    #[test]
    fn test_null_is_null() {
        assert!(matches!(BlockDocument::ingest(&Value::Null), Ingest::Null));
    }

    #[rstest]
    #[case("")]
    #[case("plain text")]
    #[case("{not json")]
    #[case("[1, 2, 3]")]
    #[case("  \"quoted\"")]
    fn test_non_object_text_is_opaque(#[case] text: &str) {
        match BlockDocument::ingest(&json!(text)) {
            Ingest::Opaque { text: out, reason } => {
                assert_eq!(out, text);
                assert_eq!(reason, OpaqueReason::NotJson);
            }
            other => panic!("expected opaque, got {other:?}"),
        }
    }

    #[test]
    fn test_non_object_json_value_is_opaque() {
        match BlockDocument::ingest(&json!(17)) {
            Ingest::Opaque { text, reason } => {
                assert_eq!(text, "17");
                assert_eq!(reason, OpaqueReason::NotJson);
            }
            other => panic!("expected opaque, got {other:?}"),
        }
    }

    #[rstest]
    #[case(r#"{"header": {}}"#, None)]
    #[case(r#"{"version": 1}"#, Some(1))]
    #[case(r#"{"version": 3, "blocks": []}"#, Some(3))]
    #[case(r#"{"version": "two"}"#, None)]
    #[case(r#"{"version": 2.5}"#, None)]
    #[case(r#"{"version": null}"#, None)]
    fn test_other_versions_are_opaque(#[case] text: &str, #[case] found: Option<i64>) {
        match BlockDocument::ingest(&json!(text)) {
            Ingest::Opaque { text: out, reason } => {
                assert_eq!(out, text);
                assert_eq!(reason, OpaqueReason::UnsupportedVersion(found));
            }
            other => panic!("expected opaque, got {other:?}"),
        }
    }

    #[test]
    fn test_structured_value_with_wrong_version_keeps_compact_text() {
        let value = json!({"version": 3, "header": {"content": []}});
        match BlockDocument::ingest(&value) {
            Ingest::Opaque { text, .. } => {
                assert_eq!(text, r#"{"version":3,"header":{"content":[]}}"#)
            }
            other => panic!("expected opaque, got {other:?}"),
        }
    }

    #[rstest]
    #[case(json!(r#"{"version": 2}"#))]
    #[case(json!(r#"  {"version": "2"}"#))]
    #[case(json!({"version": 2}))]
    #[case(json!(r#"{"version": 2.0, "header": {"content": []}}"#))]
    fn test_version_two_is_supported(#[case] value: Value) {
        assert_eq!(supported(&value).version(), Some(2));
    }

    #[test]
    fn test_header_and_blocks_views() {
        let doc = supported(&json!({
            "version": 2,
            "header": {"definitionId": "3cffc1a4-1359-4f99-8a23-9b61b4f9e969"},
            "blocks": [
                {"definitionId": "a"},
                "not a block",
                {"definitionId": "b"}
            ]
        }));

        assert_eq!(
            doc.header().unwrap().raw_definition_id(),
            Some("3cffc1a4-1359-4f99-8a23-9b61b4f9e969")
        );
        let ids: Vec<_> = doc.blocks().map(|b| b.raw_definition_id()).collect();
        assert_eq!(ids, vec![Some("a"), Some("b")]);
        assert_eq!(doc.block_count(), 3);
    }

    #[test]
    fn test_missing_regions() {
        let mut doc = supported(&json!({"version": 2, "blocks": {"not": "an array"}}));
        assert!(doc.header().is_none());
        assert_eq!(doc.blocks().count(), 0);
        assert_eq!(doc.blocks_mut().count(), 0);
        assert!(doc.header_mut().is_none());
    }

    #[test]
    fn test_pretty_output_keeps_key_order() {
        let doc = supported(&json!(r#"{"version":2,"zeta":1,"alpha":[true]}"#));
        assert_eq!(
            doc.to_pretty_string().unwrap(),
            "{\n  \"version\": 2,\n  \"zeta\": 1,\n  \"alpha\": [\n    true\n  ]\n}"
        );
    }
}
