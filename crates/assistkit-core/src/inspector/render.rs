//! Parsing and rendering of structured state documents.
//!
//! State files are JSON objects written by other components. For display they
//! are re-serialized as block-style YAML, which is easier to scan than JSON,
//! and wrapped in a fenced `yaml` block the host renders verbatim. Key order
//! is taken from the source document.

use std::path::Path;

use serde_json::{Map, Value};

use assistkit_types::error::InspectorError;

use crate::service::hash::ContentHasher;

/// Derive an inspector identity from its kind and display name.
///
/// The same `(kind, display_name)` pair yields the same identity in every
/// process.
pub fn derive_state_id(kind: &str, display_name: &str, hasher: &impl ContentHasher) -> String {
    hasher.compute_hash(&format!("{kind}_{display_name}"))
}

/// Parse the text of a state file into a mapping.
///
/// `path` is only used for error context.
pub fn parse_state_document(path: &Path, text: &str) -> Result<Map<String, Value>, InspectorError> {
    let value: Value = serde_json::from_str(text).map_err(|source| InspectorError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(InspectorError::NotAMapping {
            path: path.to_path_buf(),
            found: json_kind(&other),
        }),
    }
}

/// Render a mapping as a fenced YAML block.
pub fn render_yaml_block(state: &Map<String, Value>) -> Result<String, InspectorError> {
    let yaml = serde_yaml_ng::to_string(state)?;
    Ok(format!("```yaml\n{yaml}\n```"))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct LengthHasher;

    impl ContentHasher for LengthHasher {
        fn compute_hash(&self, content: &str) -> String {
            format!("{}:{content}", content.len())
        }
    }

    fn body(block: &str) -> &str {
        block
            .strip_prefix("```yaml\n")
            .and_then(|rest| rest.strip_suffix("\n```"))
            .expect("fenced yaml block")
    }

    fn parse(text: &str) -> Result<Map<String, Value>, InspectorError> {
        parse_state_document(Path::new("state.json"), text)
    }

    #[test]
    fn test_state_id_hashes_kind_and_name() {
        let id = derive_state_id("FileStateInspector", "Form State", &LengthHasher);
        assert_eq!(id, "29:FileStateInspector_Form State");
    }

    #[test]
    fn test_empty_mapping_renders_braces() {
        let block = render_yaml_block(&Map::new()).unwrap();
        assert_eq!(block, "```yaml\n{}\n\n```");
    }

    #[test]
    fn test_render_preserves_source_key_order() {
        let state = parse(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let block = render_yaml_block(&state).unwrap();
        let z = block.find("z:").unwrap();
        let a = block.find("a:").unwrap();
        let m = block.find("m:").unwrap();
        assert!(z < a && a < m, "keys re-ordered: {block}");
    }

    #[test]
    fn test_render_is_block_style() {
        let state = parse(r#"{"a": 1, "b": ["x", "y"]}"#).unwrap();
        let block = render_yaml_block(&state).unwrap();
        assert_eq!(body(&block), "a: 1\nb:\n- x\n- y\n");
    }

    #[test]
    fn test_rendered_body_decodes_to_source() {
        let source = r#"{"step": "collect_name", "fields": {"name": "Ada", "tags": [1, 2]}}"#;
        let state = parse(source).unwrap();
        let block = render_yaml_block(&state).unwrap();
        let decoded: Value = serde_yaml_ng::from_str(body(&block)).unwrap();
        let expected: Value = serde_json::from_str(source).unwrap();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_truncated_json_is_malformed() {
        let err = parse(r#"{"step": "collect"#).unwrap_err();
        assert!(matches!(err, InspectorError::Malformed { .. }));
    }

    #[test]
    fn test_empty_text_is_malformed() {
        assert!(matches!(parse("").unwrap_err(), InspectorError::Malformed { .. }));
    }

    #[test]
    fn test_non_object_is_rejected() {
        match parse("[1, 2]").unwrap_err() {
            InspectorError::NotAMapping { found, .. } => assert_eq!(found, "array"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(
            parse("null").unwrap_err(),
            InspectorError::NotAMapping { found: "null", .. }
        ));
    }
}
