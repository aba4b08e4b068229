//! Inspector state data model handed to the host UI.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key under which read-only inspectors publish their rendered snapshot.
pub const CONTENT_KEY: &str = "content";

/// Payload returned by an inspector for one conversation.
///
/// The host renders `data` verbatim; read-only inspectors put a single
/// preformatted string under [`CONTENT_KEY`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InspectorState {
    pub data: Map<String, Value>,
}

impl InspectorState {
    /// Build a state holding one rendered content block.
    pub fn with_content(content: impl Into<String>) -> Self {
        let mut data = Map::new();
        data.insert(CONTENT_KEY.to_string(), Value::String(content.into()));
        Self { data }
    }

    /// The rendered content block, if present.
    pub fn content(&self) -> Option<&str> {
        self.data.get(CONTENT_KEY).and_then(Value::as_str)
    }
}
