//! Conversation inspectors: read-only, named views of per-conversation state.

pub mod provider;
pub mod render;

pub use provider::InspectorStateProvider;
pub use render::{derive_state_id, parse_state_document, render_yaml_block};
