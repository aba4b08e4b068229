//! FileStateInspector -- [`InspectorStateProvider`] backed by a JSON state file.
//!
//! Reads the state file the caller's `locate` function points at for a
//! conversation and returns it as a fenced YAML block. A missing file is the
//! normal state of a conversation that has not produced anything yet and
//! renders as an empty mapping. Every other failure (unreadable file, invalid
//! JSON, a non-object document, a failing `locate`) is returned to the caller.
//!
//! The inspector never writes, never caches, and keeps no state between calls.

use std::path::PathBuf;

use serde_json::Map;
use tracing::trace;

use assistkit_core::inspector::{
    InspectorStateProvider, derive_state_id, parse_state_document, render_yaml_block,
};
use assistkit_core::service::fs::FileSystem;
use assistkit_types::conversation::ConversationContext;
use assistkit_types::error::{InspectorError, LocateError};
use assistkit_types::inspector::InspectorState;

use crate::crypto::hash::Sha256ContentHasher;
use crate::filesystem::LocalFileSystem;

/// Kind string mixed into every `FileStateInspector` identity.
pub const FILE_STATE_INSPECTOR_KIND: &str = "FileStateInspector";

/// Read-only inspector rendering a per-conversation JSON file.
pub struct FileStateInspector<L, F = LocalFileSystem> {
    state_id: String,
    display_name: String,
    description: String,
    locate: L,
    fs: F,
}

impl<L> FileStateInspector<L, LocalFileSystem>
where
    L: Fn(&ConversationContext) -> Result<PathBuf, LocateError> + Send + Sync,
{
    /// Create an inspector reading from the local filesystem.
    ///
    /// Does not touch the filesystem. Fails only for an empty display name.
    pub fn new(display_name: impl Into<String>, locate: L) -> Result<Self, InspectorError> {
        let display_name = display_name.into();
        if display_name.trim().is_empty() {
            return Err(InspectorError::EmptyDisplayName);
        }

        let state_id = derive_state_id(
            FILE_STATE_INSPECTOR_KIND,
            &display_name,
            &Sha256ContentHasher,
        );

        Ok(Self {
            state_id,
            display_name,
            description: String::new(),
            locate,
            fs: LocalFileSystem::new(),
        })
    }
}

impl<L, F> FileStateInspector<L, F> {
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Swap the filesystem the inspector reads through.
    pub fn with_file_system<G: FileSystem>(self, fs: G) -> FileStateInspector<L, G> {
        FileStateInspector {
            state_id: self.state_id,
            display_name: self.display_name,
            description: self.description,
            locate: self.locate,
            fs,
        }
    }
}

impl<L, F> InspectorStateProvider for FileStateInspector<L, F>
where
    L: Fn(&ConversationContext) -> Result<PathBuf, LocateError> + Send + Sync,
    F: FileSystem,
{
    fn state_id(&self) -> &str {
        &self.state_id
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn get(&self, context: &ConversationContext) -> Result<InspectorState, InspectorError> {
        let path = (self.locate)(context).map_err(InspectorError::Locate)?;

        let state = match self.fs.read_file(&path).await {
            Ok(text) => parse_state_document(&path, &text)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                trace!(path = %path.display(), "no state file yet, rendering empty state");
                Map::new()
            }
            Err(source) => return Err(InspectorError::Read { path, source }),
        };

        let content = render_yaml_block(&state)?;
        Ok(InspectorState::with_content(content))
    }
}
