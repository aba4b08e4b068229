//! Filesystem adapters for assistkit.
//!
//! Implements the `FileSystem` trait from `assistkit-core` for real
//! filesystem I/O, and the per-conversation storage layout.

use std::path::{Path, PathBuf};

use assistkit_core::service::fs::FileSystem;
use assistkit_types::conversation::ConversationContext;

/// Local filesystem implementation of the `FileSystem` trait.
///
/// All operations go through `tokio::fs` for async I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    pub fn new() -> Self {
        Self
    }

    /// Compute the assistant directory path: `{data_dir}/assistants/{assistant_id}/`.
    pub fn assistant_dir(data_dir: &Path, assistant_id: &str) -> PathBuf {
        data_dir.join("assistants").join(assistant_id)
    }

    /// Compute the conversation storage directory:
    /// `{data_dir}/assistants/{assistant_id}/conversations/{conversation_id}/`.
    pub fn conversation_dir(data_dir: &Path, context: &ConversationContext) -> PathBuf {
        Self::assistant_dir(data_dir, &context.assistant_id)
            .join("conversations")
            .join(context.conversation_id.to_string())
    }
}

impl FileSystem for LocalFileSystem {
    async fn read_file(&self, path: &Path) -> Result<String, std::io::Error> {
        tokio::fs::read_to_string(path).await
    }
}

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `ASSISTKIT_DATA_DIR` environment variable
/// 2. `~/.assistkit`
/// 3. `.assistkit` in the current directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("ASSISTKIT_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".assistkit");
    }

    PathBuf::from(".assistkit")
}

#[cfg(test)]
mod tests {
    use super::*;
    use assistkit_types::conversation::ConversationId;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_read_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("state.json");
        tokio::fs::write(&file_path, "{}").await.unwrap();

        let content = LocalFileSystem::new().read_file(&file_path).await.unwrap();
        assert_eq!(content, "{}");
    }

    #[tokio::test]
    async fn test_read_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let err = LocalFileSystem::new()
            .read_file(&dir.path().join("missing.json"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_conversation_dir_layout() {
        let id = ConversationId::new();
        let ctx = ConversationContext::new("prospector", id.clone());
        let dir = LocalFileSystem::conversation_dir(Path::new("/data"), &ctx);
        assert_eq!(
            dir,
            PathBuf::from(format!("/data/assistants/prospector/conversations/{id}"))
        );
    }
}
