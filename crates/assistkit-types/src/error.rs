use std::path::PathBuf;

use thiserror::Error;

/// Error type returned by an inspector's `locate` function.
pub type LocateError = Box<dyn std::error::Error + Send + Sync>;

/// Errors from reading and rendering inspector state.
#[derive(Debug, Error)]
pub enum InspectorError {
    #[error("inspector display name must not be empty")]
    EmptyDisplayName,

    /// The caller-supplied `locate` function failed; passed through as-is.
    #[error(transparent)]
    Locate(LocateError),

    #[error("failed to read state file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("state file {} is not valid JSON: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("state file {} holds a JSON {found}, expected an object", .path.display())]
    NotAMapping { path: PathBuf, found: &'static str },

    #[error("failed to render state as YAML: {0}")]
    Render(#[from] serde_yaml_ng::Error),
}

/// Errors from loading or validating assistant configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("failed to read configuration {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration: {0}")]
    Parse(String),
}
