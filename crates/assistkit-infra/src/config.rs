//! Assistant configuration loader.
//!
//! Reads `config.toml` from the data directory and deserializes it into
//! [`AssistantConfigModel`]. The lenient loader used at startup falls back to
//! defaults when the file is missing or malformed; the strict variants are
//! used when the user explicitly asks to validate a file.

use std::path::Path;

use assistkit_types::config::AssistantConfigModel;
use assistkit_types::error::ConfigError;

/// File name of the assistant configuration inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Load assistant configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`AssistantConfigModel::default()`].
/// - If the file exists but fails to read or parse, logs a warning and returns the default.
/// - Otherwise returns the parsed config.
pub async fn load_assistant_config(data_dir: &Path) -> AssistantConfigModel {
    let config_path = data_dir.join(CONFIG_FILE_NAME);

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return AssistantConfigModel::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return AssistantConfigModel::default();
        }
    };

    match parse_assistant_config(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", config_path.display());
            AssistantConfigModel::default()
        }
    }
}

/// Read and parse a configuration file, failing on any error.
pub async fn read_assistant_config(path: &Path) -> Result<AssistantConfigModel, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
    parse_assistant_config(&content)
}

/// Parse configuration TOML.
pub fn parse_assistant_config(content: &str) -> Result<AssistantConfigModel, ConfigError> {
    toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assistkit_types::config::{DEFAULT_WELCOME_MESSAGE, ServiceConfig};
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_assistant_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_assistant_config(tmp.path()).await;
        assert_eq!(config.welcome_message, DEFAULT_WELCOME_MESSAGE);
        assert_eq!(config.chat_driver_config.openai_model, "gpt-4o");
    }

    #[tokio::test]
    async fn load_assistant_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join(CONFIG_FILE_NAME),
            r#"
welcome_message = "Welcome to the intake desk."

[chat_driver_config]
openai_model = "gpt-4o-mini"

[service_config]
service_type = "openai"
openai_api_key = "sk-test"
openai_organization_id = "org-123"
"#,
        )
        .await
        .unwrap();

        let config = load_assistant_config(tmp.path()).await;
        assert_eq!(config.welcome_message, "Welcome to the intake desk.");
        assert_eq!(config.chat_driver_config.openai_model, "gpt-4o-mini");
        assert_eq!(config.chat_driver_config.instructions, "You are a helpful assistant.");
        match config.service_config {
            ServiceConfig::Openai(openai) => {
                assert_eq!(openai.openai_api_key.expose(), "sk-test");
                assert_eq!(openai.openai_organization_id, "org-123");
            }
            other => panic!("expected openai, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn load_assistant_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join(CONFIG_FILE_NAME), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_assistant_config(tmp.path()).await;
        assert_eq!(config.welcome_message, DEFAULT_WELCOME_MESSAGE);
    }

    #[tokio::test]
    async fn read_assistant_config_reports_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = read_assistant_config(&tmp.path().join("nope.toml")).await.unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn parse_assistant_config_rejects_unknown_service() {
        let err = parse_assistant_config(
            r#"
[service_config]
service_type = "mainframe"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn parse_assistant_config_azure_api_key() {
        let config = parse_assistant_config(
            r#"
[service_config]
service_type = "azure_openai"
azure_openai_endpoint = "https://contoso.openai.azure.com"
azure_openai_deployment = "gpt-4o"

[service_config.auth_config]
auth_method = "api-key"
azure_openai_api_key = "azure-key"
"#,
        )
        .unwrap();
        assert!(config.validate().is_ok());
    }
}
