//! Application state shared by CLI commands.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use assistkit_infra::config::load_assistant_config;
use assistkit_infra::filesystem::resolve_data_dir;
use assistkit_infra::llm::{AzureTokenProvider, ClientOptions, ClientSecretCredential, LlmConfig};
use assistkit_types::config::{AssistantConfigModel, AzureAuthConfig, ServiceConfig};

pub struct AppState {
    pub data_dir: PathBuf,
    pub config: AssistantConfigModel,
}

impl AppState {
    /// Resolve the data directory and load the effective configuration.
    ///
    /// A missing or unreadable `config.toml` yields the defaults.
    pub async fn init(data_dir: Option<PathBuf>) -> Self {
        let data_dir = data_dir.unwrap_or_else(resolve_data_dir);
        let config = load_assistant_config(&data_dir).await;
        tracing::debug!(
            data_dir = %data_dir.display(),
            service = config.service_config.service_type_display_name(),
            "application state initialized"
        );
        Self { data_dir, config }
    }

    /// Token provider for Azure identity auth; `None` for key-based services.
    pub fn token_provider(&self) -> Result<Option<Arc<AzureTokenProvider>>> {
        match &self.config.service_config {
            ServiceConfig::AzureOpenai(azure) if azure.auth_config == AzureAuthConfig::Identity => {
                let credential = ClientSecretCredential::from_env()
                    .context("Azure identity authentication needs a service principal")?;
                Ok(Some(Arc::new(AzureTokenProvider::cognitive_services(credential))))
            }
            _ => Ok(None),
        }
    }

    pub fn llm_config(&self, options: ClientOptions) -> Result<LlmConfig> {
        let token_provider = self.token_provider()?;
        LlmConfig::from_assistant_config(&self.config, options, token_provider)
            .context("assistant configuration cannot build an LLM client")
    }
}
