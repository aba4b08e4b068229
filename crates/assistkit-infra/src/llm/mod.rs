//! LLM client wiring for OpenAI and Azure OpenAI.
//!
//! [`create_client`] turns a [`ServiceConfig`] into an [`OpenAiChatClient`],
//! and [`test_connection`] sends a minimal completion to verify credentials
//! and endpoint.

pub mod client;
pub mod config;
pub mod convert;
pub mod credential;

use std::sync::Arc;
use std::time::Duration;

use secrecy::SecretString;

use assistkit_core::llm::ChatCompletionClient;
use assistkit_types::config::{AzureAuthConfig, ServiceConfig};
use assistkit_types::llm::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, LlmError};

pub use client::{ClientAuth, OpenAiChatClient};
pub use config::LlmConfig;
pub use credential::{AzureTokenProvider, ClientSecretCredential};

/// Azure OpenAI REST API version used unless overridden.
pub const DEFAULT_API_VERSION: &str = "2024-02-15-preview";

/// OpenAI API base URL.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Transport options that are not part of the assistant configuration.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub api_version: String,
    pub openai_base_url: String,
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_version: DEFAULT_API_VERSION.to_string(),
            openai_base_url: OPENAI_BASE_URL.to_string(),
            timeout: Duration::from_secs(300),
        }
    }
}

/// Create a chat client for the configured service.
///
/// Azure identity auth needs `token_provider`; without one the call fails
/// with [`LlmError::AuthenticationFailed`].
pub fn create_client(
    service: &ServiceConfig,
    options: &ClientOptions,
    token_provider: Option<Arc<AzureTokenProvider>>,
) -> Result<OpenAiChatClient, LlmError> {
    service.validate()?;

    match service {
        ServiceConfig::Openai(openai) => OpenAiChatClient::openai(
            SecretString::from(openai.openai_api_key.expose().to_string()),
            &options.openai_base_url,
            Some(openai.openai_organization_id.clone()),
            options.timeout,
        ),
        ServiceConfig::AzureOpenai(azure) => {
            let auth = match &azure.auth_config {
                AzureAuthConfig::ApiKey { azure_openai_api_key } => {
                    ClientAuth::AzureApiKey(SecretString::from(azure_openai_api_key.expose().to_string()))
                }
                AzureAuthConfig::Identity => {
                    ClientAuth::AzureIdentity(token_provider.ok_or(LlmError::AuthenticationFailed)?)
                }
            };
            OpenAiChatClient::azure(
                &azure.azure_openai_endpoint,
                &azure.azure_openai_deployment,
                &options.api_version,
                auth,
                options.timeout,
            )
        }
    }
}

/// Verify connectivity by sending a tiny "Hello" completion.
pub async fn test_connection<C: ChatCompletionClient>(
    client: &C,
    model: &str,
) -> Result<ChatCompletionResponse, LlmError> {
    let request = ChatCompletionRequest {
        model: model.to_string(),
        messages: vec![ChatMessage::user("Hello")],
        max_tokens: Some(10),
        temperature: Some(0.0),
    };
    client.complete(&request).await
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use assistkit_types::config::{AzureOpenAiServiceConfig, OpenAiServiceConfig};
    use assistkit_types::error::ConfigError;
    use assistkit_types::secret::Redacted;

    fn azure(auth_config: AzureAuthConfig) -> ServiceConfig {
        ServiceConfig::AzureOpenai(AzureOpenAiServiceConfig {
            auth_config,
            azure_openai_endpoint: "https://contoso.openai.azure.com".into(),
            azure_openai_deployment: "gpt-4o".into(),
        })
    }

    #[test]
    fn test_create_client_azure_api_key() {
        let service = azure(AzureAuthConfig::ApiKey { azure_openai_api_key: Redacted::new("key") });
        let client = create_client(&service, &ClientOptions::default(), None).unwrap();
        assert_eq!(client.name(), "azure_openai");
        assert!(client.url().ends_with("?api-version=2024-02-15-preview"));
    }

    #[test]
    fn test_create_client_identity_requires_token_provider() {
        let result = create_client(&azure(AzureAuthConfig::Identity), &ClientOptions::default(), None);
        assert!(matches!(result, Err(LlmError::AuthenticationFailed)));
    }

    #[test]
    fn test_create_client_rejects_missing_endpoint() {
        let service = ServiceConfig::AzureOpenai(AzureOpenAiServiceConfig {
            auth_config: AzureAuthConfig::Identity,
            azure_openai_endpoint: String::new(),
            azure_openai_deployment: "gpt-4o".into(),
        });
        let result = create_client(&service, &ClientOptions::default(), None);
        assert!(matches!(
            result,
            Err(LlmError::Config(ConfigError::MissingField("azure_openai_endpoint")))
        ));
    }

    #[test]
    fn test_create_client_custom_api_version() {
        let service = azure(AzureAuthConfig::ApiKey { azure_openai_api_key: Redacted::new("key") });
        let options = ClientOptions { api_version: "2024-06-01".into(), ..ClientOptions::default() };
        let client = create_client(&service, &options, None).unwrap();
        assert!(client.url().ends_with("?api-version=2024-06-01"));
    }

    #[tokio::test]
    async fn test_connection_sends_hello() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/chat/completions")
                    .body_contains("\"Hello\"");
                then.status(200).json_body(json!({
                    "id": "chatcmpl-1",
                    "object": "chat.completion",
                    "created": 1_700_000_000,
                    "model": "gpt-4o",
                    "choices": [{"index": 0, "message": {"role": "assistant", "content": "Hi!"}, "finish_reason": "stop"}]
                }));
            })
            .await;

        let service = ServiceConfig::Openai(OpenAiServiceConfig {
            openai_api_key: Redacted::new("sk-test"),
            openai_organization_id: String::new(),
        });
        let options = ClientOptions { openai_base_url: server.base_url(), ..ClientOptions::default() };
        let client = create_client(&service, &options, None).unwrap();

        let response = test_connection(&client, "gpt-4o").await.unwrap();
        mock.assert_async().await;
        assert_eq!(response.content, "Hi!");
    }
}
