//! Per-assistant LLM settings: a client factory plus request defaults.

use std::sync::Arc;

use assistkit_types::config::AssistantConfigModel;
use assistkit_types::llm::{ChatCompletionRequest, ChatMessage, LlmError};

use super::client::OpenAiChatClient;
use super::credential::AzureTokenProvider;
use super::{ClientOptions, create_client};

/// Default completion budget for a single response.
pub const DEFAULT_MAX_RESPONSE_TOKENS: u32 = 4_096;

/// Builds a fresh chat client on demand.
pub type ClientFactory = Arc<dyn Fn() -> Result<OpenAiChatClient, LlmError> + Send + Sync>;

/// LLM settings shared by the parts of an assistant that call the model.
#[derive(Clone)]
pub struct LlmConfig {
    pub client_factory: ClientFactory,
    pub openai_model: String,
    pub max_response_tokens: u32,
}

impl LlmConfig {
    /// Derive settings from an assistant configuration.
    ///
    /// The service configuration is validated up front so a broken config
    /// fails here rather than on the first model call.
    pub fn from_assistant_config(
        config: &AssistantConfigModel,
        options: ClientOptions,
        token_provider: Option<Arc<AzureTokenProvider>>,
    ) -> Result<Self, LlmError> {
        config.service_config.validate()?;

        let service = config.service_config.clone();
        let client_factory: ClientFactory =
            Arc::new(move || create_client(&service, &options, token_provider.clone()));

        Ok(Self {
            client_factory,
            openai_model: config.chat_driver_config.openai_model.clone(),
            max_response_tokens: DEFAULT_MAX_RESPONSE_TOKENS,
        })
    }

    pub fn with_max_response_tokens(mut self, max_response_tokens: u32) -> Self {
        self.max_response_tokens = max_response_tokens;
        self
    }

    pub fn new_client(&self) -> Result<OpenAiChatClient, LlmError> {
        (self.client_factory)()
    }

    /// Request for the configured model with the configured token budget.
    pub fn request(&self, messages: Vec<ChatMessage>) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.openai_model.clone(),
            messages,
            max_tokens: Some(self.max_response_tokens),
            temperature: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assistkit_core::llm::ChatCompletionClient;
    use assistkit_types::config::{OpenAiServiceConfig, ServiceConfig};
    use assistkit_types::error::ConfigError;
    use assistkit_types::secret::Redacted;

    fn openai_config(key: &str) -> AssistantConfigModel {
        let mut config = AssistantConfigModel::default();
        config.chat_driver_config.openai_model = "gpt-4o-mini".into();
        config.service_config = ServiceConfig::Openai(OpenAiServiceConfig {
            openai_api_key: Redacted::new(key),
            openai_organization_id: String::new(),
        });
        config
    }

    #[test]
    fn test_from_assistant_config_builds_clients() {
        let llm = LlmConfig::from_assistant_config(&openai_config("sk-test"), ClientOptions::default(), None)
            .unwrap();
        assert_eq!(llm.openai_model, "gpt-4o-mini");
        assert_eq!(llm.max_response_tokens, DEFAULT_MAX_RESPONSE_TOKENS);

        let client = llm.new_client().unwrap();
        assert_eq!(client.name(), "openai");
        assert_eq!(client.url(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn test_from_assistant_config_rejects_missing_key() {
        let result = LlmConfig::from_assistant_config(&openai_config(""), ClientOptions::default(), None);
        assert!(matches!(
            result,
            Err(LlmError::Config(ConfigError::MissingField("openai_api_key")))
        ));
    }

    #[test]
    fn test_request_uses_model_and_budget() {
        let llm = LlmConfig::from_assistant_config(&openai_config("sk-test"), ClientOptions::default(), None)
            .unwrap()
            .with_max_response_tokens(256);
        let request = llm.request(vec![ChatMessage::user("Hi")]);
        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.max_tokens, Some(256));
        assert_eq!(request.messages.len(), 1);
    }
}
