//! OpenAiChatClient -- [`ChatCompletionClient`] for OpenAI and Azure OpenAI.
//!
//! Both services speak the same chat completions wire format (the
//! `async_openai` chat types, see [`super::convert`]); they differ only in URL
//! layout and authentication headers, captured by [`ClientAuth`]. Requests go
//! through reqwest directly so an Entra token can be attached per call.

use std::sync::Arc;
use std::time::Duration;

use async_openai::types::chat::CreateChatCompletionResponse;
use reqwest::header::RETRY_AFTER;
use secrecy::{ExposeSecret, SecretString};
use tracing::Instrument;

use assistkit_core::llm::provider::ChatCompletionClient;
use assistkit_types::llm::{ChatCompletionRequest, ChatCompletionResponse, LlmError};

use super::credential::AzureTokenProvider;
use super::convert::{build_request, completion_from_response, map_status_error};

/// How requests are authenticated.
pub enum ClientAuth {
    /// OpenAI API key, sent as `Authorization: Bearer`.
    Bearer(SecretString),
    /// Azure OpenAI resource key, sent as `api-key`.
    AzureApiKey(SecretString),
    /// Entra ID token, fetched per request from the shared provider.
    AzureIdentity(Arc<AzureTokenProvider>),
}

/// Chat completion client for OpenAI-compatible endpoints.
///
/// Does not derive Debug; the auth variant holds secrets.
pub struct OpenAiChatClient {
    http: reqwest::Client,
    provider_name: &'static str,
    url: String,
    auth: ClientAuth,
    organization: Option<String>,
}

impl OpenAiChatClient {
    /// Client for the OpenAI API at `base_url` (e.g. `https://api.openai.com/v1`).
    pub fn openai(
        api_key: SecretString,
        base_url: &str,
        organization: Option<String>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            http: build_http(timeout)?,
            provider_name: "openai",
            url: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            auth: ClientAuth::Bearer(api_key),
            organization: organization.filter(|org| !org.is_empty()),
        })
    }

    /// Client for an Azure OpenAI deployment.
    pub fn azure(
        endpoint: &str,
        deployment: &str,
        api_version: &str,
        auth: ClientAuth,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        Ok(Self {
            http: build_http(timeout)?,
            provider_name: "azure_openai",
            url: format!(
                "{}/openai/deployments/{deployment}/chat/completions?api-version={api_version}",
                endpoint.trim_end_matches('/')
            ),
            auth,
            organization: None,
        })
    }

    /// Full chat completions URL this client posts to.
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn authorize(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder, LlmError> {
        let builder = match &self.auth {
            ClientAuth::Bearer(key) => builder.bearer_auth(key.expose_secret()),
            ClientAuth::AzureApiKey(key) => builder.header("api-key", key.expose_secret()),
            ClientAuth::AzureIdentity(provider) => {
                let token = provider.bearer_token().await?;
                builder.bearer_auth(token.expose())
            }
        };

        Ok(match &self.organization {
            Some(org) => builder.header("OpenAI-Organization", org),
            None => builder,
        })
    }

    async fn send(&self, request: &ChatCompletionRequest) -> Result<ChatCompletionResponse, LlmError> {
        let body = build_request(request);
        let builder = self.authorize(self.http.post(&self.url)).await?;

        let response = builder.json(&body).send().await.map_err(|e| LlmError::Provider {
            message: format!("HTTP request failed: {e}"),
        })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after_ms = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<u64>().ok())
                .map(|secs| secs * 1000);
            let error_body = response.text().await.unwrap_or_default();
            return Err(map_status_error(status, retry_after_ms, &error_body));
        }

        let oai_response: CreateChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        let completion = completion_from_response(oai_response)?;
        tracing::debug!(
            gen_ai.response.id = %completion.id,
            gen_ai.usage.input_tokens = completion.usage.input_tokens,
            gen_ai.usage.output_tokens = completion.usage.output_tokens,
            "chat completion received"
        );
        Ok(completion)
    }
}

fn build_http(timeout: Duration) -> Result<reqwest::Client, LlmError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| LlmError::Provider {
            message: format!("failed to create HTTP client: {e}"),
        })
}

impl ChatCompletionClient for OpenAiChatClient {
    fn name(&self) -> &str {
        self.provider_name
    }

    async fn complete(&self, request: &ChatCompletionRequest) -> Result<ChatCompletionResponse, LlmError> {
        let span = tracing::info_span!(
            "gen_ai.complete",
            gen_ai.system = self.provider_name,
            gen_ai.request.model = %request.model,
            gen_ai.request.max_tokens = ?request.max_tokens,
        );
        self.send(request).instrument(span).await
    }
}
