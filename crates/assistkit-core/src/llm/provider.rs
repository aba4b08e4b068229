//! ChatCompletionClient trait definition.

use assistkit_types::llm::{ChatCompletionRequest, ChatCompletionResponse, LlmError};

/// Trait for chat completion backends (OpenAI, Azure OpenAI).
///
/// Uses native async fn in traits (RPITIT). Implementations live in
/// assistkit-infra.
pub trait ChatCompletionClient: Send + Sync {
    /// Provider name used in logs and spans (e.g., "openai", "azure_openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &ChatCompletionRequest,
    ) -> impl std::future::Future<Output = Result<ChatCompletionResponse, LlmError>> + Send;
}
