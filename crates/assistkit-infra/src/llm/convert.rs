//! Mapping between assistkit LLM types and the `async_openai` chat types.
//!
//! OpenAI and Azure OpenAI share the chat completions wire format, so the
//! request body, the response and the error envelope all use the
//! `async_openai` definitions.

use async_openai::error::ApiError;
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest, CreateChatCompletionResponse,
    FinishReason,
};
use serde::Deserialize;

use assistkit_types::llm::{ChatCompletionRequest, ChatCompletionResponse, ChatRole, LlmError, Usage};

/// Build a [`CreateChatCompletionRequest`] from a [`ChatCompletionRequest`].
///
/// Uses `max_tokens` rather than `max_completion_tokens`; older Azure API
/// versions reject the latter.
pub fn build_request(request: &ChatCompletionRequest) -> CreateChatCompletionRequest {
    let messages = request
        .messages
        .iter()
        .map(|msg| match msg.role {
            ChatRole::System => ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                content: ChatCompletionRequestSystemMessageContent::Text(msg.content.clone()),
                name: None,
            }),
            ChatRole::User => ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                content: ChatCompletionRequestUserMessageContent::Text(msg.content.clone()),
                name: None,
            }),
            ChatRole::Assistant => {
                #[allow(deprecated)]
                ChatCompletionRequestMessage::Assistant(ChatCompletionRequestAssistantMessage {
                    content: Some(ChatCompletionRequestAssistantMessageContent::Text(msg.content.clone())),
                    refusal: None,
                    name: None,
                    audio: None,
                    tool_calls: None,
                    function_call: None,
                })
            }
        })
        .collect();

    #[allow(deprecated)]
    CreateChatCompletionRequest {
        model: request.model.clone(),
        messages,
        max_tokens: request.max_tokens,
        temperature: request.temperature.map(|t| t as f32),
        ..Default::default()
    }
}

/// Convert a [`CreateChatCompletionResponse`] using its first choice.
pub fn completion_from_response(response: CreateChatCompletionResponse) -> Result<ChatCompletionResponse, LlmError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::Deserialization("response contained no choices".into()))?;

    let finish_reason = choice.finish_reason.map(|fr| {
        match fr {
            FinishReason::Stop => "stop",
            FinishReason::Length => "length",
            FinishReason::ToolCalls => "tool_calls",
            FinishReason::ContentFilter => "content_filter",
            FinishReason::FunctionCall => "function_call",
        }
        .to_string()
    });

    let usage = response
        .usage
        .map(|u| Usage { input_tokens: u.prompt_tokens, output_tokens: u.completion_tokens })
        .unwrap_or_default();

    Ok(ChatCompletionResponse {
        id: response.id,
        model: response.model,
        content: choice.message.content.unwrap_or_default(),
        finish_reason,
        usage,
    })
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

/// Map a non-2xx response to an [`LlmError`].
///
/// The status code decides auth and rate-limit failures; otherwise the
/// OpenAI error envelope is used for the message when the body carries one.
pub fn map_status_error(status: reqwest::StatusCode, retry_after_ms: Option<u64>, body: &str) -> LlmError {
    match status.as_u16() {
        401 => return LlmError::AuthenticationFailed,
        429 => return LlmError::RateLimited { retry_after_ms },
        _ => {}
    }

    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(ErrorEnvelope { error }) => {
            let code = error.code.as_deref().unwrap_or("");
            let error_type = error.r#type.as_deref().unwrap_or("");
            if code == "authentication_error" || error_type == "authentication_error" {
                LlmError::AuthenticationFailed
            } else if code == "rate_limit_exceeded" || error_type == "rate_limit_error" {
                LlmError::RateLimited { retry_after_ms }
            } else {
                LlmError::Provider {
                    message: format!("HTTP {status}: {}", error.message),
                }
            }
        }
        Err(_) => LlmError::Provider {
            message: format!("HTTP {status}: {body}"),
        },
    }
}
