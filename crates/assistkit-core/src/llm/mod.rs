//! LLM ports: chat completion clients and token credentials.

pub mod credential;
pub mod provider;

pub use credential::{BearerTokenProvider, COGNITIVE_SERVICES_SCOPE, TokenCredential};
pub use provider::ChatCompletionClient;
