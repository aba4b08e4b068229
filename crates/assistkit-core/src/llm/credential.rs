//! Token credentials and the process-scoped bearer token provider.
//!
//! Azure identity authentication needs a fresh bearer token on every request.
//! [`BearerTokenProvider`] wraps a [`TokenCredential`] and caches the last
//! token until shortly before it expires. Construct one at startup, share it
//! through an `Arc` with every client that needs it, and drop it at shutdown.

use chrono::{Duration, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use assistkit_types::llm::{AccessToken, LlmError};
use assistkit_types::secret::Redacted;

/// OAuth scope for Azure Cognitive Services (Azure OpenAI).
pub const COGNITIVE_SERVICES_SCOPE: &str = "https://cognitiveservices.azure.com/.default";

/// Tokens are refreshed once they are this close to expiry.
const DEFAULT_REFRESH_MARGIN_SECS: i64 = 300;

/// Source of access tokens for a scope.
pub trait TokenCredential: Send + Sync {
    fn get_token(
        &self,
        scope: &str,
    ) -> impl std::future::Future<Output = Result<AccessToken, LlmError>> + Send;
}

/// Caching bearer token provider for one scope.
///
/// Only one refresh runs at a time; concurrent callers wait on the lock and
/// then reuse the refreshed token.
pub struct BearerTokenProvider<C> {
    credential: C,
    scope: String,
    refresh_margin: Duration,
    cached: Mutex<Option<AccessToken>>,
}

impl<C: TokenCredential> BearerTokenProvider<C> {
    pub fn new(credential: C, scope: impl Into<String>) -> Self {
        Self {
            credential,
            scope: scope.into(),
            refresh_margin: Duration::seconds(DEFAULT_REFRESH_MARGIN_SECS),
            cached: Mutex::new(None),
        }
    }

    /// Provider for the Azure OpenAI scope.
    pub fn cognitive_services(credential: C) -> Self {
        Self::new(credential, COGNITIVE_SERVICES_SCOPE)
    }

    pub fn with_refresh_margin(mut self, margin: Duration) -> Self {
        self.refresh_margin = margin;
        self
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Return a valid bearer token, fetching a new one if needed.
    pub async fn bearer_token(&self) -> Result<Redacted, LlmError> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.expires_at - self.refresh_margin > Utc::now() {
                return Ok(token.token.clone());
            }
        }

        debug!(scope = %self.scope, "fetching bearer token");
        let token = self.credential.get_token(&self.scope).await?;
        let value = token.token.clone();
        *cached = Some(token);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct CountingCredential {
        calls: AtomicUsize,
        lifetime: Duration,
    }

    impl CountingCredential {
        fn new(lifetime: Duration) -> Self {
            Self { calls: AtomicUsize::new(0), lifetime }
        }
    }

    impl TokenCredential for CountingCredential {
        async fn get_token(&self, scope: &str) -> Result<AccessToken, LlmError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(AccessToken::new(format!("{scope}#{n}"), Utc::now() + self.lifetime))
        }
    }

    struct FailingCredential;

    impl TokenCredential for FailingCredential {
        async fn get_token(&self, _scope: &str) -> Result<AccessToken, LlmError> {
            Err(LlmError::Credential("no identity available".into()))
        }
    }

    #[tokio::test]
    async fn test_token_is_cached_until_near_expiry() {
        let provider = BearerTokenProvider::new(CountingCredential::new(Duration::hours(1)), "scope");

        let first = provider.bearer_token().await.unwrap();
        let second = provider.bearer_token().await.unwrap();

        assert_eq!(first.expose(), "scope#1");
        assert_eq!(second.expose(), "scope#1");
        assert_eq!(provider.credential.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_token_inside_refresh_margin_is_refetched() {
        let provider = BearerTokenProvider::new(CountingCredential::new(Duration::minutes(2)), "scope");

        provider.bearer_token().await.unwrap();
        let second = provider.bearer_token().await.unwrap();

        assert_eq!(second.expose(), "scope#2");
        assert_eq!(provider.credential.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_custom_margin_keeps_short_lived_token() {
        let provider = BearerTokenProvider::new(CountingCredential::new(Duration::minutes(2)), "scope")
            .with_refresh_margin(Duration::seconds(10));

        provider.bearer_token().await.unwrap();
        provider.bearer_token().await.unwrap();

        assert_eq!(provider.credential.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cognitive_services_scope() {
        let provider = BearerTokenProvider::cognitive_services(CountingCredential::new(Duration::hours(1)));
        assert_eq!(provider.scope(), COGNITIVE_SERVICES_SCOPE);
        let token = provider.bearer_token().await.unwrap();
        assert!(token.expose().starts_with(COGNITIVE_SERVICES_SCOPE));
    }

    #[tokio::test]
    async fn test_credential_failure_propagates() {
        let provider = BearerTokenProvider::new(FailingCredential, "scope");
        let err = provider.bearer_token().await.unwrap_err();
        assert!(matches!(err, LlmError::Credential(_)));
    }
}
