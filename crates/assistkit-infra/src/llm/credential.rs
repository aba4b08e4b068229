//! Azure identity credential using the OAuth2 client-credentials flow.
//!
//! Reads the service principal from `AZURE_TENANT_ID`, `AZURE_CLIENT_ID` and
//! `AZURE_CLIENT_SECRET` (the same variables the Azure SDKs use) and requests
//! tokens from the Microsoft identity platform.

use std::time::Duration;

use chrono::Utc;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use assistkit_core::llm::credential::{BearerTokenProvider, TokenCredential};
use assistkit_types::llm::{AccessToken, LlmError};

/// Default Microsoft identity platform host.
pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";

/// Bearer token provider used by Azure identity authenticated clients.
pub type AzureTokenProvider = BearerTokenProvider<ClientSecretCredential>;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

/// Service-principal credential.
///
/// Does NOT derive Debug so the client secret can never be printed.
pub struct ClientSecretCredential {
    http: reqwest::Client,
    authority_host: String,
    tenant_id: String,
    client_id: String,
    client_secret: SecretString,
}

impl ClientSecretCredential {
    pub fn new(
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: SecretString,
    ) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| LlmError::Credential(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            authority_host: DEFAULT_AUTHORITY_HOST.to_string(),
            tenant_id: tenant_id.into(),
            client_id: client_id.into(),
            client_secret,
        })
    }

    /// Build from `AZURE_TENANT_ID`, `AZURE_CLIENT_ID`, `AZURE_CLIENT_SECRET`
    /// and the optional `AZURE_AUTHORITY_HOST`.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, LlmError> {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| LlmError::Credential(format!("{name} is not set")))
        };

        let credential = Self::new(
            required("AZURE_TENANT_ID")?,
            required("AZURE_CLIENT_ID")?,
            SecretString::from(required("AZURE_CLIENT_SECRET")?),
        )?;

        Ok(match lookup("AZURE_AUTHORITY_HOST").filter(|host| !host.is_empty()) {
            Some(host) => credential.with_authority_host(host),
            None => credential,
        })
    }

    /// Override the identity platform host (sovereign clouds, tests).
    pub fn with_authority_host(mut self, host: impl Into<String>) -> Self {
        self.authority_host = host.into();
        self
    }

    fn token_url(&self) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.authority_host.trim_end_matches('/'),
            self.tenant_id
        )
    }
}

impl TokenCredential for ClientSecretCredential {
    async fn get_token(&self, scope: &str) -> Result<AccessToken, LlmError> {
        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.expose_secret()),
            ("scope", scope),
        ];

        let response = self
            .http
            .post(self.token_url())
            .form(&params)
            .send()
            .await
            .map_err(|e| LlmError::Credential(format!("token request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Credential(format!("token endpoint returned HTTP {status}: {body}")));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse token response: {e}")))?;

        Ok(AccessToken::new(
            token.access_token,
            Utc::now() + chrono::Duration::seconds(token.expires_in),
        ))
    }
}
