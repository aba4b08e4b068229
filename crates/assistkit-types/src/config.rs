//! Assistant configuration models.
//!
//! These are the user-editable settings a host application renders as a
//! form: prompts, the chat driver, and the LLM service connection. Service
//! and authentication choices are closed tagged enums; the tag field
//! (`service_type`, `auth_method`) is the discriminator in every serialized
//! form. Every field has a default so partially filled configuration files
//! still load, and [`AssistantConfigModel::validate`] reports the fields a
//! client cannot be built without.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::secret::Redacted;

/// Default guardrails prompt, bundled with the crate.
pub const DEFAULT_GUARDRAILS_PROMPT: &str = include_str!("../text_includes/guardrails_prompt.txt");

pub const DEFAULT_WELCOME_MESSAGE: &str = "Hello! How can I help you today?";
pub const DEFAULT_INSTRUCTIONS: &str = "You are a helpful assistant.";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
pub const DEFAULT_AZURE_OPENAI_DEPLOYMENT: &str = "gpt-4o";

/// Environment variables consulted (in order) for the default Azure endpoint.
pub const AZURE_OPENAI_ENDPOINT_ENV_VARS: &[&str] =
    &["azure_openai_endpoint", "assistant__azure_openai_endpoint"];

/// Return the value of the first non-empty environment variable in `names`.
///
/// Each name is tried as given and then upper-cased.
pub fn first_env_var(names: &[&str]) -> Option<String> {
    first_env_var_from(names, |name| std::env::var(name).ok())
}

fn first_env_var_from(
    names: &[&str],
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    names.iter().find_map(|name| {
        [name.to_string(), name.to_uppercase()]
            .into_iter()
            .find_map(|candidate| lookup(&candidate).filter(|value| !value.is_empty()))
    })
}

// ---------------------------------------------------------------------------
// Service configuration
// ---------------------------------------------------------------------------

/// Kind of LLM service backing the assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    AzureOpenai,
    Openai,
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceType::AzureOpenai => write!(f, "azure_openai"),
            ServiceType::Openai => write!(f, "openai"),
        }
    }
}

impl FromStr for ServiceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "azure_openai" => Ok(ServiceType::AzureOpenai),
            "openai" => Ok(ServiceType::Openai),
            other => Err(format!("invalid service type: '{other}'")),
        }
    }
}

/// Authentication method for Azure OpenAI.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "auth_method")]
pub enum AzureAuthConfig {
    /// Azure identity based authentication (bearer tokens from Entra ID).
    #[default]
    #[serde(rename = "azure-identity")]
    #[schemars(title = "Azure identity based authentication")]
    Identity,

    /// API key based authentication.
    #[serde(rename = "api-key")]
    #[schemars(title = "API key based authentication")]
    ApiKey {
        /// The Azure OpenAI API key for your resource instance.
        #[serde(default)]
        #[schemars(title = "Azure OpenAI API Key")]
        azure_openai_api_key: Redacted,
    },
}

/// Azure OpenAI service connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
#[schemars(title = "Azure OpenAI")]
pub struct AzureOpenAiServiceConfig {
    #[schemars(title = "Authentication Configuration")]
    pub auth_config: AzureAuthConfig,

    /// The Azure OpenAI endpoint for your resource instance. If not provided,
    /// the service default will be used.
    #[schemars(title = "Azure OpenAI Endpoint")]
    pub azure_openai_endpoint: String,

    /// The Azure OpenAI deployment to use.
    #[schemars(title = "Azure OpenAI Deployment")]
    pub azure_openai_deployment: String,
}

impl Default for AzureOpenAiServiceConfig {
    fn default() -> Self {
        Self {
            auth_config: AzureAuthConfig::default(),
            azure_openai_endpoint: first_env_var(AZURE_OPENAI_ENDPOINT_ENV_VARS).unwrap_or_default(),
            azure_openai_deployment: DEFAULT_AZURE_OPENAI_DEPLOYMENT.to_string(),
        }
    }
}

/// OpenAI service connection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
#[schemars(title = "OpenAI")]
pub struct OpenAiServiceConfig {
    /// The API key to use for the OpenAI API.
    #[schemars(title = "OpenAI API Key")]
    pub openai_api_key: Redacted,

    /// The ID of the organization to use for the OpenAI API. This is not the
    /// organization name. If you do not specify an organization ID, the
    /// default organization will be used.
    #[schemars(title = "Organization ID [Optional]")]
    pub openai_organization_id: String,
}

/// LLM service configuration, discriminated by `service_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "service_type")]
#[schemars(title = "Service Configuration")]
pub enum ServiceConfig {
    #[serde(rename = "azure_openai")]
    AzureOpenai(AzureOpenAiServiceConfig),
    #[serde(rename = "openai")]
    Openai(OpenAiServiceConfig),
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig::AzureOpenai(AzureOpenAiServiceConfig::default())
    }
}

impl ServiceConfig {
    pub fn service_type(&self) -> ServiceType {
        match self {
            ServiceConfig::AzureOpenai(_) => ServiceType::AzureOpenai,
            ServiceConfig::Openai(_) => ServiceType::Openai,
        }
    }

    /// Human-readable service name shown in host UIs.
    pub fn service_type_display_name(&self) -> &'static str {
        match self {
            ServiceConfig::AzureOpenai(_) => "Azure OpenAI",
            ServiceConfig::Openai(_) => "OpenAI",
        }
    }

    /// Check the fields required to construct a client for this service.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            ServiceConfig::AzureOpenai(azure) => {
                if azure.azure_openai_endpoint.trim().is_empty() {
                    return Err(ConfigError::MissingField("azure_openai_endpoint"));
                }
                if azure.azure_openai_deployment.trim().is_empty() {
                    return Err(ConfigError::MissingField("azure_openai_deployment"));
                }
                if let AzureAuthConfig::ApiKey { azure_openai_api_key } = &azure.auth_config {
                    if azure_openai_api_key.is_empty() {
                        return Err(ConfigError::MissingField("azure_openai_api_key"));
                    }
                }
                Ok(())
            }
            ServiceConfig::Openai(openai) => {
                if openai.openai_api_key.is_empty() {
                    return Err(ConfigError::MissingField("openai_api_key"));
                }
                Ok(())
            }
        }
    }

    /// Copy of this configuration with every secret replaced by its masked form.
    pub fn masked(&self) -> Self {
        match self {
            ServiceConfig::AzureOpenai(azure) => {
                let auth_config = match &azure.auth_config {
                    AzureAuthConfig::Identity => AzureAuthConfig::Identity,
                    AzureAuthConfig::ApiKey { azure_openai_api_key } => AzureAuthConfig::ApiKey {
                        azure_openai_api_key: Redacted::new(azure_openai_api_key.masked()),
                    },
                };
                ServiceConfig::AzureOpenai(AzureOpenAiServiceConfig {
                    auth_config,
                    ..azure.clone()
                })
            }
            ServiceConfig::Openai(openai) => ServiceConfig::Openai(OpenAiServiceConfig {
                openai_api_key: Redacted::new(openai.openai_api_key.masked()),
                ..openai.clone()
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Assistant configuration
// ---------------------------------------------------------------------------

/// Chat driver settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ChatDriverConfig {
    /// The prompt used to instruct the behavior of the AI assistant.
    #[schemars(title = "Instructions")]
    pub instructions: String,

    /// The OpenAI model to use for chat driver.
    #[schemars(title = "OpenAI Model")]
    pub openai_model: String,
}

impl Default for ChatDriverConfig {
    fn default() -> Self {
        Self {
            instructions: DEFAULT_INSTRUCTIONS.to_string(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
        }
    }
}

/// Top-level assistant configuration, edited by the host as a dynamic form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AssistantConfigModel {
    /// The prompt used to inform the AI assistant about the guardrails to follow.
    #[schemars(title = "Guardrails Prompt")]
    pub guardrails_prompt: String,

    /// The message to display when the conversation starts.
    #[schemars(title = "Welcome Message")]
    pub welcome_message: String,

    /// The configuration for the chat driver.
    #[schemars(title = "Chat Driver Configuration")]
    pub chat_driver_config: ChatDriverConfig,

    #[schemars(title = "Service Configuration")]
    pub service_config: ServiceConfig,
}

impl Default for AssistantConfigModel {
    fn default() -> Self {
        Self {
            guardrails_prompt: DEFAULT_GUARDRAILS_PROMPT.to_string(),
            welcome_message: DEFAULT_WELCOME_MESSAGE.to_string(),
            chat_driver_config: ChatDriverConfig::default(),
            service_config: ServiceConfig::default(),
        }
    }
}

impl AssistantConfigModel {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.service_config.validate()
    }

    /// Copy of this configuration safe to display.
    pub fn masked(&self) -> Self {
        Self {
            service_config: self.service_config.masked(),
            ..self.clone()
        }
    }

    /// System prompt sent ahead of every conversation: instructions, then guardrails.
    pub fn system_prompt(&self) -> String {
        let instructions = self.chat_driver_config.instructions.trim();
        let guardrails = self.guardrails_prompt.trim();
        match (instructions.is_empty(), guardrails.is_empty()) {
            (false, false) => format!("{instructions}\n\n{guardrails}"),
            (false, true) => instructions.to_string(),
            (true, false) => guardrails.to_string(),
            (true, true) => String::new(),
        }
    }

    /// JSON Schema describing this model, for host form generation.
    pub fn json_schema() -> serde_json::Value {
        serde_json::to_value(schemars::schema_for!(AssistantConfigModel))
            .unwrap_or(serde_json::Value::Null)
    }
}
