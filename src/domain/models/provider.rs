use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{Credentials, UnknownStatusPolicy};
use crate::domain::DomainError;

pub const DEFAULT_WIRO_BASE_URL: &str = "https://api.wiro.ai/v1";
pub const DEFAULT_WIRO_MODEL_PATH: &str = "deepseek-ai/deepseek-r1-distill-qwen-32b";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(300);

pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_OPENROUTER_MODEL: &str = "google/gemini-2.0-flash-001";

/// Which model-provider backend serves completions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Wiro,
    #[default]
    OpenRouter,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::Wiro => "wiro",
            ProviderKind::OpenRouter => "openrouter",
        }
    }

    pub fn parse(value: &str) -> Result<Self, DomainError> {
        match value.trim().to_lowercase().as_str() {
            "wiro" => Ok(ProviderKind::Wiro),
            "openrouter" => Ok(ProviderKind::OpenRouter),
            other => Err(DomainError::config(format!(
                "Unknown LLM provider '{other}' (expected 'wiro' or 'openrouter')"
            ))),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the chat adapter reports a failed generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Return the error to the caller.
    #[default]
    Propagate,
    /// Return a completion whose content describes the error.
    Degrade,
}

/// Settings for the signed task-submission provider.
#[derive(Debug, Clone)]
pub struct WiroSettings {
    pub credentials: Credentials,
    pub base_url: String,
    pub model_path: String,
    pub poll_interval: Duration,
    pub poll_timeout: Duration,
    /// JSON pointer to the generated text inside a finished task entry.
    pub output_pointer: Option<String>,
    pub unknown_status: UnknownStatusPolicy,
    pub failure_policy: FailurePolicy,
}

impl WiroSettings {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_WIRO_BASE_URL.to_string(),
            model_path: DEFAULT_WIRO_MODEL_PATH.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            poll_timeout: DEFAULT_POLL_TIMEOUT,
            output_pointer: None,
            unknown_status: UnknownStatusPolicy::default(),
            failure_policy: FailurePolicy::default(),
        }
    }

    /// Task-creation path for the configured model.
    pub fn run_path(&self) -> String {
        format!("/Run/{}", self.model_path.trim_matches('/'))
    }
}

#[derive(Debug, Clone)]
pub struct OpenRouterSettings {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl OpenRouterSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_OPENROUTER_MODEL.to_string(),
            base_url: DEFAULT_OPENROUTER_BASE_URL.to_string(),
        }
    }
}

/// Provider selection plus the credentials it needs, resolved once at startup.
#[derive(Debug, Clone)]
pub enum ProviderConfig {
    Wiro(WiroSettings),
    OpenRouter(OpenRouterSettings),
}

impl ProviderConfig {
    pub fn kind(&self) -> ProviderKind {
        match self {
            ProviderConfig::Wiro(_) => ProviderKind::Wiro,
            ProviderConfig::OpenRouter(_) => ProviderKind::OpenRouter,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        match self {
            ProviderConfig::Wiro(settings) => {
                if settings.credentials.key().is_empty() || settings.credentials.secret().is_empty()
                {
                    return Err(DomainError::config("Wiro API key and secret must be set"));
                }
                if settings.poll_timeout.is_zero() {
                    return Err(DomainError::config("Poll timeout must be greater than zero"));
                }
                Ok(())
            }
            ProviderConfig::OpenRouter(settings) => {
                if settings.api_key.is_empty() {
                    return Err(DomainError::config("OpenRouter API key must be set"));
                }
                if settings.model.trim().is_empty() {
                    return Err(DomainError::config("Model name cannot be empty"));
                }
                Ok(())
            }
        }
    }
}
