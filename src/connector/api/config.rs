use std::time::Duration;

use crate::domain::{
    Credentials, DomainError, FailurePolicy, OpenRouterSettings, ProviderConfig, ProviderKind,
    UnknownStatusPolicy, WiroSettings,
};

/// Process configuration, resolved once at startup and passed down.
///
/// | Variable                   | Default                                    |
/// |----------------------------|--------------------------------------------|
/// | `LLM_PROVIDER`             | `openrouter`                               |
/// | `WIRO_API_KEY`             | required for `wiro`                        |
/// | `WIRO_API_SECRET`          | required for `wiro`                        |
/// | `WIRO_BASE_URL`            | `https://api.wiro.ai/v1`                   |
/// | `WIRO_MODEL_PATH`          | `deepseek-ai/deepseek-r1-distill-qwen-32b` |
/// | `WIRO_POLL_INTERVAL_SECS`  | `2`                                        |
/// | `WIRO_POLL_TIMEOUT_SECS`   | `300`                                      |
/// | `WIRO_OUTPUT_POINTER`      | unset (whole payload is returned)          |
/// | `WIRO_UNKNOWN_STATUS`      | `fail`                                     |
/// | `WIRO_DEGRADE_ERRORS`      | `false`                                    |
/// | `OPENROUTER_API_KEY`       | required for `openrouter`                  |
/// | `OPENROUTER_MODEL_ID`      | `google/gemini-2.0-flash-001`              |
/// | `OPENROUTER_BASE_URL`      | `https://openrouter.ai/api/v1`             |
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub provider: ProviderKind,
    pub wiro: Option<WiroSettings>,
    pub openrouter: Option<OpenRouterSettings>,
}

/// Command-line values that take precedence over the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub provider: Option<ProviderKind>,
    pub poll_interval: Option<Duration>,
    pub poll_timeout: Option<Duration>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let provider = match get("LLM_PROVIDER") {
            Some(value) => ProviderKind::parse(&value)?,
            None => ProviderKind::default(),
        };

        let wiro = match (get("WIRO_API_KEY"), get("WIRO_API_SECRET")) {
            (Some(key), Some(secret)) => {
                let mut settings = WiroSettings::new(Credentials::new(key, secret));
                if let Some(base_url) = get("WIRO_BASE_URL") {
                    settings.base_url = base_url;
                }
                if let Some(model_path) = get("WIRO_MODEL_PATH") {
                    settings.model_path = model_path;
                }
                if let Some(value) = get("WIRO_POLL_INTERVAL_SECS") {
                    settings.poll_interval = parse_seconds("WIRO_POLL_INTERVAL_SECS", &value)?;
                }
                if let Some(value) = get("WIRO_POLL_TIMEOUT_SECS") {
                    settings.poll_timeout = parse_seconds("WIRO_POLL_TIMEOUT_SECS", &value)?;
                }
                settings.output_pointer = get("WIRO_OUTPUT_POINTER");
                if let Some(value) = get("WIRO_UNKNOWN_STATUS") {
                    settings.unknown_status = UnknownStatusPolicy::parse(&value).ok_or_else(|| {
                        DomainError::config(format!(
                            "WIRO_UNKNOWN_STATUS must be 'fail' or 'complete', got '{value}'"
                        ))
                    })?;
                }
                if let Some(value) = get("WIRO_DEGRADE_ERRORS") {
                    if parse_flag("WIRO_DEGRADE_ERRORS", &value)? {
                        settings.failure_policy = FailurePolicy::Degrade;
                    }
                }
                Some(settings)
            }
            (None, None) => None,
            _ => {
                return Err(DomainError::config(
                    "WIRO_API_KEY and WIRO_API_SECRET must be set together",
                ))
            }
        };

        let openrouter = get("OPENROUTER_API_KEY").map(|key| {
            let mut settings = OpenRouterSettings::new(key);
            if let Some(model) = get("OPENROUTER_MODEL_ID") {
                settings.model = model;
            }
            if let Some(base_url) = get("OPENROUTER_BASE_URL") {
                settings.base_url = base_url;
            }
            settings
        });

        Ok(Self {
            provider,
            wiro,
            openrouter,
        })
    }

    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(provider) = overrides.provider {
            self.provider = provider;
        }
        if let Some(wiro) = self.wiro.as_mut() {
            if let Some(interval) = overrides.poll_interval {
                wiro.poll_interval = interval;
            }
            if let Some(timeout) = overrides.poll_timeout {
                wiro.poll_timeout = timeout;
            }
        }
        self
    }

    /// Settings for the selected provider, or a configuration error naming
    /// the missing variables.
    pub fn provider_config(&self) -> Result<ProviderConfig, DomainError> {
        match self.provider {
            ProviderKind::Wiro => self.wiro_settings().cloned().map(ProviderConfig::Wiro),
            ProviderKind::OpenRouter => self
                .openrouter
                .clone()
                .map(ProviderConfig::OpenRouter)
                .ok_or_else(|| {
                    DomainError::config("OPENROUTER_API_KEY must be set for the 'openrouter' provider")
                }),
        }
    }

    pub fn wiro_settings(&self) -> Result<&WiroSettings, DomainError> {
        self.wiro.as_ref().ok_or_else(|| {
            DomainError::config("WIRO_API_KEY and WIRO_API_SECRET must be set for the 'wiro' provider")
        })
    }
}

pub fn parse_seconds(name: &str, value: &str) -> Result<Duration, DomainError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
        .ok_or_else(|| {
            DomainError::config(format!(
                "{name} must be a non-negative number of seconds, got '{value}'"
            ))
        })
}

fn parse_flag(name: &str, value: &str) -> Result<bool, DomainError> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(DomainError::config(format!(
            "{name} must be a boolean, got '{value}'"
        ))),
    }
}
