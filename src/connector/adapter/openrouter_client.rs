use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::application::ChatModel;
use crate::domain::{split_reasoning, ChatCompletion, ChatMessage, DomainError, OpenRouterSettings};

const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<ApiChoice>,
}

#[derive(Deserialize)]
struct ApiChoice {
    message: ApiResponseMessage,
}

#[derive(Deserialize)]
struct ApiResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    reasoning: Option<String>,
}

/// [`ChatModel`] over an OpenAI-compatible chat-completions endpoint
/// (OpenRouter by default), authenticated with a bearer token.
pub struct OpenRouterClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    url: String,
}

impl OpenRouterClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), CHAT_COMPLETIONS_PATH);
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            model: model.into(),
            url,
        }
    }

    pub fn from_settings(settings: &OpenRouterSettings) -> Self {
        Self::new(&settings.api_key, &settings.model, &settings.base_url)
    }

    fn build_request<'a>(&'a self, messages: &'a [ChatMessage]) -> ApiRequest<'a> {
        ApiRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|m| ApiMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
        }
    }

    fn parse_response(status: StatusCode, body: &str) -> Result<ChatCompletion, DomainError> {
        if !status.is_success() {
            warn!("OpenRouterClient: API returned {status}: {body}");
            return Err(DomainError::provider(format!(
                "OpenRouter API returned {status}"
            )));
        }

        let api_response: ApiResponse = serde_json::from_str(body).map_err(|e| {
            DomainError::transport(format!("Failed to parse OpenRouter response: {e}"))
        })?;

        Self::into_completion(api_response)
    }

    fn into_completion(response: ApiResponse) -> Result<ChatCompletion, DomainError> {
        let message = response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message)
            .ok_or_else(|| DomainError::provider("OpenRouter response has no choices"))?;

        let text = message.content.unwrap_or_default();
        let (content, inline_reasoning) = split_reasoning(&text);
        let reasoning = message
            .reasoning
            .filter(|r| !r.trim().is_empty())
            .or(inline_reasoning);
        Ok(ChatCompletion::assistant(content, reasoning))
    }
}

#[async_trait]
impl ChatModel for OpenRouterClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatCompletion, DomainError> {
        let request = self.build_request(messages);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("OpenRouter request failed: {e}")))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            DomainError::transport(format!("Failed to read OpenRouter response: {e}"))
        })?;

        Self::parse_response(status, &body)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
