use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::application::{ChatModel, ResultExtractor};
use crate::connector::adapter::{RawResultExtractor, SignedTaskClient};
use crate::domain::{
    flatten_messages, split_reasoning, ChatCompletion, ChatMessage, DomainError, FailurePolicy,
    GenerationRequest, SamplingOverrides, DEFAULT_POLL_INTERVAL, DEFAULT_POLL_TIMEOUT,
};

/// [`ChatModel`] backed by a [`SignedTaskClient`].
///
/// The history is flattened into a single prompt, submitted as one task and
/// polled to completion; the generated text is then pulled out of the task
/// payload by the configured [`ResultExtractor`]. Streaming is not native:
/// the default `complete_stream` yields the finished completion once.
pub struct WiroChatModel {
    client: Arc<SignedTaskClient>,
    model_name: String,
    extractor: Arc<dyn ResultExtractor>,
    overrides: SamplingOverrides,
    poll_interval: Duration,
    poll_timeout: Duration,
    failure_policy: FailurePolicy,
}

impl WiroChatModel {
    pub fn new(client: Arc<SignedTaskClient>, model_name: impl Into<String>) -> Self {
        Self {
            client,
            model_name: model_name.into(),
            extractor: Arc::new(RawResultExtractor),
            overrides: SamplingOverrides::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            poll_timeout: DEFAULT_POLL_TIMEOUT,
            failure_policy: FailurePolicy::default(),
        }
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn ResultExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_overrides(mut self, overrides: SamplingOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    pub fn with_polling(mut self, interval: Duration, timeout: Duration) -> Self {
        self.poll_interval = interval;
        self.poll_timeout = timeout;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    fn build_request(&self, messages: &[ChatMessage]) -> Result<GenerationRequest, DomainError> {
        let flat = flatten_messages(messages);
        if flat.prompt.is_empty() {
            return Err(DomainError::invalid_input(
                "conversation has no user or assistant turns",
            ));
        }

        let mut request = GenerationRequest::new(flat.prompt).with_overrides(&self.overrides);
        if let Some(system) = flat.system_prompt {
            request = request.with_system_prompt(system);
        }
        Ok(request)
    }

    async fn generate(&self, messages: &[ChatMessage]) -> Result<ChatCompletion, DomainError> {
        let request = self.build_request(messages)?;
        let result = self
            .client
            .run(&request, self.poll_interval, self.poll_timeout)
            .await?;

        let text = match self.extractor.extract(&result) {
            Some(text) => text,
            None => {
                warn!(
                    "No generated text found in task {} payload, returning raw result",
                    result.task_id()
                );
                result.raw().to_string()
            }
        };

        let (content, reasoning) = split_reasoning(&text);
        debug!(
            "Task {} produced {} chars (reasoning: {})",
            result.task_id(),
            content.len(),
            reasoning.is_some()
        );
        Ok(ChatCompletion::assistant(content, reasoning))
    }
}

#[async_trait]
impl ChatModel for WiroChatModel {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatCompletion, DomainError> {
        match self.generate(messages).await {
            Ok(completion) => Ok(completion),
            Err(e) => match self.failure_policy {
                FailurePolicy::Propagate => Err(e),
                FailurePolicy::Degrade => {
                    warn!("Generation failed, returning degraded completion: {e}");
                    Ok(ChatCompletion::failure(e.to_string()))
                }
            },
        }
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
