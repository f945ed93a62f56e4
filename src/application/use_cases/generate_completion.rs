use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::application::ChatModel;
use crate::domain::{ChatCompletion, ChatMessage, DomainError};

pub struct GenerateCompletionUseCase {
    model: Arc<dyn ChatModel>,
    default_system_prompt: Option<String>,
}

impl GenerateCompletionUseCase {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self {
            model,
            default_system_prompt: None,
        }
    }

    pub fn with_default_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.default_system_prompt = Some(system_prompt.into());
        self
    }

    /// Single-turn completion. An explicit `system` replaces the default one.
    pub async fn execute(
        &self,
        prompt: &str,
        system: Option<&str>,
    ) -> Result<ChatCompletion, DomainError> {
        if prompt.trim().is_empty() {
            return Err(DomainError::invalid_input("Prompt cannot be empty"));
        }

        let mut messages = Vec::with_capacity(2);
        if let Some(system) = system.or(self.default_system_prompt.as_deref()) {
            messages.push(ChatMessage::system(system));
        }
        messages.push(ChatMessage::user(prompt));

        self.execute_conversation(&messages).await
    }

    pub async fn execute_conversation(
        &self,
        messages: &[ChatMessage],
    ) -> Result<ChatCompletion, DomainError> {
        info!(
            "Generating completion with {} ({} messages)",
            self.model.model_name(),
            messages.len()
        );
        let start_time = Instant::now();

        let completion = self.model.complete(messages).await?;

        if let Some(error) = &completion.error {
            warn!(
                "Completion degraded after {:.2?}: {}",
                start_time.elapsed(),
                error
            );
        } else {
            info!(
                "Completion finished in {:.2?} ({} chars)",
                start_time.elapsed(),
                completion.content.len()
            );
        }

        Ok(completion)
    }
}
