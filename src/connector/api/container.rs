use std::sync::Arc;

use crate::application::{ChatModel, GenerateCompletionUseCase, TaskTransport};
use crate::connector::adapter::{
    build_chat_model_with_task_client, build_task_client, build_task_client_with_transport,
    SignedTaskClient,
};
use crate::domain::DomainError;

use super::config::AppConfig;

/// Wires adapters together from an [`AppConfig`].
///
/// The task client exists only when task-API credentials are configured; the
/// chat model is built on demand for the selected provider.
pub struct Container {
    config: AppConfig,
    task_client: Option<Arc<SignedTaskClient>>,
}

impl Container {
    pub fn new(config: AppConfig) -> Self {
        let task_client = config
            .wiro
            .as_ref()
            .map(|settings| Arc::new(build_task_client(settings)));
        Self {
            config,
            task_client,
        }
    }

    /// Use `transport` for every task-API request instead of HTTPS.
    pub fn with_transport(config: AppConfig, transport: Arc<dyn TaskTransport>) -> Self {
        let task_client = config.wiro.as_ref().map(|settings| {
            Arc::new(build_task_client_with_transport(
                settings,
                Arc::clone(&transport),
            ))
        });
        Self {
            config,
            task_client,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn task_client(&self) -> Result<Arc<SignedTaskClient>, DomainError> {
        match &self.task_client {
            Some(client) => Ok(Arc::clone(client)),
            None => Err(self.config.wiro_settings().err().unwrap_or_else(|| {
                DomainError::config("task API client is not configured")
            })),
        }
    }

    pub fn chat_model(&self) -> Result<Arc<dyn ChatModel>, DomainError> {
        let provider = self.config.provider_config()?;
        build_chat_model_with_task_client(&provider, self.task_client.clone())
    }

    pub fn generate_use_case(&self) -> Result<GenerateCompletionUseCase, DomainError> {
        Ok(GenerateCompletionUseCase::new(self.chat_model()?))
    }
}
