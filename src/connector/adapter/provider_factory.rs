use std::sync::Arc;

use tracing::debug;

use crate::application::{ChatModel, ResultExtractor, TaskTransport};
use crate::connector::adapter::{
    HttpTaskTransport, JsonPointerExtractor, OpenRouterClient, RawResultExtractor,
    SignedTaskClient, WiroChatModel,
};
use crate::domain::{DomainError, ProviderConfig, RequestSigner, WiroSettings};

/// Build the chat model selected by `config`.
///
/// Called once at startup; the returned handle is passed down to whatever
/// needs completions.
pub fn build_chat_model(config: &ProviderConfig) -> Result<Arc<dyn ChatModel>, DomainError> {
    build_chat_model_with_task_client(config, None)
}

/// Like [`build_chat_model`], but a Wiro model reuses `task_client` when one
/// is given instead of opening its own HTTPS transport.
pub fn build_chat_model_with_task_client(
    config: &ProviderConfig,
    task_client: Option<Arc<SignedTaskClient>>,
) -> Result<Arc<dyn ChatModel>, DomainError> {
    config.validate()?;

    match config {
        ProviderConfig::Wiro(settings) => {
            debug!("Using task API model {}", settings.model_path);
            let client = task_client.unwrap_or_else(|| Arc::new(build_task_client(settings)));
            Ok(Arc::new(build_wiro_chat_model(settings, client)))
        }
        ProviderConfig::OpenRouter(settings) => {
            debug!("Using OpenRouter model {}", settings.model);
            Ok(Arc::new(OpenRouterClient::from_settings(settings)))
        }
    }
}

/// Signed task client talking HTTPS to `settings.base_url`.
pub fn build_task_client(settings: &WiroSettings) -> SignedTaskClient {
    let transport = Arc::new(HttpTaskTransport::new(&settings.base_url));
    build_task_client_with_transport(settings, transport)
}

pub fn build_task_client_with_transport(
    settings: &WiroSettings,
    transport: Arc<dyn TaskTransport>,
) -> SignedTaskClient {
    debug!(
        "Using task API at {} ({})",
        settings.base_url,
        settings.run_path()
    );
    SignedTaskClient::new(
        transport,
        RequestSigner::new(settings.credentials.clone()),
        settings.run_path(),
    )
    .with_unknown_status_policy(settings.unknown_status)
}

pub fn build_wiro_chat_model(settings: &WiroSettings, client: Arc<SignedTaskClient>) -> WiroChatModel {
    let extractor: Arc<dyn ResultExtractor> = match settings.output_pointer.as_deref() {
        Some(pointer) if !pointer.trim().is_empty() => {
            Arc::new(JsonPointerExtractor::new(pointer.trim()))
        }
        _ => Arc::new(RawResultExtractor),
    };

    WiroChatModel::new(client, settings.model_path.clone())
        .with_extractor(extractor)
        .with_polling(settings.poll_interval, settings.poll_timeout)
        .with_failure_policy(settings.failure_policy)
}
