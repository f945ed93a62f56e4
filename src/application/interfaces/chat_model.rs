use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt};

use crate::domain::{ChatCompletion, ChatMessage, DomainError};

/// A model that turns a message history into one assistant completion.
///
/// This is the capability an agent framework plugs into, whichever provider
/// backs it.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatCompletion, DomainError>;

    /// Streaming variant. Providers without token streaming yield the single
    /// finished completion once it is available.
    async fn complete_stream(
        &self,
        messages: &[ChatMessage],
    ) -> Result<BoxStream<'static, ChatCompletion>, DomainError> {
        let completion = self.complete(messages).await?;
        Ok(stream::once(async move { completion }).boxed())
    }

    fn model_name(&self) -> &str;
}
