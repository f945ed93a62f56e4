use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{AuthHeaders, DomainError};

/// Raw reply to a signed request: status code and undecoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one authenticated JSON POST to the task API.
///
/// Implementations keep no session state between calls. Network-level
/// failures surface as [`DomainError::Transport`]; non-2xx replies are
/// returned as responses so the caller decides how to classify them.
#[async_trait]
pub trait TaskTransport: Send + Sync {
    async fn post(
        &self,
        path: &str,
        headers: &AuthHeaders,
        body: &Value,
    ) -> Result<TransportResponse, DomainError>;
}
