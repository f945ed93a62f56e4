use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::application::{TaskTransport, TransportResponse};
use crate::domain::{AuthHeaders, DomainError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// [`TaskTransport`] over HTTPS using `reqwest`.
///
/// Every call is an independent POST of a JSON body to `base_url + path`
/// with the signed headers attached. Connection reuse is whatever the
/// `reqwest` pool provides.
pub struct HttpTaskTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTaskTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            base_url: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl TaskTransport for HttpTaskTransport {
    async fn post(
        &self,
        path: &str,
        headers: &AuthHeaders,
        body: &Value,
    ) -> Result<TransportResponse, DomainError> {
        let url = self.url(path);
        debug!("HttpTaskTransport: POST {url} (nonce {})", headers.nonce());

        let mut request = self.client.post(&url).json(body);
        for (name, value) in headers.pairs() {
            request = request.header(name, value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("POST {url} failed: {e}")))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::transport(format!("Reading response from {url} failed: {e}")))?;

        Ok(TransportResponse::new(status, body))
    }
}
