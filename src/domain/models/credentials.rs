use std::fmt;

pub const API_KEY_HEADER: &str = "x-api-key";
pub const NONCE_HEADER: &str = "x-nonce";
pub const SIGNATURE_HEADER: &str = "x-signature";

/// API key and secret pair for the signed task API.
///
/// The secret never leaves the process: it only feeds the per-request
/// signature, so `Debug` redacts it.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    key: String,
    secret: String,
}

impl Credentials {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Authentication headers attached to a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    api_key: String,
    nonce: String,
    signature: String,
}

impl AuthHeaders {
    pub fn new(api_key: String, nonce: String, signature: String) -> Self {
        Self {
            api_key,
            nonce,
            signature,
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Header name/value pairs in wire order.
    pub fn pairs(&self) -> [(&'static str, &str); 3] {
        [
            (API_KEY_HEADER, self.api_key.as_str()),
            (NONCE_HEADER, self.nonce.as_str()),
            (SIGNATURE_HEADER, self.signature.as_str()),
        ]
    }
}
