use std::time::{SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::domain::{AuthHeaders, Credentials};

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 keyed by the API key over `secret || nonce`, hex-encoded.
pub fn sign(secret: &str, nonce: &str, key: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(key.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(secret.as_bytes());
    mac.update(nonce.as_bytes());
    format!("{:x}", mac.finalize().into_bytes())
}

/// Derives per-request authentication headers from immutable credentials.
///
/// The nonce is the wall-clock time in whole seconds, so two requests issued
/// within the same second carry the same nonce and signature. Replay
/// protection beyond that is left to the remote service.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: Credentials,
}

impl RequestSigner {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    pub fn api_key(&self) -> &str {
        self.credentials.key()
    }

    pub fn headers_at(&self, nonce: u64) -> AuthHeaders {
        let nonce = nonce.to_string();
        let signature = sign(self.credentials.secret(), &nonce, self.credentials.key());
        AuthHeaders::new(self.credentials.key().to_string(), nonce, signature)
    }

    pub fn headers(&self) -> AuthHeaders {
        self.headers_at(unix_seconds())
    }
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
