use serde_json::Value;

use crate::application::ResultExtractor;
use crate::domain::TaskResult;

/// Renders the whole task payload as JSON text.
///
/// Always succeeds, which makes it the fallback when no better location for
/// the generated text is known.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawResultExtractor;

impl ResultExtractor for RawResultExtractor {
    fn extract(&self, result: &TaskResult) -> Option<String> {
        Some(result.raw().to_string())
    }
}

/// Reads the generated text at a JSON pointer (RFC 6901) inside the payload,
/// e.g. `/debugoutput` or `/outputs/0/content`.
///
/// String values are returned verbatim, other values as JSON text. Missing,
/// null and empty-string values yield `None`.
#[derive(Debug, Clone)]
pub struct JsonPointerExtractor {
    pointer: String,
}

impl JsonPointerExtractor {
    pub fn new(pointer: impl Into<String>) -> Self {
        let pointer: String = pointer.into();
        let pointer = if pointer.is_empty() || pointer.starts_with('/') {
            pointer
        } else {
            format!("/{pointer}")
        };
        Self { pointer }
    }

    pub fn pointer(&self) -> &str {
        &self.pointer
    }
}

impl ResultExtractor for JsonPointerExtractor {
    fn extract(&self, result: &TaskResult) -> Option<String> {
        match result.raw().pointer(&self.pointer)? {
            Value::Null => None,
            Value::String(s) if s.trim().is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
