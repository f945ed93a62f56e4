use serde::{Deserialize, Serialize};

const THINK_OPEN: &str = "<think>";
const THINK_CLOSE: &str = "</think>";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Role::System => "System",
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Single-message completion handed back to the agent framework.
///
/// The same shape carries degraded failures: `error` is set and `content`
/// holds a readable description of what went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCompletion {
    pub content: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatCompletion {
    pub fn assistant(content: impl Into<String>, reasoning: Option<String>) -> Self {
        Self {
            content: content.into(),
            role: Role::Assistant,
            reasoning,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            content: format!("Error: {error}"),
            role: Role::Assistant,
            reasoning: None,
            error: Some(error),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// A conversation reduced to the single prompt a task API accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlattenedPrompt {
    pub prompt: String,
    pub system_prompt: Option<String>,
}

/// Flatten a role-tagged history into one prompt.
///
/// User and assistant turns are kept in order with role labels; of the
/// system messages only the most recent one survives, returned separately.
pub fn flatten_messages(messages: &[ChatMessage]) -> FlattenedPrompt {
    let system_prompt = messages
        .iter()
        .rev()
        .find(|m| m.role == Role::System)
        .map(|m| m.content.clone());

    let prompt = messages
        .iter()
        .filter(|m| m.role != Role::System)
        .map(|m| format!("{}: {}", m.role.label(), m.content))
        .collect::<Vec<_>>()
        .join("\n\n");

    FlattenedPrompt {
        prompt,
        system_prompt,
    }
}

/// Separate a leading `<think>…</think>` block emitted by reasoning models.
///
/// Returns `(content, reasoning)`. Text without a complete block is returned
/// unchanged with no reasoning.
pub fn split_reasoning(text: &str) -> (String, Option<String>) {
    let trimmed = text.trim_start();
    let Some(after_open) = trimmed.strip_prefix(THINK_OPEN) else {
        return (text.to_string(), None);
    };
    let Some(close) = after_open.find(THINK_CLOSE) else {
        return (text.to_string(), None);
    };

    let reasoning = after_open[..close].trim();
    let content = after_open[close + THINK_CLOSE.len()..].trim();
    let reasoning = (!reasoning.is_empty()).then(|| reasoning.to_string());
    (content.to_string(), reasoning)
}
