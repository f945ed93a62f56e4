use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Submission error: {0}")]
    Submission(String),

    #[error("Task {task_id} did not reach a terminal state within {waited:?}")]
    PollTimeout { task_id: String, waited: Duration },

    #[error("Task {task_id} was cancelled")]
    TaskCancelled { task_id: String },

    #[error("Task {task_id} failed with status '{status}'")]
    TaskFailed { task_id: String, status: String },

    #[error("Task {task_id} reported unrecognised status '{status}'")]
    UnknownStatus { task_id: String, status: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DomainError {
    pub fn submission(msg: impl Into<String>) -> Self {
        Self::Submission(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn poll_timeout(task_id: impl Into<String>, waited: Duration) -> Self {
        Self::PollTimeout {
            task_id: task_id.into(),
            waited,
        }
    }

    pub fn task_cancelled(task_id: impl Into<String>) -> Self {
        Self::TaskCancelled {
            task_id: task_id.into(),
        }
    }

    pub fn is_submission_error(&self) -> bool {
        matches!(self, Self::Submission(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::PollTimeout { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::TaskCancelled { .. })
    }

    pub fn is_transport_error(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
