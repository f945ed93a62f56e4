use std::fmt;

use serde_json::Value;

/// Outcome of a task-creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSubmission {
    task_id: String,
    accepted: bool,
}

impl TaskSubmission {
    pub fn new(task_id: String, accepted: bool) -> Self {
        Self { task_id, accepted }
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn accepted(&self) -> bool {
        self.accepted
    }
}

/// Coarse classification of a [`TaskStatus`] used by the poll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskPhase {
    Pending,
    Completed,
    Cancelled,
    Failed,
    Unknown,
}

/// What the poll loop does with a status outside the known set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownStatusPolicy {
    /// Stop polling with [`crate::domain::DomainError::UnknownStatus`].
    #[default]
    Fail,
    /// Treat the task as finished and return its payload as-is.
    Complete,
}

impl UnknownStatusPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "fail" | "error" => Some(Self::Fail),
            "complete" | "accept" | "success" => Some(Self::Complete),
            _ => None,
        }
    }
}

/// Remote task state as reported by the task-detail endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    Queued,
    Accepted,
    Assigned,
    PreprocessStart,
    PreprocessEnd,
    Running,
    EmittingOutput,
    PostprocessEnd,
    Cancelled,
    Failed(String),
    Unknown(String),
}

impl TaskStatus {
    pub fn from_wire(status: &str) -> Self {
        match status {
            "task_queue" => Self::Queued,
            "task_accept" => Self::Accepted,
            "task_assign" => Self::Assigned,
            "task_preprocess_start" => Self::PreprocessStart,
            "task_preprocess_end" => Self::PreprocessEnd,
            "task_start" => Self::Running,
            "task_output" => Self::EmittingOutput,
            "task_postprocess_end" => Self::PostprocessEnd,
            "task_cancel" => Self::Cancelled,
            "task_error" | "task_failed" => Self::Failed(status.to_string()),
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_wire(&self) -> &str {
        match self {
            Self::Queued => "task_queue",
            Self::Accepted => "task_accept",
            Self::Assigned => "task_assign",
            Self::PreprocessStart => "task_preprocess_start",
            Self::PreprocessEnd => "task_preprocess_end",
            Self::Running => "task_start",
            Self::EmittingOutput => "task_output",
            Self::PostprocessEnd => "task_postprocess_end",
            Self::Cancelled => "task_cancel",
            Self::Failed(s) | Self::Unknown(s) => s,
        }
    }

    pub fn phase(&self) -> TaskPhase {
        match self {
            Self::Queued
            | Self::Accepted
            | Self::Assigned
            | Self::PreprocessStart
            | Self::PreprocessEnd
            | Self::Running
            | Self::EmittingOutput => TaskPhase::Pending,
            Self::PostprocessEnd => TaskPhase::Completed,
            Self::Cancelled => TaskPhase::Cancelled,
            Self::Failed(_) => TaskPhase::Failed,
            Self::Unknown(_) => TaskPhase::Unknown,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self.phase(), TaskPhase::Pending)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// One observation of a task from the task-detail endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskSnapshot {
    pub status: TaskStatus,
    pub raw: Value,
}

/// Terminal payload of a finished task.
///
/// `raw` is the task entry exactly as the remote API returned it; where the
/// generated text lives inside it is left to a result extractor.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskResult {
    task_id: String,
    status: TaskStatus,
    raw: Value,
}

impl TaskResult {
    pub fn new(task_id: String, status: TaskStatus, raw: Value) -> Self {
        Self {
            task_id,
            status,
            raw,
        }
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    pub fn status(&self) -> &TaskStatus {
        &self.status
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn into_raw(self) -> Value {
        self.raw
    }
}
