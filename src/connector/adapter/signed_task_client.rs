use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::application::{TaskTransport, TransportResponse};
use crate::domain::{
    DomainError, GenerationRequest, RequestSigner, TaskPhase, TaskResult, TaskSnapshot,
    TaskStatus, TaskSubmission, UnknownStatusPolicy,
};

pub const TASK_DETAIL_PATH: &str = "/Task/Detail";
pub const TASK_KILL_PATH: &str = "/Task/Kill";

/// Client for an HMAC-authenticated, asynchronous task-submission API.
///
/// A generation is one submitted task followed by a polling loop over the
/// task-detail endpoint. Every request is signed afresh; the client holds no
/// mutable state, so one instance can serve concurrent generations.
pub struct SignedTaskClient {
    transport: Arc<dyn TaskTransport>,
    signer: RequestSigner,
    run_path: String,
    unknown_status: UnknownStatusPolicy,
}

impl SignedTaskClient {
    pub fn new(
        transport: Arc<dyn TaskTransport>,
        signer: RequestSigner,
        run_path: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            signer,
            run_path: run_path.into(),
            unknown_status: UnknownStatusPolicy::default(),
        }
    }

    pub fn with_unknown_status_policy(mut self, policy: UnknownStatusPolicy) -> Self {
        self.unknown_status = policy;
        self
    }

    pub fn run_path(&self) -> &str {
        &self.run_path
    }

    async fn signed_post(&self, path: &str, body: &Value) -> Result<TransportResponse, DomainError> {
        let headers = self.signer.headers();
        self.transport.post(path, &headers, body).await
    }

    /// Create one remote task for `request`.
    ///
    /// Not idempotent: calling this again for the same request creates a
    /// second remote task.
    pub async fn submit(&self, request: &GenerationRequest) -> Result<TaskSubmission, DomainError> {
        let body = request.to_wire_body();
        let response = self
            .signed_post(&self.run_path, &body)
            .await
            .map_err(|e| DomainError::submission(e.to_string()))?;

        if !response.is_success() {
            return Err(DomainError::submission(format!(
                "task creation returned HTTP {}: {}",
                response.status, response.body
            )));
        }

        let decoded: Value = serde_json::from_str(&response.body).map_err(|e| {
            DomainError::submission(format!("task creation response is not valid JSON: {e}"))
        })?;

        if !decoded.get("result").map(is_truthy).unwrap_or(false) {
            return Err(DomainError::submission(format!(
                "task was not accepted: {}",
                describe_errors(&decoded)
            )));
        }

        let task_id = decoded
            .get("taskid")
            .and_then(id_string)
            .ok_or_else(|| DomainError::submission("accepted response carries no task id"))?;

        info!("Submitted task {task_id} to {}", self.run_path);
        Ok(TaskSubmission::new(task_id, true))
    }

    /// Fetch the current state of a task once.
    ///
    /// `None` means the task is not listed yet (empty or missing task list,
    /// or an entry without a status).
    pub async fn detail(&self, task_id: &str) -> Result<Option<TaskSnapshot>, DomainError> {
        let body = json!({ "taskid": task_id });
        let response = self.signed_post(TASK_DETAIL_PATH, &body).await?;

        if !response.is_success() {
            return Err(DomainError::transport(format!(
                "task detail for {task_id} returned HTTP {}: {}",
                response.status, response.body
            )));
        }

        let decoded: Value = serde_json::from_str(&response.body).map_err(|e| {
            DomainError::transport(format!("task detail response is not valid JSON: {e}"))
        })?;

        let Some(entry) = decoded
            .get("tasklist")
            .and_then(Value::as_array)
            .and_then(|list| list.first())
        else {
            return Ok(None);
        };

        let Some(status) = entry.get("status").and_then(Value::as_str) else {
            return Ok(None);
        };

        Ok(Some(TaskSnapshot {
            status: TaskStatus::from_wire(status),
            raw: entry.clone(),
        }))
    }

    /// Poll `task_id` every `interval` until it reaches a terminal state or
    /// `timeout` elapses.
    ///
    /// The deadline also bounds an in-flight detail request and the wait
    /// between polls. Dropping the returned future abandons the wait without
    /// side effects.
    pub async fn poll(
        &self,
        task_id: &str,
        interval: Duration,
        timeout: Duration,
    ) -> Result<TaskResult, DomainError> {
        let started = Instant::now();
        let deadline = started + timeout;
        let mut last_status: Option<TaskStatus> = None;
        let mut polls: u32 = 0;

        while Instant::now() < deadline {
            polls += 1;
            let snapshot = match tokio::time::timeout_at(deadline, self.detail(task_id)).await {
                Ok(result) => result?,
                Err(_) => break,
            };

            match snapshot {
                None => debug!("Task {task_id} not listed yet (poll {polls})"),
                Some(TaskSnapshot { status, raw }) => {
                    if last_status.as_ref() != Some(&status) {
                        debug!("Task {task_id} is now {status} (poll {polls})");
                    }

                    match status.phase() {
                        TaskPhase::Pending => {}
                        TaskPhase::Completed => {
                            info!("Task {task_id} completed after {polls} polls");
                            return Ok(TaskResult::new(task_id.to_string(), status, raw));
                        }
                        TaskPhase::Cancelled => {
                            warn!("Task {task_id} was cancelled remotely");
                            return Err(DomainError::task_cancelled(task_id));
                        }
                        TaskPhase::Failed => {
                            return Err(DomainError::TaskFailed {
                                task_id: task_id.to_string(),
                                status: status.to_string(),
                            });
                        }
                        TaskPhase::Unknown => match self.unknown_status {
                            UnknownStatusPolicy::Complete => {
                                warn!("Task {task_id} reported unrecognised status '{status}', treating as finished");
                                return Ok(TaskResult::new(task_id.to_string(), status, raw));
                            }
                            UnknownStatusPolicy::Fail => {
                                return Err(DomainError::UnknownStatus {
                                    task_id: task_id.to_string(),
                                    status: status.to_string(),
                                });
                            }
                        },
                    }

                    last_status = Some(status);
                }
            }

            tokio::time::sleep_until(std::cmp::min(Instant::now() + interval, deadline)).await;
        }

        warn!("Task {task_id} still not finished after {polls} polls, giving up");
        Err(DomainError::poll_timeout(task_id, started.elapsed()))
    }

    /// Submit `request` and wait for its result.
    pub async fn run(
        &self,
        request: &GenerationRequest,
        interval: Duration,
        timeout: Duration,
    ) -> Result<TaskResult, DomainError> {
        let submission = self.submit(request).await?;
        self.poll(submission.task_id(), interval, timeout).await
    }

    /// Ask the remote side to cancel a task. Returns whether it accepted.
    pub async fn kill(&self, task_id: &str) -> Result<bool, DomainError> {
        let body = json!({ "taskid": task_id });
        let response = self.signed_post(TASK_KILL_PATH, &body).await?;

        if !response.is_success() {
            return Err(DomainError::transport(format!(
                "task kill for {task_id} returned HTTP {}: {}",
                response.status, response.body
            )));
        }

        let decoded: Value = serde_json::from_str(&response.body).map_err(|e| {
            DomainError::transport(format!("task kill response is not valid JSON: {e}"))
        })?;

        let accepted = decoded.get("result").map(is_truthy).unwrap_or(false);
        if accepted {
            info!("Kill requested for task {task_id}");
        } else {
            warn!("Kill for task {task_id} rejected: {}", describe_errors(&decoded));
        }
        Ok(accepted)
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn describe_errors(decoded: &Value) -> String {
    match decoded.get("errors") {
        Some(Value::Array(errors)) if !errors.is_empty() => errors
            .iter()
            .map(|e| match e {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join("; "),
        _ => decoded.to_string(),
    }
}
