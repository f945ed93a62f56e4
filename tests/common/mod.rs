//! Shared test doubles for the task API.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use tech_research::{AuthHeaders, DomainError, TaskTransport, TransportResponse};

/// One request as seen by [`ScriptedTransport`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub headers: AuthHeaders,
    pub body: Value,
}

/// Replays queued responses in order. Once the queue is drained the
/// fallback response (if any) is returned forever, otherwise a
/// transport error.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<TransportResponse, String>>>,
    fallback: Option<TransportResponse>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<TransportResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().map(Ok).collect()),
            ..Self::default()
        }
    }

    pub fn with_fallback(mut self, response: TransportResponse) -> Self {
        self.fallback = Some(response);
        self
    }

    pub fn then_network_error(self, message: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
        self
    }

    /// Queue another response behind the ones already scripted.
    pub fn push(&self, response: TransportResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn count_for(&self, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.path == path)
            .count()
    }
}

#[async_trait]
impl TaskTransport for ScriptedTransport {
    async fn post(
        &self,
        path: &str,
        headers: &AuthHeaders,
        body: &Value,
    ) -> Result<TransportResponse, DomainError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            path: path.to_string(),
            headers: headers.clone(),
            body: body.clone(),
        });

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(DomainError::transport(message)),
            None => self
                .fallback
                .clone()
                .ok_or_else(|| DomainError::transport("no scripted response left")),
        }
    }
}

pub fn ok(body: Value) -> TransportResponse {
    TransportResponse::new(200, body.to_string())
}

pub fn accepted(task_id: &str) -> TransportResponse {
    ok(json!({ "result": true, "errors": [], "taskid": task_id }))
}

pub fn task_in(status: &str) -> TransportResponse {
    ok(json!({
        "result": true,
        "tasklist": [{ "id": "t-1", "status": status, "debugoutput": "" }],
    }))
}

pub fn finished_with(output: &str) -> TransportResponse {
    ok(json!({
        "result": true,
        "tasklist": [{ "id": "t-1", "status": "task_postprocess_end", "debugoutput": output }],
    }))
}

pub fn empty_tasklist() -> TransportResponse {
    ok(json!({ "result": true, "tasklist": [] }))
}
