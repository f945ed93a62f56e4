//! Submission, polling and cancellation against a scripted task API.

mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::time::Instant;

use common::{accepted, empty_tasklist, finished_with, ok, task_in, ScriptedTransport};
use tech_research::connector::{TASK_DETAIL_PATH, TASK_KILL_PATH};
use tech_research::{
    sign, AuthHeaders, Credentials, DomainError, GenerationRequest, RequestSigner,
    SignedTaskClient, TaskStatus, TaskTransport, TransportResponse, UnknownStatusPolicy,
};

const RUN_PATH: &str = "/Run/deepseek-ai/deepseek-r1-distill-qwen-32b";

fn client(transport: &Arc<ScriptedTransport>) -> SignedTaskClient {
    SignedTaskClient::new(
        transport.clone(),
        RequestSigner::new(Credentials::new("test-key", "test-secret")),
        RUN_PATH,
    )
}

#[tokio::test]
async fn test_submit_returns_task_id() {
    let transport = Arc::new(ScriptedTransport::new(vec![accepted("abc")]));
    let client = client(&transport);

    let submission = client
        .submit(&GenerationRequest::new("Summarise retrieval-augmented generation"))
        .await
        .expect("submission should be accepted");

    assert_eq!(submission.task_id(), "abc");
    assert!(submission.accepted());

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].path, RUN_PATH);
    assert_eq!(
        requests[0].body["prompt"],
        "Summarise retrieval-augmented generation"
    );
    assert_eq!(requests[0].body["seed"], "123456");
}

#[tokio::test]
async fn test_submit_accepts_numeric_task_id() {
    let transport = Arc::new(ScriptedTransport::new(vec![ok(
        json!({"result": true, "taskid": 9001}),
    )]));

    let submission = client(&transport)
        .submit(&GenerationRequest::new("hi"))
        .await
        .unwrap();
    assert_eq!(submission.task_id(), "9001");
}

#[tokio::test]
async fn test_submit_http_error_is_submission_error() {
    let transport = Arc::new(ScriptedTransport::new(vec![TransportResponse::new(
        500,
        "internal error",
    )]));

    let err = client(&transport)
        .submit(&GenerationRequest::new("hi"))
        .await
        .unwrap_err();

    assert!(err.is_submission_error(), "unexpected error: {err}");
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_submit_rejected_result_is_submission_error() {
    let transport = Arc::new(ScriptedTransport::new(vec![ok(
        json!({"result": false, "errors": ["insufficient balance"]}),
    )]));

    let err = client(&transport)
        .submit(&GenerationRequest::new("hi"))
        .await
        .unwrap_err();

    assert!(err.is_submission_error());
    assert!(err.to_string().contains("insufficient balance"));
}

#[tokio::test]
async fn test_submit_without_task_id_is_submission_error() {
    let transport = Arc::new(ScriptedTransport::new(vec![ok(json!({"result": true}))]));

    let err = client(&transport)
        .submit(&GenerationRequest::new("hi"))
        .await
        .unwrap_err();
    assert!(err.is_submission_error());
}

#[tokio::test]
async fn test_submit_invalid_json_and_network_errors_are_submission_errors() {
    let transport = Arc::new(
        ScriptedTransport::new(vec![TransportResponse::new(200, "<html>oops</html>")])
            .then_network_error("connection reset"),
    );
    let client = client(&transport);

    let err = client.submit(&GenerationRequest::new("a")).await.unwrap_err();
    assert!(err.is_submission_error());

    let err = client.submit(&GenerationRequest::new("b")).await.unwrap_err();
    assert!(err.is_submission_error());
    assert!(err.to_string().contains("connection reset"));
}

#[tokio::test]
async fn test_poll_stops_at_first_completed_status() {
    let transport = Arc::new(ScriptedTransport::new(vec![
        task_in("task_queue"),
        task_in("task_start"),
        finished_with("The answer"),
        task_in("task_start"),
    ]));

    let result = client(&transport)
        .poll("t-1", Duration::ZERO, Duration::from_secs(5))
        .await
        .expect("task should complete");

    assert_eq!(transport.count_for(TASK_DETAIL_PATH), 3);
    assert_eq!(result.task_id(), "t-1");
    assert_eq!(result.status(), &TaskStatus::PostprocessEnd);
    assert_eq!(result.raw()["debugoutput"], "The answer");
}

#[tokio::test]
async fn test_poll_sends_task_id_in_detail_body() {
    let transport = Arc::new(ScriptedTransport::new(vec![finished_with("done")]));

    client(&transport)
        .poll("t-1", Duration::ZERO, Duration::from_secs(1))
        .await
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0].path, TASK_DETAIL_PATH);
    assert_eq!(requests[0].body, json!({"taskid": "t-1"}));
}

#[tokio::test]
async fn test_poll_cancelled_on_first_observation() {
    let transport = Arc::new(ScriptedTransport::new(vec![task_in("task_cancel")]));

    let err = client(&transport)
        .poll("t-1", Duration::ZERO, Duration::from_secs(5))
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_poll_empty_tasklist_keeps_waiting() {
    let transport = Arc::new(ScriptedTransport::new(vec![
        empty_tasklist(),
        ok(json!({"result": true})),
        finished_with("late but fine"),
    ]));

    let result = client(&transport)
        .poll("t-1", Duration::ZERO, Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(transport.request_count(), 3);
    assert_eq!(result.raw()["debugoutput"], "late but fine");
}

#[tokio::test]
async fn test_poll_entry_without_status_keeps_waiting() {
    let transport = Arc::new(ScriptedTransport::new(vec![
        ok(json!({"result": true, "tasklist": [{"id": "t-1", "debugoutput": ""}]})),
        ok(json!({"result": true, "tasklist": [{"id": "t-1", "status": null}]})),
        finished_with("status arrived"),
    ]));
    let client = client(&transport);

    let result = client
        .poll("t-1", Duration::ZERO, Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(transport.request_count(), 3);
    assert_eq!(result.status(), &TaskStatus::PostprocessEnd);
}

#[tokio::test]
async fn test_detail_without_status_is_not_listed() {
    let transport = Arc::new(ScriptedTransport::new(vec![ok(
        json!({"result": true, "tasklist": [{"id": "t-1"}]}),
    )]));

    assert!(client(&transport).detail("t-1").await.unwrap().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_poll_times_out_after_deadline() {
    let transport = Arc::new(ScriptedTransport::default().with_fallback(task_in("task_start")));

    let err = client(&transport)
        .poll("t-1", Duration::from_millis(100), Duration::from_secs(1))
        .await
        .unwrap_err();

    assert!(err.is_timeout(), "unexpected error: {err}");
    assert_eq!(transport.request_count(), 10);
    match err {
        DomainError::PollTimeout { task_id, waited } => {
            assert_eq!(task_id, "t-1");
            assert!(waited >= Duration::from_secs(1));
        }
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_poll_interval_longer_than_timeout_stops_at_deadline() {
    let transport = Arc::new(ScriptedTransport::default().with_fallback(task_in("task_start")));
    let started = Instant::now();

    let err = client(&transport)
        .poll("t-1", Duration::from_secs(10), Duration::from_secs(1))
        .await
        .unwrap_err();

    assert_eq!(started.elapsed(), Duration::from_secs(1));
    assert_eq!(transport.request_count(), 1);
    match err {
        DomainError::PollTimeout { waited, .. } => assert_eq!(waited, Duration::from_secs(1)),
        other => panic!("expected timeout, got {other:?}"),
    }
}

/// Answers every request with a running task, but only after `delay`.
struct SlowTransport {
    delay: Duration,
}

#[async_trait]
impl TaskTransport for SlowTransport {
    async fn post(
        &self,
        _path: &str,
        _headers: &AuthHeaders,
        _body: &Value,
    ) -> Result<TransportResponse, DomainError> {
        tokio::time::sleep(self.delay).await;
        Ok(task_in("task_start"))
    }
}

#[tokio::test(start_paused = true)]
async fn test_deadline_bounds_in_flight_detail_request() {
    let client = SignedTaskClient::new(
        Arc::new(SlowTransport {
            delay: Duration::from_secs(5),
        }),
        RequestSigner::new(Credentials::new("test-key", "test-secret")),
        RUN_PATH,
    );
    let started = Instant::now();

    let err = client
        .poll("t-1", Duration::from_millis(100), Duration::from_secs(1))
        .await
        .unwrap_err();

    assert!(err.is_timeout(), "unexpected error: {err}");
    assert_eq!(started.elapsed(), Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn test_abandoned_poll_leaves_client_usable() {
    let transport = Arc::new(ScriptedTransport::default().with_fallback(task_in("task_start")));
    let client = client(&transport);

    let abandoned = tokio::time::timeout(
        Duration::from_millis(500),
        client.poll("t-1", Duration::from_millis(100), Duration::from_secs(60)),
    )
    .await;
    assert!(abandoned.is_err(), "poll should still be waiting");
    let polls_before_run = transport.request_count();
    assert!(polls_before_run >= 5);

    transport.push(accepted("t-2"));
    transport.push(finished_with("second try"));

    let result = client
        .run(&GenerationRequest::new("again"), Duration::ZERO, Duration::from_secs(5))
        .await
        .expect("client should still work after an abandoned poll");

    assert_eq!(result.task_id(), "t-2");
    assert_eq!(result.raw()["debugoutput"], "second try");
    assert_eq!(transport.request_count(), polls_before_run + 2);
}

#[tokio::test(start_paused = true)]
async fn test_poll_with_zero_timeout_never_polls() {
    let transport = Arc::new(ScriptedTransport::default().with_fallback(finished_with("x")));

    let err = client(&transport)
        .poll("t-1", Duration::from_millis(100), Duration::ZERO)
        .await
        .unwrap_err();

    assert!(err.is_timeout());
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_poll_failed_status_is_task_failure() {
    let transport = Arc::new(ScriptedTransport::new(vec![
        task_in("task_start"),
        task_in("task_error"),
    ]));

    let err = client(&transport)
        .poll("t-1", Duration::ZERO, Duration::from_secs(5))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::TaskFailed { ref status, .. } if status == "task_error"));
}

#[tokio::test]
async fn test_poll_unknown_status_fails_by_default() {
    let transport = Arc::new(ScriptedTransport::new(vec![task_in("task_mystery")]));

    let err = client(&transport)
        .poll("t-1", Duration::ZERO, Duration::from_secs(5))
        .await
        .unwrap_err();

    assert!(matches!(err, DomainError::UnknownStatus { ref status, .. } if status == "task_mystery"));
}

#[tokio::test]
async fn test_poll_unknown_status_can_complete() {
    let transport = Arc::new(ScriptedTransport::new(vec![task_in("task_mystery")]));

    let result = client(&transport)
        .with_unknown_status_policy(UnknownStatusPolicy::Complete)
        .poll("t-1", Duration::ZERO, Duration::from_secs(5))
        .await
        .unwrap();

    assert_eq!(result.status(), &TaskStatus::Unknown("task_mystery".to_string()));
}

#[tokio::test]
async fn test_poll_detail_http_error_is_transport_error() {
    let transport = Arc::new(ScriptedTransport::new(vec![TransportResponse::new(
        502,
        "bad gateway",
    )]));

    let err = client(&transport)
        .poll("t-1", Duration::ZERO, Duration::from_secs(5))
        .await
        .unwrap_err();

    assert!(err.is_transport_error());
}

#[tokio::test]
async fn test_run_submits_once_then_polls() {
    let transport = Arc::new(ScriptedTransport::new(vec![
        accepted("t-1"),
        task_in("task_assign"),
        finished_with("report"),
    ]));

    let result = client(&transport)
        .run(
            &GenerationRequest::new("compare vector databases"),
            Duration::ZERO,
            Duration::from_secs(5),
        )
        .await
        .unwrap();

    assert_eq!(transport.count_for(RUN_PATH), 1);
    assert_eq!(transport.count_for(TASK_DETAIL_PATH), 2);
    assert_eq!(result.raw()["debugoutput"], "report");
}

#[tokio::test]
async fn test_every_request_is_signed() {
    let transport = Arc::new(ScriptedTransport::new(vec![
        accepted("t-1"),
        finished_with("ok"),
    ]));

    client(&transport)
        .run(&GenerationRequest::new("hi"), Duration::ZERO, Duration::from_secs(5))
        .await
        .unwrap();

    for request in transport.requests() {
        let headers = &request.headers;
        assert_eq!(headers.api_key(), "test-key");
        assert!(headers.nonce().parse::<u64>().is_ok());
        assert_eq!(
            headers.signature(),
            sign("test-secret", headers.nonce(), "test-key")
        );
    }
}

#[tokio::test]
async fn test_kill_reports_acceptance() {
    let transport = Arc::new(ScriptedTransport::new(vec![
        ok(json!({"result": true})),
        ok(json!({"result": false, "errors": ["task already finished"]})),
    ]));
    let client = client(&transport);

    assert!(client.kill("t-1").await.unwrap());
    assert!(!client.kill("t-1").await.unwrap());

    let requests = transport.requests();
    assert_eq!(requests[0].path, TASK_KILL_PATH);
    assert_eq!(requests[0].body, json!({"taskid": "t-1"}));
}

#[tokio::test]
async fn test_detail_reports_not_listed() {
    let transport = Arc::new(ScriptedTransport::new(vec![
        empty_tasklist(),
        task_in("task_output"),
    ]));
    let client = client(&transport);

    assert!(client.detail("t-1").await.unwrap().is_none());
    let snapshot = client.detail("t-1").await.unwrap().unwrap();
    assert_eq!(snapshot.status, TaskStatus::EmittingOutput);
}
