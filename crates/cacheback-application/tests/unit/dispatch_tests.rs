//! Task dispatch tests
//!
//! Recording doubles stand in for the NATS and Redis integrations so every
//! backend call is observable.

use crate::test_utils::{RecordingSubmitter, SharedQueueFactory};
use cacheback_application::services::{ActiveTaskQueue, TaskDispatcher, TaskQueueIntegrations};
use cacheback_domain::constants::REFRESH_ENTRY_POINT;
use cacheback_domain::error::Error;
use cacheback_domain::value_objects::{JobArgs, RefreshRequest, TaskOptions, TaskPayload};
use serde_json::json;
use std::sync::Arc;

fn sample_payload() -> TaskPayload {
    TaskPayload::new()
        .with("klass_str", "app.jobs.UserCountJob")
        .with("obj_args", json!([]))
        .with("obj_kwargs", json!({"lifetime": 600}))
        .with("call_args", json!(["eu-west"]))
        .with("call_kwargs", json!({}))
}

fn both_integrations() -> (SharedQueueFactory, Arc<RecordingSubmitter>, TaskQueueIntegrations) {
    let factory = SharedQueueFactory::default();
    let submitter = Arc::new(RecordingSubmitter::default());
    let integrations = TaskQueueIntegrations::none()
        .with_redis(Arc::new(factory.clone()))
        .with_nats(submitter.clone());
    (factory, submitter, integrations)
}

#[tokio::test]
async fn test_named_queue_receives_single_enqueue() {
    let (factory, submitter, integrations) = both_integrations();
    let dispatcher = TaskDispatcher::resolve(Some("redis"), integrations);
    assert!(matches!(dispatcher.active(), ActiveTaskQueue::NamedQueue(_)));

    let options = TaskOptions::new().with("name", "reports");
    let task = dispatcher
        .enqueue_task(sample_payload(), Some(options.clone()))
        .await
        .unwrap();

    let calls = factory.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].entry_point, REFRESH_ENTRY_POINT);
    assert_eq!(calls[0].payload, sample_payload());
    assert_eq!(calls[0].options, options);
    assert_eq!(task.queue, "reports");
    assert!(submitter.calls().is_empty());
}

#[tokio::test]
async fn test_named_queue_without_options_uses_default_queue() {
    let (factory, _submitter, integrations) = both_integrations();
    let dispatcher = TaskDispatcher::resolve(Some("redis"), integrations);

    let task = dispatcher.enqueue_task(sample_payload(), None).await.unwrap();

    assert_eq!(task.queue, "default");
    assert!(factory.calls()[0].options.is_empty());
}

#[tokio::test]
async fn test_submitter_receives_payload_and_options() {
    let (factory, submitter, integrations) = both_integrations();
    let dispatcher = TaskDispatcher::resolve(Some("nats"), integrations);

    let options = TaskOptions::new().with("queue", "refresh.high");
    dispatcher
        .enqueue_task(sample_payload(), Some(options.clone()))
        .await
        .unwrap();

    let calls = submitter.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].entry_point, REFRESH_ENTRY_POINT);
    assert_eq!(calls[0].payload, sample_payload());
    assert_eq!(calls[0].options, options);
    assert!(factory.calls().is_empty());
}

#[tokio::test]
async fn test_unset_selection_dispatches_to_default_backend() {
    let (factory, submitter, integrations) = both_integrations();
    let dispatcher = TaskDispatcher::resolve(None, integrations);

    dispatcher.enqueue_task(sample_payload(), None).await.unwrap();

    assert_eq!(submitter.calls().len(), 1);
    assert!(submitter.calls()[0].options.is_empty());
    assert!(factory.calls().is_empty());
}

#[tokio::test]
async fn test_unknown_selection_fails_without_backend_call() {
    let (factory, submitter, integrations) = both_integrations();
    let dispatcher = TaskDispatcher::resolve(Some("sqs"), integrations);
    assert!(!dispatcher.is_available());

    let err = dispatcher
        .enqueue_task(sample_payload(), None)
        .await
        .unwrap_err();

    assert!(err.is_configuration());
    assert_eq!(err.to_string(), "Configuration error: Unknown task queue configured: sqs");
    assert!(factory.calls().is_empty());
    assert!(submitter.calls().is_empty());
}

#[tokio::test]
async fn test_selected_backend_without_integration_fails() {
    let submitter = Arc::new(RecordingSubmitter::default());
    let integrations = TaskQueueIntegrations::none().with_nats(submitter.clone());
    let dispatcher = TaskDispatcher::resolve(Some("redis"), integrations);

    let err = dispatcher
        .enqueue_task(sample_payload(), None)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Unknown task queue configured: redis"));
    assert!(submitter.calls().is_empty());
}

#[tokio::test]
async fn test_backend_errors_propagate() {
    let submitter = Arc::new(RecordingSubmitter::failing());
    let integrations = TaskQueueIntegrations::none().with_nats(submitter.clone());
    let dispatcher = TaskDispatcher::resolve(Some("nats"), integrations);

    let err = dispatcher
        .enqueue_task(sample_payload(), None)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::TaskQueue { .. }));
    assert_eq!(submitter.calls().len(), 1);
}

#[tokio::test]
async fn test_enqueue_refresh_builds_canonical_payload() {
    let (_factory, submitter, integrations) = both_integrations();
    let dispatcher = TaskDispatcher::resolve(Some("nats"), integrations);

    let request = RefreshRequest::new("app.jobs.UserCountJob")
        .with_instance_args(JobArgs::new().kwarg("lifetime", 600))
        .with_call_args(JobArgs::new().arg("eu-west"));
    dispatcher.enqueue_refresh(&request, None).await.unwrap();

    let calls = submitter.calls();
    assert_eq!(calls[0].payload, request.to_payload().unwrap());
    assert_eq!(calls[0].payload.get("klass_str"), Some(&json!("app.jobs.UserCountJob")));
}
