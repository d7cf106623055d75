//! Shared test doubles and log capture

use async_trait::async_trait;
use cacheback_application::registry::{
    CACHE_BACKENDS, CacheBackendConfig, CacheBackendEntry, JOB_CLASSES, JobClassEntry,
};
use cacheback_domain::error::{Error, Result};
use cacheback_domain::ports::{
    CacheBackend, CacheEntryConfig, CacheStats, Job, JobQueue, QueueFactory, TaskSubmitter,
};
use cacheback_domain::value_objects::{EnqueuedTask, JobArgs, TaskOptions, TaskPayload};
use serde_json::{Value, json};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

// ============================================================================
// Log capture
// ============================================================================

/// Events recorded while a capture is active
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<(Level, String)>>>);

impl CapturedLogs {
    pub fn at(&self, level: Level) -> Vec<String> {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message.clone())
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.at(Level::ERROR)
    }
}

struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

struct CaptureLayer(CapturedLogs);

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor(String::new());
        event.record(&mut visitor);
        self.0
            .0
            .lock()
            .unwrap()
            .push((*event.metadata().level(), visitor.0));
    }
}

/// Run `f` with every log event captured
pub fn capture_logs<R>(f: impl FnOnce() -> R) -> (R, CapturedLogs) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::registry().with(CaptureLayer(logs.clone()));
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, logs)
}

/// Capture log events until the guard is dropped
pub fn capture_logs_scoped() -> (tracing::subscriber::DefaultGuard, CapturedLogs) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::registry().with(CaptureLayer(logs.clone()));
    (tracing::subscriber::set_default(subscriber), logs)
}

// ============================================================================
// Task queue doubles
// ============================================================================

/// One call observed by a recording queue
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub entry_point: String,
    pub payload: TaskPayload,
    pub options: TaskOptions,
}

#[derive(Default)]
pub struct RecordingQueueFactory {
    pub calls: Mutex<Vec<RecordedCall>>,
}

struct RecordingQueue {
    name: String,
    options: TaskOptions,
    factory: Arc<RecordingQueueFactory>,
}

#[async_trait]
impl JobQueue for RecordingQueue {
    fn name(&self) -> &str {
        &self.name
    }

    async fn enqueue(&self, entry_point: &str, payload: TaskPayload) -> Result<EnqueuedTask> {
        self.factory.calls.lock().unwrap().push(RecordedCall {
            entry_point: entry_point.to_string(),
            payload,
            options: self.options.clone(),
        });
        Ok(EnqueuedTask::new("job-1", "recording-queue", &self.name))
    }
}

/// Queue factory handing out queues that report back to it
#[derive(Clone, Default)]
pub struct SharedQueueFactory(pub Arc<RecordingQueueFactory>);

impl QueueFactory for SharedQueueFactory {
    fn get_queue(&self, options: &TaskOptions) -> Result<Arc<dyn JobQueue>> {
        let name = options.get_str("name").unwrap_or("default").to_string();
        Ok(Arc::new(RecordingQueue {
            name,
            options: options.clone(),
            factory: Arc::clone(&self.0),
        }))
    }

    fn backend_name(&self) -> &str {
        "recording-queue"
    }
}

impl SharedQueueFactory {
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.0.calls.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub struct RecordingSubmitter {
    pub calls: Mutex<Vec<RecordedCall>>,
    pub fail: bool,
}

impl RecordingSubmitter {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaskSubmitter for RecordingSubmitter {
    async fn apply_async(
        &self,
        entry_point: &str,
        kwargs: TaskPayload,
        options: TaskOptions,
    ) -> Result<EnqueuedTask> {
        self.calls.lock().unwrap().push(RecordedCall {
            entry_point: entry_point.to_string(),
            payload: kwargs,
            options,
        });
        if self.fail {
            return Err(Error::task_queue("broker unreachable"));
        }
        Ok(EnqueuedTask::new("task-1", "recording-submitter", "cacheback.tasks"))
    }

    fn backend_name(&self) -> &str {
        "recording-submitter"
    }
}

// ============================================================================
// Closeable cache backend
// ============================================================================

/// Cache backend that counts `close()` calls
#[derive(Debug, Default)]
pub struct CloseCountingCache {
    pub closes: AtomicUsize,
    pub fail_close: bool,
}

impl CloseCountingCache {
    pub fn closes(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheBackend for CloseCountingCache {
    async fn get_json(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn set_json(&self, _key: &str, _value: &str, _config: CacheEntryConfig) -> Result<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    async fn exists(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    async fn clear(&self) -> Result<()> {
        Ok(())
    }

    async fn stats(&self) -> Result<CacheStats> {
        Ok(CacheStats::new())
    }

    async fn size(&self) -> Result<usize> {
        Ok(0)
    }

    fn backend_name(&self) -> &str {
        "closeable"
    }

    fn supports_close(&self) -> bool {
        true
    }

    async fn close(&self) -> Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        if self.fail_close {
            return Err(Error::cache("connection already gone"));
        }
        Ok(())
    }
}

fn closeable_factory(_config: &CacheBackendConfig) -> Result<Arc<dyn CacheBackend>> {
    Ok(Arc::new(CloseCountingCache::default()))
}

#[linkme::distributed_slice(CACHE_BACKENDS)]
static CLOSEABLE_BACKEND: CacheBackendEntry = CacheBackendEntry {
    name: "closeable",
    description: "Test backend that needs closing",
    factory: closeable_factory,
};

// ============================================================================
// Job classes
// ============================================================================

/// Job that echoes its constructor and call arguments
pub struct EchoJob {
    instance: JobArgs,
}

#[async_trait]
impl Job for EchoJob {
    async fn refresh(&self, call: &JobArgs) -> Result<Value> {
        Ok(json!({
            "obj_args": self.instance.args,
            "obj_kwargs": self.instance.kwargs,
            "call_args": call.args,
            "call_kwargs": call.kwargs,
        }))
    }
}

fn echo_job_factory(args: &JobArgs) -> Result<Arc<dyn Job>> {
    Ok(Arc::new(EchoJob {
        instance: args.clone(),
    }))
}

/// Job whose refresh always fails
pub struct FailingJob;

#[async_trait]
impl Job for FailingJob {
    async fn refresh(&self, _call: &JobArgs) -> Result<Value> {
        Err(Error::job("upstream timed out"))
    }
}

fn failing_job_factory(_args: &JobArgs) -> Result<Arc<dyn Job>> {
    Ok(Arc::new(FailingJob))
}

#[linkme::distributed_slice(JOB_CLASSES)]
static ECHO_JOB: JobClassEntry = JobClassEntry {
    module: "tests.jobs",
    name: "EchoJob",
    description: "Echoes its arguments",
    factory: echo_job_factory,
};

#[linkme::distributed_slice(JOB_CLASSES)]
static FAILING_JOB: JobClassEntry = JobClassEntry {
    module: "tests.jobs",
    name: "FailingJob",
    description: "Always fails to refresh",
    factory: failing_job_factory,
};
