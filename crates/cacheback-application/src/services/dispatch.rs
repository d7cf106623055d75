//! Task queue dispatch
//!
//! Exactly one task queue backend is active at a time. The selection setting
//! and the compiled-in integrations are resolved once into an
//! [`ActiveTaskQueue`]; every dispatch then goes straight to it.
//!
//! | Setting | Integration | Dispatch |
//! |---------|-------------|----------|
//! | unset | default (`nats`) | as for `nats` |
//! | `"nats"` | [`TaskSubmitter`] | `apply_async(entry, payload, options)` |
//! | `"redis"` | [`QueueFactory`] | `get_queue(options)?.enqueue(entry, payload)` |
//! | anything else, or integration missing | - | [`Error::Configuration`] |

use cacheback_domain::constants::{
    DEFAULT_TASK_QUEUE, LOG_TARGET, REFRESH_ENTRY_POINT, TASK_QUEUE_NATS, TASK_QUEUE_REDIS,
};
use cacheback_domain::error::{Error, Result};
use cacheback_domain::ports::{QueueFactory, TaskSubmitter};
use cacheback_domain::value_objects::{EnqueuedTask, RefreshRequest, TaskOptions, TaskPayload};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Recognised task queue backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskQueueKind {
    /// Submission-style backend over NATS
    Nats,
    /// Named-queue backend over Redis
    Redis,
}

impl TaskQueueKind {
    /// Parse a backend identifier. Matching is exact.
    pub fn parse(selection: &str) -> Option<Self> {
        match selection {
            TASK_QUEUE_NATS => Some(Self::Nats),
            TASK_QUEUE_REDIS => Some(Self::Redis),
            _ => None,
        }
    }

    /// Backend identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nats => TASK_QUEUE_NATS,
            Self::Redis => TASK_QUEUE_REDIS,
        }
    }
}

impl fmt::Display for TaskQueueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task queue integrations available in this process
#[derive(Clone, Default)]
pub struct TaskQueueIntegrations {
    /// Named-queue integration
    pub redis: Option<Arc<dyn QueueFactory>>,
    /// Submission integration
    pub nats: Option<Arc<dyn TaskSubmitter>>,
}

impl TaskQueueIntegrations {
    /// No integration available
    pub fn none() -> Self {
        Self::default()
    }

    /// Provide the named-queue integration
    pub fn with_redis(mut self, factory: Arc<dyn QueueFactory>) -> Self {
        self.redis = Some(factory);
        self
    }

    /// Provide the submission integration
    pub fn with_nats(mut self, submitter: Arc<dyn TaskSubmitter>) -> Self {
        self.nats = Some(submitter);
        self
    }
}

impl fmt::Debug for TaskQueueIntegrations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskQueueIntegrations")
            .field("redis", &self.redis.is_some())
            .field("nats", &self.nats.is_some())
            .finish()
    }
}

/// The task queue selected at startup
#[derive(Clone)]
pub enum ActiveTaskQueue {
    /// Named-queue backend
    NamedQueue(Arc<dyn QueueFactory>),
    /// Submission backend
    Submitter(Arc<dyn TaskSubmitter>),
    /// Unrecognised selection, or its integration is not available
    Unavailable {
        /// The configured selection
        selection: String,
    },
}

impl fmt::Debug for ActiveTaskQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NamedQueue(factory) => f
                .debug_tuple("NamedQueue")
                .field(&factory.backend_name())
                .finish(),
            Self::Submitter(submitter) => f
                .debug_tuple("Submitter")
                .field(&submitter.backend_name())
                .finish(),
            Self::Unavailable { selection } => f
                .debug_struct("Unavailable")
                .field("selection", selection)
                .finish(),
        }
    }
}

/// Forwards refresh tasks to the active task queue
#[derive(Debug, Clone)]
pub struct TaskDispatcher {
    selection: String,
    active: ActiveTaskQueue,
}

impl TaskDispatcher {
    /// Resolve the active task queue once
    ///
    /// An unset selection falls back to the default backend. An unrecognised
    /// selection is accepted here and reported on every dispatch.
    pub fn resolve(selection: Option<&str>, integrations: TaskQueueIntegrations) -> Self {
        let selection = selection.unwrap_or(DEFAULT_TASK_QUEUE).to_string();

        let active = match TaskQueueKind::parse(&selection) {
            Some(TaskQueueKind::Redis) => integrations.redis.map(ActiveTaskQueue::NamedQueue),
            Some(TaskQueueKind::Nats) => integrations.nats.map(ActiveTaskQueue::Submitter),
            None => None,
        }
        .unwrap_or_else(|| ActiveTaskQueue::Unavailable {
            selection: selection.clone(),
        });

        match &active {
            ActiveTaskQueue::Unavailable { selection } => warn!(
                target: LOG_TARGET,
                selection = selection.as_str(),
                "Configured task queue is not available; refresh dispatch will fail"
            ),
            _ => info!(
                target: LOG_TARGET,
                selection = selection.as_str(),
                "Task queue selected"
            ),
        }

        Self { selection, active }
    }

    /// The configured selection, after defaulting
    pub fn selection(&self) -> &str {
        &self.selection
    }

    /// The resolved backend
    pub fn active(&self) -> &ActiveTaskQueue {
        &self.active
    }

    /// Whether dispatch can succeed
    pub fn is_available(&self) -> bool {
        !matches!(self.active, ActiveTaskQueue::Unavailable { .. })
    }

    /// Submit `payload` to the refresh entry point of the active backend
    pub async fn enqueue_task(
        &self,
        payload: TaskPayload,
        options: Option<TaskOptions>,
    ) -> Result<EnqueuedTask> {
        let options = options.unwrap_or_default();

        let task = match &self.active {
            ActiveTaskQueue::NamedQueue(factory) => {
                let queue = factory.get_queue(&options)?;
                queue.enqueue(REFRESH_ENTRY_POINT, payload).await?
            }
            ActiveTaskQueue::Submitter(submitter) => {
                submitter
                    .apply_async(REFRESH_ENTRY_POINT, payload, options)
                    .await?
            }
            ActiveTaskQueue::Unavailable { selection } => {
                return Err(Error::configuration(format!(
                    "Unknown task queue configured: {selection}"
                )));
            }
        };

        debug!(
            target: LOG_TARGET,
            task_id = task.id.as_str(),
            backend = task.backend.as_str(),
            queue = task.queue.as_str(),
            "Refresh task enqueued"
        );
        Ok(task)
    }

    /// Enqueue the canonical payload for `request`
    pub async fn enqueue_refresh(
        &self,
        request: &RefreshRequest,
        options: Option<TaskOptions>,
    ) -> Result<EnqueuedTask> {
        self.enqueue_task(request.to_payload()?, options).await
    }
}
