//! NATS task submission
//!
//! Publishes a JSON [`TaskEnvelope`] per task. The subject comes from the
//! `queue` option, then `routing_key`, then `cacheback.tasks`. The connection
//! is opened on the first submission and shared afterwards.

use crate::constants::{NATS_DEFAULT_SUBJECT, NATS_SUBJECT_OPTIONS};
use async_nats::Client;
use async_trait::async_trait;
use cacheback_domain::constants::{LOG_TARGET, TASK_QUEUE_NATS};
use cacheback_domain::error::{Error, Result};
use cacheback_domain::ports::TaskSubmitter;
use cacheback_domain::value_objects::{EnqueuedTask, TaskOptions, TaskPayload};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::{debug, info};

/// A task as published on NATS
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskEnvelope {
    /// Task identifier
    pub id: String,
    /// Entry point the worker runs
    pub task: String,
    /// Keyword arguments for the entry point
    pub kwargs: TaskPayload,
    /// Submission options, forwarded unchanged
    pub options: TaskOptions,
    /// Submission time
    pub submitted_at: DateTime<Utc>,
}

/// Subject a task with `options` is published to
pub fn resolve_subject(options: &TaskOptions) -> &str {
    NATS_SUBJECT_OPTIONS
        .iter()
        .find_map(|key| options.get_str(key))
        .unwrap_or(NATS_DEFAULT_SUBJECT)
}

/// Task submitter publishing to a NATS server
pub struct NatsTaskSubmitter {
    url: String,
    client_name: Option<String>,
    client: OnceCell<Client>,
}

impl NatsTaskSubmitter {
    /// Create a submitter for `url`
    ///
    /// Does not connect; the first submission does.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client_name: None,
            client: OnceCell::new(),
        }
    }

    /// Identify this client to the server
    #[must_use]
    pub fn with_client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = Some(name.into());
        self
    }

    /// Configured server URL
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn client(&self) -> Result<&Client> {
        self.client
            .get_or_try_init(|| async {
                info!(target: LOG_TARGET, url = self.url.as_str(), "Connecting to NATS server");

                let mut options = async_nats::ConnectOptions::new();
                if let Some(name) = &self.client_name {
                    options = options.name(name);
                }

                options.connect(self.url.as_str()).await.map_err(|e| {
                    Error::task_queue_with_source(
                        format!("Failed to connect to NATS server at {}: {e}", self.url),
                        e,
                    )
                })
            })
            .await
    }
}

#[async_trait]
impl TaskSubmitter for NatsTaskSubmitter {
    async fn apply_async(
        &self,
        entry_point: &str,
        kwargs: TaskPayload,
        options: TaskOptions,
    ) -> Result<EnqueuedTask> {
        let subject = resolve_subject(&options).to_string();
        let envelope = TaskEnvelope {
            id: uuid::Uuid::new_v4().to_string(),
            task: entry_point.to_string(),
            kwargs,
            options,
            submitted_at: Utc::now(),
        };
        let body = serde_json::to_vec(&envelope)?;

        let client = self.client().await?;
        client
            .publish(subject.clone(), body.into())
            .await
            .map_err(|e| {
                Error::task_queue_with_source(
                    format!("Failed to publish task to NATS subject '{subject}': {e}"),
                    e,
                )
            })?;

        debug!(target: LOG_TARGET, subject = subject.as_str(), task_id = envelope.id.as_str(), "Task published to NATS");

        let mut task = EnqueuedTask::new(envelope.id, TASK_QUEUE_NATS, subject);
        task.enqueued_at = envelope.submitted_at;
        Ok(task)
    }

    fn backend_name(&self) -> &str {
        TASK_QUEUE_NATS
    }
}

impl std::fmt::Debug for NatsTaskSubmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NatsTaskSubmitter")
            .field("url", &self.url)
            .field("connected", &self.client.initialized())
            .finish()
    }
}
