//! Redis named-queue integration
//!
//! Each named queue is a Redis list. Enqueueing pushes a JSON
//! [`QueueMessage`] onto `cacheback:queue:<name>`; workers pop from the other
//! end.
//!
//! Recognised options for [`QueueFactory::get_queue`]:
//!
//! | Option | Meaning | Default |
//! |--------|---------|---------|
//! | `name` | queue name | `"default"` |
//! | `default_timeout` | job timeout in seconds | factory timeout |

use crate::constants::{
    QUEUE_OPTION_DEFAULT_TIMEOUT, QUEUE_OPTION_NAME, REDIS_QUEUE_DEFAULT_TIMEOUT_SECS,
    REDIS_QUEUE_KEY_PREFIX,
};
use async_trait::async_trait;
use cacheback_domain::constants::{DEFAULT_QUEUE_NAME, LOG_TARGET, TASK_QUEUE_REDIS};
use cacheback_domain::error::{Error, Result};
use cacheback_domain::ports::{JobQueue, QueueFactory};
use cacheback_domain::value_objects::{EnqueuedTask, TaskOptions, TaskPayload};
use chrono::{DateTime, Utc};
use redis::{AsyncCommands, Client};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// A job as stored in a Redis queue list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueMessage {
    /// Job identifier
    pub id: String,
    /// Entry point the worker runs
    pub func: String,
    /// Keyword arguments for the entry point
    pub kwargs: TaskPayload,
    /// Queue name
    pub queue: String,
    /// Job timeout in seconds
    pub timeout: u64,
    /// Enqueue time
    pub enqueued_at: DateTime<Utc>,
}

/// Hands out named Redis queues
#[derive(Clone)]
pub struct RedisQueueFactory {
    client: Client,
    default_timeout: u64,
}

impl RedisQueueFactory {
    /// Create a factory for `connection_string`
    ///
    /// Does not connect; each enqueue opens its own connection.
    pub fn new(connection_string: &str) -> Result<Self> {
        let client = Client::open(connection_string).map_err(|e| {
            Error::configuration_with_source(format!("Invalid Redis queue URL: {e}"), e)
        })?;
        Ok(Self {
            client,
            default_timeout: REDIS_QUEUE_DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Set the timeout used when the options carry none
    #[must_use]
    pub fn with_default_timeout(mut self, secs: u64) -> Self {
        self.default_timeout = secs;
        self
    }

    /// Build a typed queue handle
    pub fn queue(&self, options: &TaskOptions) -> RedisJobQueue {
        RedisJobQueue {
            client: self.client.clone(),
            name: options
                .get_str(QUEUE_OPTION_NAME)
                .unwrap_or(DEFAULT_QUEUE_NAME)
                .to_string(),
            timeout: options
                .get_u64(QUEUE_OPTION_DEFAULT_TIMEOUT)
                .unwrap_or(self.default_timeout),
        }
    }
}

impl QueueFactory for RedisQueueFactory {
    fn get_queue(&self, options: &TaskOptions) -> Result<Arc<dyn JobQueue>> {
        Ok(Arc::new(self.queue(options)))
    }

    fn backend_name(&self) -> &str {
        TASK_QUEUE_REDIS
    }
}

impl std::fmt::Debug for RedisQueueFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisQueueFactory")
            .field("default_timeout", &self.default_timeout)
            .finish_non_exhaustive()
    }
}

/// One named Redis queue
#[derive(Clone)]
pub struct RedisJobQueue {
    client: Client,
    name: String,
    timeout: u64,
}

impl RedisJobQueue {
    /// Redis key of the queue list
    pub fn key(&self) -> String {
        format!("{REDIS_QUEUE_KEY_PREFIX}{}", self.name)
    }

    /// Job timeout in seconds
    pub fn timeout(&self) -> u64 {
        self.timeout
    }

    /// Build the message pushed for one job
    pub fn message(&self, entry_point: &str, payload: TaskPayload) -> QueueMessage {
        QueueMessage {
            id: uuid::Uuid::new_v4().to_string(),
            func: entry_point.to_string(),
            kwargs: payload,
            queue: self.name.clone(),
            timeout: self.timeout,
            enqueued_at: Utc::now(),
        }
    }
}

#[async_trait]
impl JobQueue for RedisJobQueue {
    fn name(&self) -> &str {
        &self.name
    }

    async fn enqueue(&self, entry_point: &str, payload: TaskPayload) -> Result<EnqueuedTask> {
        let message = self.message(entry_point, payload);
        let body = serde_json::to_string(&message)?;

        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| Error::task_queue_with_source(format!("Redis connect failed: {e}"), e))?;

        let key = self.key();
        let _: i64 = conn
            .lpush(&key, body)
            .await
            .map_err(|e| Error::task_queue_with_source(format!("Redis LPUSH failed: {e}"), e))?;

        debug!(target: LOG_TARGET, queue = self.name.as_str(), job_id = message.id.as_str(), "Job pushed to Redis queue");

        let mut task = EnqueuedTask::new(message.id, TASK_QUEUE_REDIS, self.name.clone());
        task.enqueued_at = message.enqueued_at;
        Ok(task)
    }
}

impl std::fmt::Debug for RedisJobQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisJobQueue")
            .field("name", &self.name)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
