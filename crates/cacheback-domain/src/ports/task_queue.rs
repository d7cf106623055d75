//! Task Queue Ports
//!
//! Two interchangeable task queue styles are supported:
//!
//! | Style | Traits | Call shape |
//! |-------|--------|------------|
//! | Named queue | [`QueueFactory`] + [`JobQueue`] | `factory.get_queue(options)?.enqueue(entry, payload)` |
//! | Submission | [`TaskSubmitter`] | `submitter.apply_async(entry, kwargs, options)` |
//!
//! Implementations live in `cacheback-providers`; the dispatcher in
//! `cacheback-application` selects one of them at startup.

use crate::error::Result;
use crate::value_objects::{EnqueuedTask, TaskOptions, TaskPayload};
use async_trait::async_trait;
use std::sync::Arc;

/// Builds queue handles from caller-supplied options
pub trait QueueFactory: Send + Sync {
    /// Obtain a queue handle configured by `options`
    fn get_queue(&self, options: &TaskOptions) -> Result<Arc<dyn JobQueue>>;

    /// Backend identifier (e.g., "redis")
    fn backend_name(&self) -> &str;
}

/// A named queue accepting entry point invocations
#[async_trait]
pub trait JobQueue: Send + Sync {
    /// Queue name
    fn name(&self) -> &str;

    /// Enqueue `entry_point` with `payload` as its keyword arguments
    async fn enqueue(&self, entry_point: &str, payload: TaskPayload) -> Result<EnqueuedTask>;
}

/// Submits entry point invocations asynchronously
#[async_trait]
pub trait TaskSubmitter: Send + Sync {
    /// Submit `entry_point` with `kwargs`, using `options` as submission parameters
    async fn apply_async(
        &self,
        entry_point: &str,
        kwargs: TaskPayload,
        options: TaskOptions,
    ) -> Result<EnqueuedTask>;

    /// Backend identifier (e.g., "nats")
    fn backend_name(&self) -> &str;
}
