//! Refresh entry point
//!
//! Runs inside a task queue worker: rebuilds the job named by the payload and
//! asks it to refresh one value.

use crate::registry::JobRegistry;
use cacheback_domain::constants::{LOG_TARGET, REFRESH_ENTRY_POINT};
use cacheback_domain::error::{Error, Result};
use cacheback_domain::value_objects::{RefreshRequest, TaskPayload};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error};

/// Executes refresh tasks popped from a task queue
#[derive(Debug, Clone)]
pub struct RefreshWorker {
    registry: Arc<JobRegistry>,
}

impl RefreshWorker {
    /// Create a worker resolving job classes through `registry`
    pub fn new(registry: Arc<JobRegistry>) -> Self {
        Self { registry }
    }

    /// Run a task by entry point name
    pub async fn handle(&self, entry_point: &str, payload: &TaskPayload) -> Result<Option<Value>> {
        if entry_point != REFRESH_ENTRY_POINT {
            return Err(Error::not_found(format!("task entry point '{entry_point}'")));
        }
        self.refresh_cache(payload).await
    }

    /// Rebuild the job and refresh one value
    ///
    /// Returns `Ok(None)` when the job class cannot be resolved; the failure is
    /// logged rather than raised so the worker can move on.
    pub async fn refresh_cache(&self, payload: &TaskPayload) -> Result<Option<Value>> {
        let request = RefreshRequest::from_payload(payload)?;

        let Some(class) = self.registry.resolve(&request.klass_str) else {
            error!(
                target: LOG_TARGET,
                klass_str = request.klass_str.as_str(),
                "Unable to construct {} with args {:?} and kwargs {:?}",
                request.klass_str,
                request.obj_args,
                request.obj_kwargs
            );
            return Ok(None);
        };

        let job = class.instantiate(&request.instance_args())?;
        let value = job.refresh(&request.call_args()).await?;

        debug!(
            target: LOG_TARGET,
            klass_str = request.klass_str.as_str(),
            "Refreshed cached value"
        );
        Ok(Some(value))
    }
}
