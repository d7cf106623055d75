//! Job Port
//!
//! A job implements the refresh logic for one kind of cached computation.
//! Jobs are built by the factory registered for their class path and then
//! asked to refresh a single value.

use crate::error::Result;
use crate::value_objects::JobArgs;
use async_trait::async_trait;
use serde_json::Value;

/// Refresh logic for one cached computation
#[async_trait]
pub trait Job: Send + Sync {
    /// Recompute and store the value for `call`, returning the fresh value
    async fn refresh(&self, call: &JobArgs) -> Result<Value>;
}
