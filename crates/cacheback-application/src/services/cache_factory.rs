//! Cache client factory
//!
//! Wraps the backend registry: every client it hands out that needs closing
//! is connected to the request lifecycle.

use crate::lifecycle::RequestLifecycle;
use crate::registry::{CacheBackendConfig, resolve_cache_backend};
use cacheback_domain::error::Result;
use cacheback_domain::ports::CacheBackend;
use std::sync::Arc;

/// Builds cache clients from the backend registry
#[derive(Debug, Clone)]
pub struct CacheFactory {
    lifecycle: Arc<RequestLifecycle>,
}

impl CacheFactory {
    /// Create a factory that connects close hooks to `lifecycle`
    pub fn new(lifecycle: Arc<RequestLifecycle>) -> Self {
        Self { lifecycle }
    }

    /// Build a cache client for `config.backend`
    ///
    /// Registry and backend errors propagate unchanged.
    pub fn get_cache(&self, config: &CacheBackendConfig) -> Result<Arc<dyn CacheBackend>> {
        let cache = resolve_cache_backend(config)?;
        if cache.supports_close() {
            self.lifecycle.connect_close(Arc::clone(&cache));
        }
        Ok(cache)
    }

    /// The lifecycle close hooks are connected to
    pub fn lifecycle(&self) -> &Arc<RequestLifecycle> {
        &self.lifecycle
    }
}
