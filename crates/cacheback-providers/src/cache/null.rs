//! Null cache backend
//!
//! Stores nothing. Useful for tests and for disabling caching.

use async_trait::async_trait;
use cacheback_application::registry::{CACHE_BACKENDS, CacheBackendConfig, CacheBackendEntry};
use cacheback_domain::error::Result;
use cacheback_domain::ports::{CacheBackend, CacheEntryConfig, CacheStats};
use std::sync::Arc;

/// Cache backend that never stores anything
#[derive(Debug, Clone, Default)]
pub struct NullCacheBackend;

impl NullCacheBackend {
    /// Create a null cache backend
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CacheBackend for NullCacheBackend {
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
        "null"
    }
}

fn null_cache_factory(_config: &CacheBackendConfig) -> Result<Arc<dyn CacheBackend>> {
    Ok(Arc::new(NullCacheBackend::new()))
}

#[linkme::distributed_slice(CACHE_BACKENDS)]
static NULL_BACKEND: CacheBackendEntry = CacheBackendEntry {
    name: "null",
    description: "No-op cache (stores nothing)",
    factory: null_cache_factory,
};
