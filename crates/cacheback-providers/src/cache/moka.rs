//! Moka in-memory cache backend
//!
//! Process-local cache with bounded capacity and an optional cache-wide TTL.
//!
//! ```ignore
//! use cacheback_providers::cache::MokaCacheBackend;
//! use std::time::Duration;
//!
//! let cache = MokaCacheBackend::with_config(1000, Duration::from_secs(300));
//! ```

use crate::constants::CACHE_DEFAULT_SIZE_LIMIT;
use async_trait::async_trait;
use cacheback_application::registry::{CACHE_BACKENDS, CacheBackendConfig, CacheBackendEntry};
use cacheback_domain::error::Result;
use cacheback_domain::ports::{CacheBackend, CacheEntryConfig, CacheStats};
use moka::future::Cache;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Moka-based in-memory cache backend
#[derive(Clone)]
pub struct MokaCacheBackend {
    cache: Cache<String, String>,
    max_size: usize,
    namespace: Option<String>,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl Default for MokaCacheBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MokaCacheBackend {
    /// Create a cache with the default capacity
    pub fn new() -> Self {
        Self::with_capacity(CACHE_DEFAULT_SIZE_LIMIT)
    }

    /// Create a cache holding at most `max_size` entries
    pub fn with_capacity(max_size: usize) -> Self {
        Self::from_builder(Cache::builder().max_capacity(max_size as u64), max_size)
    }

    /// Create a cache with a capacity and a TTL applied to every entry
    pub fn with_config(max_size: usize, time_to_live: Duration) -> Self {
        Self::from_builder(
            Cache::builder()
                .max_capacity(max_size as u64)
                .time_to_live(time_to_live),
            max_size,
        )
    }

    fn from_builder(
        builder: moka::future::CacheBuilder<String, String, Cache<String, String>>,
        max_size: usize,
    ) -> Self {
        Self {
            cache: builder.build(),
            max_size,
            namespace: None,
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Prefix every key with `namespace`
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Maximum number of entries
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    fn key(&self, key: &str) -> String {
        match &self.namespace {
            Some(namespace) => format!("{namespace}:{key}"),
            None => key.to_string(),
        }
    }
}

#[async_trait]
impl CacheBackend for MokaCacheBackend {
    async fn get_json(&self, key: &str) -> Result<Option<String>> {
        let value = self.cache.get(&self.key(key)).await;
        let counter = if value.is_some() {
            &self.hits
        } else {
            &self.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        Ok(value)
    }

    async fn set_json(&self, key: &str, value: &str, _config: CacheEntryConfig) -> Result<()> {
        self.cache.insert(self.key(key), value.to_string()).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.cache.remove(&self.key(key)).await.is_some())
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.cache.contains_key(&self.key(key)))
    }

    async fn clear(&self) -> Result<()> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        Ok(())
    }

    async fn stats(&self) -> Result<CacheStats> {
        self.cache.run_pending_tasks().await;
        let mut stats = CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.cache.entry_count(),
            hit_rate: 0.0,
        };
        stats.hit_rate = stats.calculate_hit_rate();
        Ok(stats)
    }

    #[allow(clippy::cast_possible_truncation)]
    async fn size(&self) -> Result<usize> {
        self.cache.run_pending_tasks().await;
        Ok(self.cache.entry_count() as usize)
    }

    fn backend_name(&self) -> &str {
        "moka"
    }
}

impl std::fmt::Debug for MokaCacheBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCacheBackend")
            .field("max_size", &self.max_size)
            .field("namespace", &self.namespace)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

// ============================================================================
// Auto-registration via linkme
// ============================================================================

fn moka_cache_factory(config: &CacheBackendConfig) -> Result<Arc<dyn CacheBackend>> {
    let max_size = config.max_size.unwrap_or(CACHE_DEFAULT_SIZE_LIMIT);
    let mut cache = match config.ttl_secs {
        Some(ttl) if ttl > 0 => MokaCacheBackend::with_config(max_size, Duration::from_secs(ttl)),
        _ => MokaCacheBackend::with_capacity(max_size),
    };
    if let Some(namespace) = &config.namespace {
        cache = cache.with_namespace(namespace.clone());
    }
    Ok(Arc::new(cache))
}

#[linkme::distributed_slice(CACHE_BACKENDS)]
static MOKA_BACKEND: CacheBackendEntry = CacheBackendEntry {
    name: "moka",
    description: "Moka in-memory cache",
    factory: moka_cache_factory,
};
