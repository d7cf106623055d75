//! Redis distributed cache backend
//!
//! Holds one multiplexed connection, opened on first use. The connection is
//! a per-request resource: [`close`](CacheBackend::close) drops it and the
//! next operation reconnects.
//!
//! ```ignore
//! use cacheback_providers::cache::RedisCacheBackend;
//!
//! let cache = RedisCacheBackend::new("redis://localhost:6379")?;
//! ```

use crate::constants::REDIS_DEFAULT_URL;
use async_trait::async_trait;
use cacheback_application::registry::{CACHE_BACKENDS, CacheBackendConfig, CacheBackendEntry};
use cacheback_domain::constants::LOG_TARGET;
use cacheback_domain::error::{Error, Result};
use cacheback_domain::ports::{CacheBackend, CacheEntryConfig, CacheStats};
use redis::{AsyncCommands, Client, aio::MultiplexedConnection};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::Mutex;
use tracing::debug;

/// Redis cache backend
pub struct RedisCacheBackend {
    client: Client,
    namespace: Option<String>,
    connection: Mutex<Option<MultiplexedConnection>>,
    stats: RwLock<CacheStats>,
}

fn redis_error(operation: &str, e: redis::RedisError) -> Error {
    Error::infrastructure_with_source(format!("Redis {operation} failed: {e}"), e)
}

impl RedisCacheBackend {
    /// Create a backend for `connection_string`
    ///
    /// Does not connect; the first operation does.
    pub fn new(connection_string: &str) -> Result<Self> {
        let client = Client::open(connection_string).map_err(|e| {
            Error::infrastructure_with_source(format!("Failed to create Redis client: {e}"), e)
        })?;

        Ok(Self {
            client,
            namespace: None,
            connection: Mutex::new(None),
            stats: RwLock::new(CacheStats::new()),
        })
    }

    /// Prefix every key with `namespace`
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Whether a connection is currently held
    pub async fn is_connected(&self) -> bool {
        self.connection.lock().await.is_some()
    }

    fn key(&self, key: &str) -> String {
        match &self.namespace {
            Some(namespace) => format!("{namespace}:{key}"),
            None => key.to_string(),
        }
    }

    async fn get_connection(&self) -> Result<MultiplexedConnection> {
        let mut slot = self.connection.lock().await;
        if let Some(conn) = slot.as_ref() {
            return Ok(conn.clone());
        }

        let conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| redis_error("connect", e))?;
        *slot = Some(conn.clone());
        Ok(conn)
    }

    fn record(&self, hit: bool) {
        let mut stats = self.stats.write().unwrap_or_else(PoisonError::into_inner);
        if hit {
            stats.hits += 1;
        } else {
            stats.misses += 1;
        }
        stats.hit_rate = stats.calculate_hit_rate();
    }
}

#[async_trait]
impl CacheBackend for RedisCacheBackend {
    async fn get_json(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.get_connection().await?;

        let value: Option<String> = conn
            .get(self.key(key))
            .await
            .map_err(|e| redis_error("GET", e))?;
        self.record(value.is_some());
        Ok(value)
    }

    async fn set_json(&self, key: &str, value: &str, config: CacheEntryConfig) -> Result<()> {
        let mut conn = self.get_connection().await?;

        let ttl_seconds = config.effective_ttl().as_secs();
        let result: redis::RedisResult<()> = if ttl_seconds > 0 {
            conn.set_ex(self.key(key), value, ttl_seconds).await
        } else {
            conn.set(self.key(key), value).await
        };
        result.map_err(|e| redis_error("SET", e))
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;

        let count: i64 = conn
            .del(self.key(key))
            .await
            .map_err(|e| redis_error("DEL", e))?;
        Ok(count > 0)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;

        let count: i64 = conn
            .exists(self.key(key))
            .await
            .map_err(|e| redis_error("EXISTS", e))?;
        Ok(count > 0)
    }

    async fn clear(&self) -> Result<()> {
        let mut conn = self.get_connection().await?;

        redis::cmd("FLUSHDB")
            .query_async(&mut conn)
            .await
            .map_err(|e| redis_error("FLUSHDB", e))
    }

    async fn stats(&self) -> Result<CacheStats> {
        let mut conn = self.get_connection().await?;

        let dbsize: u64 = redis::cmd("DBSIZE")
            .query_async(&mut conn)
            .await
            .unwrap_or(0);

        let mut stats = self
            .stats
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        stats.entries = dbsize;
        Ok(stats)
    }

    async fn size(&self) -> Result<usize> {
        let mut conn = self.get_connection().await?;

        redis::cmd("DBSIZE")
            .query_async(&mut conn)
            .await
            .map_err(|e| redis_error("DBSIZE", e))
    }

    fn backend_name(&self) -> &str {
        "redis"
    }

    fn supports_close(&self) -> bool {
        true
    }

    async fn close(&self) -> Result<()> {
        if self.connection.lock().await.take().is_some() {
            debug!(target: LOG_TARGET, "Released Redis cache connection");
        }
        Ok(())
    }
}

impl std::fmt::Debug for RedisCacheBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCacheBackend")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

fn redis_cache_factory(config: &CacheBackendConfig) -> Result<Arc<dyn CacheBackend>> {
    let uri = config.uri.as_deref().unwrap_or(REDIS_DEFAULT_URL);
    let mut cache = RedisCacheBackend::new(uri)?;
    if let Some(namespace) = &config.namespace {
        cache = cache.with_namespace(namespace.clone());
    }
    Ok(Arc::new(cache))
}

#[linkme::distributed_slice(CACHE_BACKENDS)]
static REDIS_BACKEND: CacheBackendEntry = CacheBackendEntry {
    name: "redis",
    description: "Redis distributed cache",
    factory: redis_cache_factory,
};
