//! Cache Backend Registry
//!
//! Backends register themselves via `linkme::distributed_slice` and are
//! resolved by name from a [`CacheBackendConfig`].

use cacheback_domain::error::{Error, Result};
use cacheback_domain::ports::CacheBackend;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Construction options for a cache backend
///
/// Contains all options a backend might need. Backends use what they need
/// and ignore the rest.
#[derive(Debug, Clone, Default)]
pub struct CacheBackendConfig {
    /// Backend identifier (e.g., "moka", "redis", "null")
    pub backend: String,
    /// Connection URI (for distributed caches)
    pub uri: Option<String>,
    /// Maximum cache size (entries or bytes depending on backend)
    pub max_size: Option<usize>,
    /// Default TTL in seconds
    pub ttl_secs: Option<u64>,
    /// Namespace prefix for keys
    pub namespace: Option<String>,
    /// Additional backend-specific options
    pub extra: HashMap<String, String>,
}

impl CacheBackendConfig {
    /// Create a new config for the given backend identifier
    pub fn new(backend: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            ..Default::default()
        }
    }

    /// Set the URI
    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Set the max size
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = Some(max_size);
        self
    }

    /// Set the TTL in seconds
    pub fn with_ttl_secs(mut self, ttl_secs: u64) -> Self {
        self.ttl_secs = Some(ttl_secs);
        self
    }

    /// Set the namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Add an extra option
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// Factory signature shared by every registered backend
pub type CacheBackendFactory = fn(&CacheBackendConfig) -> Result<Arc<dyn CacheBackend>>;

/// Registry entry for cache backends
pub struct CacheBackendEntry {
    /// Unique backend identifier (e.g., "moka", "redis", "null")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory function to create backend instances
    pub factory: CacheBackendFactory,
}

#[linkme::distributed_slice]
pub static CACHE_BACKENDS: [CacheBackendEntry] = [..];

/// Resolve a cache backend by identifier and construct it
///
/// Factory errors propagate unchanged.
pub fn resolve_cache_backend(config: &CacheBackendConfig) -> Result<Arc<dyn CacheBackend>> {
    if let Some(entry) = CACHE_BACKENDS
        .iter()
        .find(|entry| entry.name == config.backend)
    {
        debug!(backend = entry.name, "Creating cache backend");
        return (entry.factory)(config);
    }

    let available: Vec<&str> = CACHE_BACKENDS.iter().map(|e| e.name).collect();
    Err(Error::not_found(format!(
        "cache backend '{}'. Available backends: {:?}",
        config.backend, available
    )))
}

/// List all registered cache backends as `(name, description)` pairs
pub fn list_cache_backends() -> Vec<(&'static str, &'static str)> {
    CACHE_BACKENDS
        .iter()
        .map(|e| (e.name, e.description))
        .collect()
}
