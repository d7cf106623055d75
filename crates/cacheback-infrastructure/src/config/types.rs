//! Configuration data types

use crate::constants::{
    DEFAULT_CACHE_BACKEND, DEFAULT_CACHE_MAX_SIZE, DEFAULT_LOG_LEVEL, DEFAULT_NATS_URL,
    DEFAULT_QUEUE_TIMEOUT_SECS, DEFAULT_REDIS_QUEUE_URL, LOG_MAX_FILES,
};
use cacheback_application::registry::CacheBackendConfig;
use cacheback_domain::constants::{DEFAULT_CACHE_NAMESPACE, DEFAULT_CACHE_TTL_SECS};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Active task queue backend (`"nats"` or `"redis"`)
    ///
    /// Left unset, the dispatcher applies its default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_queue: Option<String>,
    /// Task queue integration settings
    pub queues: QueueConfig,
    /// Default cache settings
    pub cache: CacheConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

/// Settings of every task queue integration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Named-queue integration
    pub redis: RedisQueueConfig,
    /// Submission integration
    pub nats: NatsQueueConfig,
}

/// Named queues over Redis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisQueueConfig {
    /// Server URL
    pub url: String,
    /// Job timeout when the dispatch options carry none
    pub default_timeout_secs: u64,
}

impl Default for RedisQueueConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REDIS_QUEUE_URL.to_string(),
            default_timeout_secs: DEFAULT_QUEUE_TIMEOUT_SECS,
        }
    }
}

/// Task submission over NATS
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NatsQueueConfig {
    /// Server URL
    pub url: String,
    /// Name this client reports to the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name: Option<String>,
}

impl Default for NatsQueueConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_NATS_URL.to_string(),
            client_name: None,
        }
    }
}

/// Default cache
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Whether caching is enabled; a disabled cache uses the null backend
    pub enabled: bool,
    /// Registered backend name
    pub backend: String,
    /// Connection URI for distributed backends
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// Maximum number of entries
    pub max_size: usize,
    /// Default TTL in seconds
    pub default_ttl_secs: u64,
    /// Key namespace
    pub namespace: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            backend: DEFAULT_CACHE_BACKEND.to_string(),
            uri: None,
            max_size: DEFAULT_CACHE_MAX_SIZE,
            default_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            namespace: DEFAULT_CACHE_NAMESPACE.to_string(),
        }
    }
}

impl CacheConfig {
    /// Registry options for this cache
    pub fn to_backend_config(&self) -> CacheBackendConfig {
        if !self.enabled {
            return CacheBackendConfig::new("null");
        }

        let mut config = CacheBackendConfig::new(&self.backend)
            .with_max_size(self.max_size)
            .with_ttl_secs(self.default_ttl_secs)
            .with_namespace(&self.namespace);
        if let Some(uri) = &self.uri {
            config = config.with_uri(uri);
        }
        config
    }
}

/// Logging
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Emit JSON instead of text
    pub json_format: bool,
    /// Also log to this file, rotated daily
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_output: Option<PathBuf>,
    /// Rotated files to keep
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            json_format: false,
            file_output: None,
            max_files: LOG_MAX_FILES,
        }
    }
}
