//! Infrastructure Constants

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "cacheback.toml";

/// Configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "cacheback";

/// Environment variable prefix (`CACHEBACK_TASK_QUEUE`, ...)
pub const CONFIG_ENV_PREFIX: &str = "CACHEBACK";

/// Separator between nested keys in environment variable names
pub const CONFIG_ENV_NESTING: &str = "__";

// ============================================================================
// LOGGING
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "CACHEBACK_LOG";

/// Rotated log files kept on disk
pub const LOG_MAX_FILES: usize = 5;

// ============================================================================
// BACKENDS
// ============================================================================

/// Redis URL of the named-queue integration
pub const DEFAULT_REDIS_QUEUE_URL: &str = "redis://localhost:6379";

/// NATS URL of the submission integration
pub const DEFAULT_NATS_URL: &str = "nats://localhost:4222";

/// Job timeout of the named-queue integration
pub const DEFAULT_QUEUE_TIMEOUT_SECS: u64 = 180;

/// Backend of the default cache
pub const DEFAULT_CACHE_BACKEND: &str = "moka";

/// Entries held by the default cache
pub const DEFAULT_CACHE_MAX_SIZE: usize = 10_000;
