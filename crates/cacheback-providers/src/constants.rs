//! Backend Constants

// ============================================================================
// CACHE BACKEND CONSTANTS
// ============================================================================

/// Default number of entries held by the in-memory cache
pub const CACHE_DEFAULT_SIZE_LIMIT: usize = 10_000;

/// Redis URL used when a cache or queue config has none
pub const REDIS_DEFAULT_URL: &str = "redis://localhost:6379";

// ============================================================================
// TASK QUEUE CONSTANTS
// ============================================================================

/// Option naming the Redis queue
pub const QUEUE_OPTION_NAME: &str = "name";

/// Option overriding the job timeout of a Redis queue
pub const QUEUE_OPTION_DEFAULT_TIMEOUT: &str = "default_timeout";

/// Key prefix of Redis queue lists
pub const REDIS_QUEUE_KEY_PREFIX: &str = "cacheback:queue:";

/// Job timeout in seconds when none is configured
pub const REDIS_QUEUE_DEFAULT_TIMEOUT_SECS: u64 = 180;

/// Subject tasks are published to when the options name none
pub const NATS_DEFAULT_SUBJECT: &str = "cacheback.tasks";

/// Options that select the NATS subject, in priority order
pub const NATS_SUBJECT_OPTIONS: [&str; 2] = ["queue", "routing_key"];
