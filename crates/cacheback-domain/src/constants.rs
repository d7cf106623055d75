//! Domain layer constants
//!
//! Names shared between the dispatching side and the worker side of a
//! refresh. Infrastructure-specific constants remain in
//! `cacheback_infrastructure::constants`.

// ============================================================================
// LOGGING
// ============================================================================

/// Tracing target used for resolution and dispatch diagnostics
pub const LOG_TARGET: &str = "cacheback";

// ============================================================================
// TASK QUEUE
// ============================================================================

/// Name of the callable workers execute to recompute a cached value
pub const REFRESH_ENTRY_POINT: &str = "cacheback.refresh_cache";

/// Identifier of the submission-style backend (NATS)
pub const TASK_QUEUE_NATS: &str = "nats";

/// Identifier of the named-queue backend (Redis)
pub const TASK_QUEUE_REDIS: &str = "redis";

/// Backend used when no task queue is configured
pub const DEFAULT_TASK_QUEUE: &str = TASK_QUEUE_NATS;

/// Queue name used when the caller supplies none
pub const DEFAULT_QUEUE_NAME: &str = "default";

// ============================================================================
// CACHE
// ============================================================================

/// Default TTL for cache entries (5 minutes)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Default namespace applied to cache entries
pub const DEFAULT_CACHE_NAMESPACE: &str = "default";
