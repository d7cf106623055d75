//! # Cacheback - Backend Implementations
//!
//! Cache clients and task queue integrations. Each backend implements a port
//! defined in `cacheback-domain`.
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Cache | `CacheBackend` | Moka, Redis, Null |
//! | Named queue | `QueueFactory` / `JobQueue` | Redis |
//! | Submission | `TaskSubmitter` | NATS |
//!
//! Cache backends register themselves in the cache backend registry at link
//! time. Task queue integrations are constructed by the bootstrap layer.
//!
//! ## Feature Flags
//!
//! ```toml
//! [dependencies]
//! cacheback-providers = { version = "0.1", default-features = false, features = ["cache-moka", "queue-nats"] }
//! ```

pub use cacheback_domain::error::{Error, Result};
pub use cacheback_domain::ports::{CacheBackend, JobQueue, QueueFactory, TaskSubmitter};

/// Backend-specific constants
pub mod constants;

/// Cache backend implementations
pub mod cache;

/// Task queue integrations
pub mod task_queue;
