//! Port traits
//!
//! Contracts implemented in `cacheback-providers` (cache and task queue
//! backends) and by applications (jobs).

pub mod cache;
pub mod job;
pub mod task_queue;

pub use cache::{CacheBackend, CacheEntryConfig, CacheStats};
pub use job::Job;
pub use task_queue::{JobQueue, QueueFactory, TaskSubmitter};
