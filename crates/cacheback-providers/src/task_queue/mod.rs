//! Task Queue Integrations
//!
//! | Integration | Style | Port |
//! |-------------|-------|------|
//! | [`RedisQueueFactory`] | named queues | `QueueFactory` / `JobQueue` |
//! | [`NatsTaskSubmitter`] | submission | `TaskSubmitter` |
//!
//! Both serialize the refresh payload as JSON without altering it.

#[cfg(feature = "queue-nats")]
pub mod nats;
#[cfg(feature = "queue-redis")]
pub mod redis;

#[cfg(feature = "queue-nats")]
pub use nats::{NatsTaskSubmitter, TaskEnvelope};
#[cfg(feature = "queue-redis")]
pub use redis::{QueueMessage, RedisJobQueue, RedisQueueFactory};
