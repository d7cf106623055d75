//! Application services
//!
//! - [`cache_factory`] - builds cache clients and hooks their cleanup
//! - [`dispatch`] - forwards refresh tasks to the configured task queue
//! - [`refresh`] - worker-side refresh entry point

pub mod cache_factory;
pub mod dispatch;
pub mod refresh;

pub use cache_factory::CacheFactory;
pub use dispatch::{ActiveTaskQueue, TaskDispatcher, TaskQueueIntegrations, TaskQueueKind};
pub use refresh::RefreshWorker;
