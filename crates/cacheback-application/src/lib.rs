//! # Cacheback Application Layer
//!
//! Glue between the host cache registry, the job class registry and the
//! configured task queue.
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`registry`] | linkme registries for cache backends and job classes |
//! | [`lifecycle`] | Request-completion hooks that close cache clients |
//! | [`services`] | Cache factory, task dispatcher and refresh worker |
//!
//! ## Usage
//!
//! ```ignore
//! use cacheback_application::lifecycle::RequestLifecycle;
//! use cacheback_application::registry::CacheBackendConfig;
//! use cacheback_application::services::CacheFactory;
//! use std::sync::Arc;
//!
//! let lifecycle = Arc::new(RequestLifecycle::new());
//! let factory = CacheFactory::new(Arc::clone(&lifecycle));
//! let cache = factory.get_cache(&CacheBackendConfig::new("redis").with_uri("redis://localhost"))?;
//!
//! // ... serve the request ...
//! lifecycle.request_finished().await;
//! ```

pub mod lifecycle;
pub mod registry;
pub mod services;

pub use lifecycle::RequestLifecycle;
pub use services::{CacheFactory, RefreshWorker, TaskDispatcher};
