//! Registry System
//!
//! Compile-time registration of cache backends and job classes using the
//! `linkme` crate. Entries are discovered at runtime by name.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Registration Flow                           │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  1. Provider defines:  #[linkme::distributed_slice(SLICE)]      │
//! │                        static ENTRY: Entry = ...                │
//! │                              ↓                                  │
//! │  2. Registry declares: #[linkme::distributed_slice]             │
//! │                        pub static SLICE: [Entry] = [..]         │
//! │                              ↓                                  │
//! │  3. Resolver queries:  SLICE.iter()                             │
//! │                              ↓                                  │
//! │  4. Config selects:    "backend = redis" → RedisCacheBackend    │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Registering a Job Class
//!
//! ```ignore
//! use cacheback_application::registry::{JobClassEntry, JOB_CLASSES};
//!
//! #[linkme::distributed_slice(JOB_CLASSES)]
//! static USER_COUNT_JOB: JobClassEntry = JobClassEntry {
//!     module: "app.jobs",
//!     name: "UserCountJob",
//!     description: "Counts active users per region",
//!     factory: |args| Ok(Arc::new(UserCountJob::from_args(args)?)),
//! };
//! ```

pub mod cache;
pub mod jobs;

pub use cache::{
    CACHE_BACKENDS, CacheBackendConfig, CacheBackendEntry, CacheBackendFactory,
    list_cache_backends, resolve_cache_backend,
};
pub use jobs::{JOB_CLASSES, JobClass, JobClassEntry, JobFactory, JobRegistry, get_job_class};
