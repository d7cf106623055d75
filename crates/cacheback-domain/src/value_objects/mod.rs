//! Value objects
//!
//! Ephemeral values passed through a single factory, resolver or dispatch
//! call. None of them is persisted.

pub mod class_path;
pub mod refresh;
pub mod task;

pub use class_path::ClassPath;
pub use refresh::{JobArgs, RefreshRequest};
pub use task::{EnqueuedTask, TaskOptions, TaskPayload};
