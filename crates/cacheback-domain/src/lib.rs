//! # Cacheback Domain
//!
//! Core types shared by every Cacheback layer.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Domain error type and `Result` alias |
//! | [`constants`] | Entry point names, log target, defaults |
//! | [`value_objects`] | Payloads, options, class paths, refresh requests |
//! | [`ports`] | Traits implemented by cache and task-queue backends |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
