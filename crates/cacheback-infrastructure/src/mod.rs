//! # Infrastructure Layer
//!
//! Cross-cutting concerns that wire the application layer into a running
//! process.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML + environment configuration via figment |
//! | [`logging`] | Structured logging with tracing |
//! | [`bootstrap`] | Builds the [`CachebackContext`] from an [`AppConfig`] |
//! | [`error_ext`] | Context helpers for foreign errors |
//! | [`constants`] | Configuration defaults |

// Forces linkme registration of every compiled-in cache backend
extern crate cacheback_providers;

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

pub use bootstrap::{CachebackContext, init_app};
pub use config::{AppConfig, ConfigLoader};
pub use error_ext::ErrorContext;
