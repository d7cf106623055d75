//! Request lifecycle hooks
//!
//! Some cache clients keep per-request resources that must be released once
//! the request that used them completes. The host calls
//! [`RequestLifecycle::request_finished`] at the end of every request and each
//! connected cache backend is closed.
//!
//! Hooks are keyed by backend instance: connecting the same instance twice
//! keeps a single hook. A hook holds its backend weakly, so once the last
//! client handle is dropped the hook goes away with it.

use cacheback_domain::constants::LOG_TARGET;
use cacheback_domain::ports::CacheBackend;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, Weak};
use tracing::{debug, warn};

struct CloseHook {
    instance: usize,
    backend: Weak<dyn CacheBackend>,
}

impl CloseHook {
    fn is_live(&self) -> bool {
        self.backend.strong_count() > 0
    }
}

/// Close hooks run at the end of each request
#[derive(Default)]
pub struct RequestLifecycle {
    hooks: RwLock<Vec<CloseHook>>,
}

/// Identity of a backend allocation
fn instance_id(backend: &Arc<dyn CacheBackend>) -> usize {
    Arc::as_ptr(backend).cast::<()>() as usize
}

impl RequestLifecycle {
    /// Create a lifecycle with no hooks
    pub fn new() -> Self {
        Self::default()
    }

    /// Hook `backend.close()` to request completion
    ///
    /// Only a weak reference is kept. Returns `false` when this instance is
    /// already connected.
    pub fn connect_close(&self, backend: Arc<dyn CacheBackend>) -> bool {
        let instance = instance_id(&backend);
        let mut hooks = self.hooks.write().unwrap_or_else(PoisonError::into_inner);
        hooks.retain(CloseHook::is_live);

        if hooks.iter().any(|hook| hook.instance == instance) {
            debug!(
                target: LOG_TARGET,
                backend = backend.backend_name(),
                "Close hook already connected for this cache instance"
            );
            return false;
        }

        debug!(
            target: LOG_TARGET,
            backend = backend.backend_name(),
            "Connected cache close hook to request completion"
        );
        hooks.push(CloseHook {
            instance,
            backend: Arc::downgrade(&backend),
        });
        true
    }

    /// Remove the close hook of `backend`
    ///
    /// Returns `false` when the instance was not connected.
    pub fn disconnect(&self, backend: &Arc<dyn CacheBackend>) -> bool {
        let instance = instance_id(backend);
        let mut hooks = self.hooks.write().unwrap_or_else(PoisonError::into_inner);
        let before = hooks.len();
        hooks.retain(|hook| hook.instance != instance);
        hooks.len() != before
    }

    /// Number of hooks whose backend is still alive
    pub fn connected(&self) -> usize {
        self.hooks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|hook| hook.is_live())
            .count()
    }

    /// Run every close hook in connection order
    ///
    /// Hooks of dropped backends are removed first. A failing close is logged
    /// and does not prevent the remaining hooks from running. Returns the
    /// number of backends closed cleanly.
    pub async fn request_finished(&self) -> usize {
        let backends: Vec<Arc<dyn CacheBackend>> = {
            let mut hooks = self.hooks.write().unwrap_or_else(PoisonError::into_inner);
            hooks.retain(CloseHook::is_live);
            hooks.iter().filter_map(|hook| hook.backend.upgrade()).collect()
        };

        let mut closed = 0;
        for backend in backends {
            match backend.close().await {
                Ok(()) => closed += 1,
                Err(e) => warn!(
                    target: LOG_TARGET,
                    backend = backend.backend_name(),
                    error = %e,
                    "Failed to close cache backend at end of request"
                ),
            }
        }
        closed
    }
}

impl fmt::Debug for RequestLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestLifecycle")
            .field("connected", &self.connected())
            .finish()
    }
}
