//! Reload observer registry.
//!
//! # Responsibilities
//! - Hold the set of registered reload listeners
//! - Notify every listener once per effective reload
//!
//! # Design Decisions
//! - Set semantics under `Arc` pointer identity; duplicates are ignored
//! - Invocation order is unspecified; failures are isolated per listener
//! - Listeners run synchronously on the reloading task

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

use crate::observability::metrics;

/// A listener notified after every effective reload.
pub trait ReloadCallback: Send + Sync {
    fn on_reload(&self);
}

/// Set of registered reload listeners.
pub struct CallbackRegistry {
    listeners: Mutex<Vec<Arc<dyn ReloadCallback>>>,
}

impl CallbackRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Add a listener. Registering the same handle twice has no
    /// additional effect.
    pub fn register(&self, callback: Arc<dyn ReloadCallback>) {
        let mut listeners = self
            .listeners
            .lock()
            .expect("callback registry mutex poisoned");
        if listeners.iter().any(|l| Arc::ptr_eq(l, &callback)) {
            return;
        }
        listeners.push(callback);
    }

    /// Invoke every registered listener once.
    ///
    /// The listener list is copied up front so registration during a
    /// pass cannot block it; whether a newly registered listener sees
    /// this particular pass is unspecified. A panicking listener is
    /// logged and does not stop the rest.
    pub fn notify_all(&self) {
        let listeners = self
            .listeners
            .lock()
            .expect("callback registry mutex poisoned")
            .clone();
        for listener in listeners {
            if catch_unwind(AssertUnwindSafe(|| listener.on_reload())).is_err() {
                tracing::error!("reload callback panicked, continuing with remaining listeners");
                metrics::record_callback_panic();
            }
        }
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners
            .lock()
            .expect("callback registry mutex poisoned")
            .len()
    }

    /// Whether no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CallbackRegistry {
    fn default() -> Self {
        Self::new()
    }
}
