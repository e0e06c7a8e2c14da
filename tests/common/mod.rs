//! Shared utilities for integration testing.

use std::sync::atomic::{AtomicUsize, Ordering};

use proxy_dynconf::ReloadCallback;

/// Install a compact tracing subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "proxy_dynconf=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

/// Listener that counts how many times it was notified.
#[derive(Default)]
pub struct CountingCallback {
    hits: AtomicUsize,
}

#[allow(dead_code)]
impl CountingCallback {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

impl ReloadCallback for CountingCallback {
    fn on_reload(&self) {
        self.hits.fetch_add(1, Ordering::SeqCst);
    }
}
