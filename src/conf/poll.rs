//! Periodic polling of the backing source.
//!
//! # Responsibilities
//! - Perform the eager startup reload
//! - Re-run the reload on a fixed cadence
//! - Exit cleanly on the shutdown signal

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time;

use crate::conf::service::DynamicConf;

/// Reserved key configuring the polling period in seconds.
///
/// Read once, after the eager startup reload; changing it takes effect
/// on the next process start.
pub const RELOAD_INTERVAL_KEY: &str = "dynamic.conf.reload.interval.seconds";

/// Polling period used when the interval key is absent or invalid.
pub const DEFAULT_RELOAD_INTERVAL_SECS: i64 = 600;

/// Background poller driving periodic reloads.
///
/// Reloads are issued from this single task only, so they are never run
/// concurrently with each other.
pub struct ConfPoller {
    conf: Arc<DynamicConf>,
}

impl ConfPoller {
    /// Create a poller for `conf`.
    pub fn new(conf: Arc<DynamicConf>) -> Self {
        Self { conf }
    }

    /// Run the poll loop until the shutdown signal fires.
    ///
    /// The first reload happens eagerly before the timer starts, so the
    /// interval key is served from the freshly loaded snapshot.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        self.conf.reload();

        let secs = self
            .conf
            .get_i64(RELOAD_INTERVAL_KEY, DEFAULT_RELOAD_INTERVAL_SECS);
        let secs = if secs <= 0 {
            DEFAULT_RELOAD_INTERVAL_SECS
        } else {
            secs
        };

        tracing::info!(interval_secs = secs, "configuration poller starting");

        let mut ticker = time::interval(Duration::from_secs(secs as u64));
        // The first tick completes immediately and the eager reload
        // already covered it.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.conf.reload();
                }
                _ = shutdown.recv() => {
                    tracing::info!("configuration poller received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}
