//! Metrics recording for the configuration store.
//!
//! # Metrics
//! - `dynconf_reloads_total` (counter): reloads by outcome (success, noop, failure)
//! - `dynconf_callback_panics_total` (counter): isolated listener failures
//! - `dynconf_snapshot_keys` (gauge): key count of the active snapshot
//!
//! # Design Decisions
//! - Fire-and-forget recording through the `metrics` facade
//! - No exporter wired here; the host process installs its own recorder

use metrics::{counter, gauge};

/// Count one reload by outcome: `"success"`, `"noop"` or `"failure"`.
pub fn record_reload(outcome: &'static str) {
    counter!("dynconf_reloads_total", "outcome" => outcome).increment(1);
}

/// Count one isolated listener failure.
pub fn record_callback_panic() {
    counter!("dynconf_callback_panics_total").increment(1);
}

/// Record the key count of the active snapshot.
pub fn record_snapshot_size(keys: usize) {
    gauge!("dynconf_snapshot_keys").set(keys as f64);
}
