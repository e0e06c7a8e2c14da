//! The dynamic configuration service.
//!
//! # Responsibilities
//! - Own the snapshot store, the typed caches and the listener registry
//! - Drive source-driven and direct-injection reloads
//! - Serve the typed accessor surface

use std::collections::HashMap;
use std::sync::Arc;

use crate::conf::cache::TypedCaches;
use crate::conf::callback::{CallbackRegistry, ReloadCallback};
use crate::conf::loader;
use crate::conf::resolver;
use crate::conf::source::KeyValueSource;
use crate::conf::store::{ConfStore, Snapshot};
use crate::observability::metrics;

/// Logical name of the primary configuration resource.
pub const DEFAULT_RESOURCE: &str = "proxy-dynconf.properties";

/// Process-wide dynamic configuration store.
///
/// Constructed once at startup and shared by `Arc`. Every accessor is
/// safe to call concurrently with reloads and never blocks on them;
/// reloads themselves are issued serially by the poller.
pub struct DynamicConf {
    source: Arc<dyn KeyValueSource>,
    resource: String,
    store: ConfStore,
    caches: TypedCaches,
    callbacks: CallbackRegistry,
}

impl DynamicConf {
    /// Create a store reading the default primary resource.
    pub fn new(source: Arc<dyn KeyValueSource>) -> Self {
        Self::with_resource(source, DEFAULT_RESOURCE)
    }

    /// Create a store reading a custom primary resource name.
    pub fn with_resource(source: Arc<dyn KeyValueSource>, resource: impl Into<String>) -> Self {
        Self {
            source,
            resource: resource.into(),
            store: ConfStore::new(),
            caches: TypedCaches::new(),
            callbacks: CallbackRegistry::new(),
        }
    }

    /// Check the backing source for changes and, if any, swap in the new
    /// snapshot, clear the typed caches and notify listeners, in that
    /// order.
    ///
    /// Never fails visibly: a load error leaves the previous snapshot in
    /// force and is only logged.
    pub fn reload(&self) {
        match loader::load_merged(self.source.as_ref(), &self.resource) {
            Ok(conf) => self.apply(conf, Some(&self.resource)),
            Err(e) => {
                tracing::error!(
                    resource = %self.resource,
                    error = %e,
                    "reload failed, keeping previous configuration"
                );
                metrics::record_reload("failure");
            }
        }
    }

    /// Install an explicit mapping, bypassing the source entirely.
    ///
    /// Follows the same compare → swap → clear → notify sequence as a
    /// source-driven reload.
    pub fn reload_with(&self, conf: HashMap<String, String>) {
        self.apply(conf, None);
    }

    /// Register a reload listener. Registering the same handle twice has
    /// no additional effect.
    pub fn register(&self, callback: Arc<dyn ReloadCallback>) {
        self.callbacks.register(callback);
    }

    fn apply(&self, conf: Snapshot, resource: Option<&str>) {
        let keys = conf.len();
        if self.store.replace(conf) {
            // Clear strictly after the swap so a concurrent miss
            // repopulates from the new snapshot; listeners fire after the
            // clear so they never observe stale cached values.
            self.caches.clear_all();
            self.callbacks.notify_all();
            match resource {
                Some(resource) => {
                    tracing::info!(resource = %resource, keys = keys, "configuration reloaded");
                }
                None => {
                    tracing::info!(keys = keys, "configuration reloaded from explicit mapping");
                }
            }
            metrics::record_reload("success");
            metrics::record_snapshot_size(keys);
        } else {
            tracing::debug!("configuration unchanged");
            metrics::record_reload("noop");
        }
    }

    // --- Direct accessors: uncached, live-snapshot reads ---

    /// Read `key` as i32; `default` if absent or unparsable.
    pub fn get_i32(&self, key: &str, default: i32) -> i32 {
        resolver::get(&self.store.current(), key).unwrap_or(default)
    }

    /// Read `key` as i64; `default` if absent or unparsable.
    pub fn get_i64(&self, key: &str, default: i64) -> i64 {
        resolver::get(&self.store.current(), key).unwrap_or(default)
    }

    /// Read `key` as bool; `default` if absent or unparsable.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        resolver::get(&self.store.current(), key).unwrap_or(default)
    }

    /// Read `key` as f64; `default` if absent or unparsable.
    pub fn get_f64(&self, key: &str, default: f64) -> f64 {
        resolver::get(&self.store.current(), key).unwrap_or(default)
    }

    /// Read `key` as a string; `default` if absent.
    pub fn get_string(&self, key: &str, default: &str) -> String {
        resolver::get(&self.store.current(), key).unwrap_or_else(|| default.to_string())
    }

    // --- Tenant-scoped accessors: cached, request-path hot ---

    /// Tenant-scoped, cached read of `key` as i32.
    ///
    /// Resolution falls back from the tenant-qualified key to the bare
    /// key to `default`, and never fails visibly to the caller. An empty
    /// snapshot means nothing was ever loaded; the getter short-circuits
    /// to `default` without touching the cache.
    pub fn get_i32_for(
        &self,
        key: &str,
        bid: Option<i64>,
        bgroup: Option<&str>,
        default: i32,
    ) -> i32 {
        let snapshot = self.store.current();
        if snapshot.is_empty() {
            return default;
        }
        let resolved = resolver::conf_key(key, bid, bgroup);
        self.caches.int.get_or_compute(&resolved, || {
            resolver::resolve(&snapshot, &resolved, key).unwrap_or(default)
        })
    }

    /// Tenant-scoped, cached read of `key` as i64.
    pub fn get_i64_for(
        &self,
        key: &str,
        bid: Option<i64>,
        bgroup: Option<&str>,
        default: i64,
    ) -> i64 {
        let snapshot = self.store.current();
        if snapshot.is_empty() {
            return default;
        }
        let resolved = resolver::conf_key(key, bid, bgroup);
        self.caches.long.get_or_compute(&resolved, || {
            resolver::resolve(&snapshot, &resolved, key).unwrap_or(default)
        })
    }

    /// Tenant-scoped, cached read of `key` as bool.
    pub fn get_bool_for(
        &self,
        key: &str,
        bid: Option<i64>,
        bgroup: Option<&str>,
        default: bool,
    ) -> bool {
        let snapshot = self.store.current();
        if snapshot.is_empty() {
            return default;
        }
        let resolved = resolver::conf_key(key, bid, bgroup);
        self.caches.boolean.get_or_compute(&resolved, || {
            resolver::resolve(&snapshot, &resolved, key).unwrap_or(default)
        })
    }

    /// Tenant-scoped, cached read of `key` as f64.
    pub fn get_f64_for(
        &self,
        key: &str,
        bid: Option<i64>,
        bgroup: Option<&str>,
        default: f64,
    ) -> f64 {
        let snapshot = self.store.current();
        if snapshot.is_empty() {
            return default;
        }
        let resolved = resolver::conf_key(key, bid, bgroup);
        self.caches.double.get_or_compute(&resolved, || {
            resolver::resolve(&snapshot, &resolved, key).unwrap_or(default)
        })
    }

    /// Tenant-scoped, cached read of `key` as a string.
    pub fn get_string_for(
        &self,
        key: &str,
        bid: Option<i64>,
        bgroup: Option<&str>,
        default: &str,
    ) -> String {
        let snapshot = self.store.current();
        if snapshot.is_empty() {
            return default.to_string();
        }
        let resolved = resolver::conf_key(key, bid, bgroup);
        self.caches.string.get_or_compute(&resolved, || {
            resolver::resolve(&snapshot, &resolved, key).unwrap_or_else(|| default.to_string())
        })
    }
}
