//! Per-type derived value caches.
//!
//! # Responsibilities
//! - Read-through caching of parsed lookups, keyed by resolved key
//! - Bulk invalidation after a snapshot swap
//!
//! # Design Decisions
//! - One cache per scalar type, each independently clearable
//! - Misses for absent keys cache the caller's default, so they are not
//!   recomputed on every call
//! - `clear_all` is the only invalidation primitive; entries are never
//!   evicted individually

use dashmap::DashMap;

/// A single typed cache keyed by resolved lookup key.
pub struct Cache<T>(DashMap<String, T>);

impl<T: Clone> Cache<T> {
    fn new() -> Self {
        Self(DashMap::new())
    }

    /// Read-through lookup. `compute` runs on a miss and its result is
    /// stored, defaults included.
    ///
    /// Safe to call concurrently with `clear`; recomputing and
    /// overwriting an entry with an equivalent value is harmless.
    pub fn get_or_compute(&self, key: &str, compute: impl FnOnce() -> T) -> T {
        if let Some(hit) = self.0.get(key) {
            return hit.value().clone();
        }
        self.0
            .entry(key.to_string())
            .or_insert_with(compute)
            .value()
            .clone()
    }

    fn clear(&self) {
        self.0.clear();
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The bank of per-type caches.
pub struct TypedCaches {
    pub int: Cache<i32>,
    pub long: Cache<i64>,
    pub boolean: Cache<bool>,
    pub double: Cache<f64>,
    pub string: Cache<String>,
}

impl TypedCaches {
    /// Create an empty bank.
    pub fn new() -> Self {
        Self {
            int: Cache::new(),
            long: Cache::new(),
            boolean: Cache::new(),
            double: Cache::new(),
            string: Cache::new(),
        }
    }

    /// Empty every typed cache. Runs strictly after a snapshot swap.
    pub fn clear_all(&self) {
        self.int.clear();
        self.long.clear();
        self.boolean.clear();
        self.double.clear();
        self.string.clear();
    }
}

impl Default for TypedCaches {
    fn default() -> Self {
        Self::new()
    }
}
