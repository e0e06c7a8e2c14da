//! Snapshot storage with atomic replace.

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;

/// One immutable, fully-loaded configuration generation.
pub type Snapshot = HashMap<String, String>;

/// Holds the current configuration snapshot.
///
/// Readers get the latest fully-formed snapshot with a lock-free load; a
/// reload publishes a replacement wholesale, never edits one in place.
pub struct ConfStore {
    snapshot: ArcSwap<Snapshot>,
}

impl ConfStore {
    /// Create a store holding an empty snapshot.
    pub fn new() -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(Snapshot::new()),
        }
    }

    /// The current snapshot. Never blocks.
    pub fn current(&self) -> Arc<Snapshot> {
        self.snapshot.load_full()
    }

    /// Install `next` unless it is structurally equal to the current
    /// snapshot. Returns whether a replacement occurred.
    ///
    /// Reloads are serialized by the caller, so compare-then-store is
    /// sufficient here.
    pub fn replace(&self, next: Snapshot) -> bool {
        if **self.snapshot.load() == next {
            return false;
        }
        self.snapshot.store(Arc::new(next));
        true
    }
}

impl Default for ConfStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(entries: &[(&str, &str)]) -> Snapshot {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_replace_installs_new_snapshot() {
        let store = ConfStore::new();
        assert!(store.replace(snapshot(&[("a", "1")])));
        assert_eq!(store.current().get("a").unwrap(), "1");
    }

    #[test]
    fn test_replace_equal_snapshot_is_noop() {
        let store = ConfStore::new();
        assert!(store.replace(snapshot(&[("a", "1"), ("b", "2")])));
        assert!(!store.replace(snapshot(&[("b", "2"), ("a", "1")])));
    }

    #[test]
    fn test_replace_detects_value_change() {
        let store = ConfStore::new();
        assert!(store.replace(snapshot(&[("a", "1")])));
        assert!(store.replace(snapshot(&[("a", "2")])));
        assert_eq!(store.current().get("a").unwrap(), "2");
    }

    #[test]
    fn test_readers_keep_their_generation() {
        let store = ConfStore::new();
        store.replace(snapshot(&[("a", "1")]));
        let before = store.current();
        store.replace(snapshot(&[("a", "2")]));
        assert_eq!(before.get("a").unwrap(), "1");
        assert_eq!(store.current().get("a").unwrap(), "2");
    }
}
