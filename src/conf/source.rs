//! Key/value source abstraction.
//!
//! # Responsibilities
//! - Resolve a logical resource name to raw key/value content
//! - Read the absolute path named by the override key
//!
//! # Design Decisions
//! - Sources return raw bytes; parsing happens in the loader
//! - A missing primary resource is `None`, not an error

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Raw access to named key/value content.
///
/// The store consumes this through a narrow interface so the backing
/// medium stays swappable.
pub trait KeyValueSource: Send + Sync {
    /// Resolve a logical resource name to its raw content.
    ///
    /// `None` means the resource does not exist, which the reload path
    /// treats as an empty configuration rather than an error.
    fn resolve(&self, logical_name: &str) -> Option<Vec<u8>>;

    /// Read an absolute path, used for the override file.
    fn read_absolute(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Source backed by a directory of flat files.
///
/// The logical resource name is a file name under the root directory.
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    /// Create a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl KeyValueSource for DirSource {
    fn resolve(&self, logical_name: &str) -> Option<Vec<u8>> {
        fs::read(self.root.join(logical_name)).ok()
    }

    fn read_absolute(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }
}

/// In-memory source for programmatic wiring and tests.
///
/// Interior mutability lets content change between polls while the store
/// keeps a shared handle.
#[derive(Default)]
pub struct MemorySource {
    resources: Mutex<HashMap<String, Vec<u8>>>,
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the content of a logical resource.
    pub fn put(&self, logical_name: &str, content: &str) {
        self.resources
            .lock()
            .expect("memory source mutex poisoned")
            .insert(logical_name.to_string(), content.as_bytes().to_vec());
    }

    /// Remove a logical resource.
    pub fn remove(&self, logical_name: &str) {
        self.resources
            .lock()
            .expect("memory source mutex poisoned")
            .remove(logical_name);
    }

    /// Set the content behind an absolute path.
    pub fn put_file(&self, path: impl Into<PathBuf>, content: &str) {
        self.files
            .lock()
            .expect("memory source mutex poisoned")
            .insert(path.into(), content.as_bytes().to_vec());
    }
}

impl KeyValueSource for MemorySource {
    fn resolve(&self, logical_name: &str) -> Option<Vec<u8>> {
        self.resources
            .lock()
            .expect("memory source mutex poisoned")
            .get(logical_name)
            .cloned()
    }

    fn read_absolute(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.files
            .lock()
            .expect("memory source mutex poisoned")
            .get(path)
            .cloned()
            .ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display()))
            })
    }
}
