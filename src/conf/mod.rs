//! Dynamic configuration subsystem.
//!
//! # Data Flow
//! ```text
//! poll timer (poll.rs)
//!     → service.rs reload()
//!     → source.rs (primary resource, then optional override file)
//!     → loader.rs (parse & merge)
//!     → store.rs (compare, atomic swap of the snapshot)
//!     → cache.rs clear_all()
//!     → callback.rs notify_all()
//!
//! On lookup:
//!     typed getter (service.rs)
//!     → resolver.rs (tenant-qualified key, fallback chain)
//!     → cache.rs (read-through per-type cache)
//!     → store.rs current() on miss
//! ```
//!
//! # Design Decisions
//! - A snapshot is immutable once published; a change publishes a new one
//! - Reloads are serial; lookups are lock-free and never block on a reload
//! - Tenant-scoped getters degrade to the caller's default, never fail

pub mod cache;
pub mod callback;
pub mod loader;
pub mod poll;
pub mod resolver;
pub mod service;
pub mod source;
pub mod store;

pub use callback::ReloadCallback;
pub use poll::ConfPoller;
pub use service::DynamicConf;
pub use source::{DirSource, KeyValueSource, MemorySource};
