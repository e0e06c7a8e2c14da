//! Hot-reloadable configuration store for a multi-tenant proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!   poll timer (conf/poll.rs)                 foreground callers
//!          │                                         │
//!          ▼                                         ▼
//!   ┌─────────────┐   ┌─────────┐   ┌────────┐   ┌───────────────┐
//!   │  reload()   │──▶│ source  │──▶│ loader │   │ typed getters │
//!   └──────┬──────┘   │ (read)  │   │(parse &│   └───────┬───────┘
//!          │          └─────────┘   │ merge) │           │
//!          │                        └────┬───┘           ▼
//!          ▼                             │        ┌──────────────┐
//!   ┌─────────────┐  compare + swap      │        │   resolver   │
//!   │    store    │◀─────────────────────┘        │(tenant-scoped│
//!   └──────┬──────┘                               │  fallback)   │
//!          │ on change                            └──────┬───────┘
//!          ▼                                             ▼
//!   caches.clear_all()                          ┌──────────────┐
//!          │                                    │ typed caches │──▶ store
//!          ▼                                    │(read-through)│   (on miss)
//!   callbacks.notify_all()                      └──────────────┘
//! ```
//!
//! Reloads happen on one background task; lookups are lock-free and run
//! concurrently at request-path frequency without ever observing a
//! partially-updated snapshot.

// Core subsystem
pub mod conf;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use conf::callback::ReloadCallback;
pub use conf::poll::ConfPoller;
pub use conf::service::DynamicConf;
pub use conf::source::{DirSource, KeyValueSource, MemorySource};
pub use lifecycle::Shutdown;
