//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     construct source → DynamicConf → spawn ConfPoller (eager reload)
//!
//! Shutdown (shutdown.rs):
//!     Shutdown::trigger() → poller exits its loop → task completes
//! ```
//!
//! # Design Decisions
//! - The store is constructed once and shared by Arc, never global state
//! - Stopping the poller is the only teardown the store needs

pub mod shutdown;

pub use shutdown::Shutdown;
