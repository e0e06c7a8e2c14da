//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! conf subsystem produces:
//!     → tracing events (reload success/no-op/failure, listener failures)
//!     → metrics.rs (reload counters, snapshot gauge)
//!
//! Consumers:
//!     → host process log subscriber
//!     → host process metrics recorder (e.g. Prometheus exporter)
//! ```
//!
//! # Design Decisions
//! - This crate only emits; subscribers and recorders are installed by the host
//! - Metric updates are cheap (atomic increments)

pub mod metrics;
