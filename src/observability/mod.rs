//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events, request id as a field)
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → stderr (fmt layer, filtered by RUST_LOG or the configured level)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows through every lookup event
//! - Metrics are cheap (atomic increments); without an installed recorder they are no-ops
//! - Logs go to stderr so command output on stdout stays machine-readable

pub mod logging;
pub mod metrics;
