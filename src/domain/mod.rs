//! Domain subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming (uri, host)
//!     → path.rs (extract host, canonicalize path once)
//!     → registry.rs (pick domain by host + prefix)
//!     → registry.rs (strip mount prefix → domain-relative path)
//!     → Document Request (domain, culture, relative path)
//! ```
//!
//! # Design Decisions
//! - Normalization happens once; lookups never re-parse the raw URI
//! - No domain match leaves the request root-relative

pub mod path;
pub mod registry;

pub use path::RequestUri;
pub use registry::{Domain, DomainRegistry, HostPattern};
