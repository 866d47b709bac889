//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (uri, host)
//!     → resolver.rs (load current Snapshot, build DocumentRequest)
//!     → domain registry (attach domain, strip prefix)
//!     → chain.rs (lookups in ascending weight order)
//!         → lookup/* (route cache first, then segment walk / index reads)
//!         → not-found lookup if nothing matched
//!     → ResolutionResult (Resolved / NotFound / StoreUnready)
//!
//! Snapshot install (startup or reload):
//!     SnapshotParts (store, domains, templates, chain, settings)
//!     → resolver.rs (atomic swap of Arc<Snapshot>)
//!     → outgoing snapshot's route cache cleared
//! ```
//!
//! # Design Decisions
//! - Snapshots are immutable; only the route cache fills up at runtime
//! - Lookup order is fixed per snapshot and checked for conflicts up front
//! - Deterministic: same input and snapshot always resolve the same node

pub mod cache;
pub mod chain;
pub mod error;
pub mod lookup;
pub mod request;
pub mod resolver;
pub mod snapshot;

pub use cache::{CacheStats, RouteCache, RouteKey};
pub use chain::{ChainBuilder, LookupChain};
pub use error::RoutingError;
pub use lookup::{Lookup, LookupContext, LookupOutcome};
pub use request::{DocumentRequest, Outcome};
pub use resolver::{RequestResolver, ResolutionResult};
pub use snapshot::{Snapshot, SnapshotParts};
