//! Content routing resolution engine.
//!
//! Maps an incoming request URI (and host) onto a node of a published
//! content tree, through an ordered chain of lookups over an immutable,
//! atomically swapped snapshot.

// Core subsystems
pub mod content;
pub mod domain;
pub mod routing;
pub mod template;

// Cross-cutting concerns
pub mod config;
pub mod observability;

pub use config::schema::RouterConfig;
pub use content::{ContentNode, ContentStore, NodeId};
pub use routing::{RequestResolver, ResolutionResult, SnapshotParts};
