//! Content snapshot subsystem.
//!
//! # Data Flow
//! ```text
//! Content repository (JSON snapshot on disk, or any ContentSource)
//!     → source.rs (load published nodes)
//!     → store.rs (validate tree, build segment/alias indexes)
//!     → ContentStore (immutable, shared via Arc in a routing Snapshot)
//! ```
//!
//! # Design Decisions
//! - The store is a read-only snapshot; changes produce a new store
//! - Tree invariants (unique ids, path = parent path + id) are checked once at construction
//! - A node is visible only if it and all its ancestors are published
//! - Segment matching is case-insensitive, so sibling names must be unique ignoring case

pub mod error;
pub mod node;
pub mod source;
pub mod store;

pub use error::StoreError;
pub use node::{ContentNode, NodeId};
pub use source::{ContentSource, JsonContentSource};
pub use store::ContentStore;
