//! Content store error definitions.

use std::path::PathBuf;
use thiserror::Error;

use crate::content::node::NodeId;

/// Errors raised while loading or building a content snapshot.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Two nodes share the same id.
    #[error("duplicate node id {0}")]
    DuplicateId(NodeId),

    /// A node references a parent that is not in the snapshot.
    #[error("node {id} references missing parent {parent}")]
    MissingParent { id: NodeId, parent: NodeId },

    /// A node's path does not extend its parent's path by its own id.
    #[error("node {id} has path \"{found}\", expected \"{expected}\"")]
    BadPath {
        id: NodeId,
        expected: String,
        found: String,
    },

    /// A url segment is empty or contains a separator.
    #[error("node {id} has invalid url segment \"{name}\"")]
    InvalidSegment { id: NodeId, name: String },

    /// Two published siblings share a url segment (ignoring case).
    #[error("url segment \"{name}\" is used twice under {}", parent.map(|p| p.to_string()).unwrap_or_else(|| "the root".into()))]
    DuplicateSegment {
        parent: Option<NodeId>,
        name: String,
    },

    /// Snapshot file could not be read.
    #[error("failed to read content snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot file is not valid JSON.
    #[error("failed to parse content snapshot {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
