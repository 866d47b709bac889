//! Content repository boundary.
//!
//! The repository owns persistence; routing only needs a read-only dump of
//! the tree. `JsonContentSource` reads that dump from a JSON file.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::content::error::StoreError;
use crate::content::node::ContentNode;
use crate::content::store::ContentStore;

/// Read-only accessor for the content repository.
pub trait ContentSource: Send + Sync {
    /// Load every node of the current content tree.
    fn load(&self) -> Result<Vec<ContentNode>, StoreError>;

    /// Load and validate a fresh store.
    fn load_store(&self) -> Result<ContentStore, StoreError> {
        ContentStore::from_nodes(self.load()?)
    }
}

/// Content source backed by a JSON array of nodes.
#[derive(Debug, Clone)]
pub struct JsonContentSource {
    path: PathBuf,
}

impl JsonContentSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ContentSource for JsonContentSource {
    fn load(&self) -> Result<Vec<ContentNode>, StoreError> {
        let file = File::open(&self.path).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        let nodes: Vec<ContentNode> =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;

        tracing::debug!(path = ?self.path, nodes = nodes.len(), "Loaded content snapshot");
        Ok(nodes)
    }
}

/// Content source over nodes already in memory.
impl ContentSource for Vec<ContentNode> {
    fn load(&self) -> Result<Vec<ContentNode>, StoreError> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::NodeId;
    use std::io::Write;

    #[test]
    fn test_json_source_loads_store() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{ "id": 1, "path": "-1,1", "url_name": "home" }},
                {{ "id": 2, "parent": 1, "path": "-1,1,2", "url_name": "about", "template": 3 }}
            ]"#
        )
        .unwrap();

        let source = JsonContentSource::new(file.path());
        let store = source.load_store().unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.child_by_segment(Some(NodeId(1)), "about"), Some(NodeId(2)));
    }

    #[test]
    fn test_json_source_missing_file() {
        let source = JsonContentSource::new("/definitely/not/here.json");
        assert!(matches!(source.load(), Err(StoreError::Io { .. })));
    }

    #[test]
    fn test_json_source_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let source = JsonContentSource::new(file.path());
        assert!(matches!(source.load(), Err(StoreError::Parse { .. })));
    }
}
