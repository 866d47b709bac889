//! In-memory content snapshot.
//!
//! # Responsibilities
//! - Validate the tree delivered by the content repository
//! - Answer segment walks (parent + url segment → child) in O(1)
//! - Keep the url-alias index used by the alias lookup
//!
//! # Design Decisions
//! - Immutable after construction; a content change builds a new store
//! - Only visible nodes (published, with published ancestors) are indexed
//! - Sibling order is (sort_order, id), so "first root" is deterministic

use std::collections::{HashMap, HashSet};

use crate::content::error::StoreError;
use crate::content::node::{ContentNode, NodeId};

/// Read-optimized snapshot of the published content tree.
#[derive(Debug, Default)]
pub struct ContentStore {
    nodes: HashMap<NodeId, ContentNode>,
    visible: HashSet<NodeId>,
    /// Visible children per parent (`None` = top level), in sibling order.
    children: HashMap<Option<NodeId>, Vec<NodeId>>,
    /// (parent, lower-cased url segment) → child.
    segments: HashMap<(Option<NodeId>, String), NodeId>,
    /// Normalized url alias → nodes declaring it, shallowest first.
    aliases: HashMap<String, Vec<NodeId>>,
}

impl ContentStore {
    /// Build a store from repository nodes, checking tree invariants.
    pub fn from_nodes<I>(nodes: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = ContentNode>,
    {
        let mut by_id: HashMap<NodeId, ContentNode> = HashMap::new();
        for node in nodes {
            if by_id.contains_key(&node.id) {
                return Err(StoreError::DuplicateId(node.id));
            }
            by_id.insert(node.id, node);
        }

        for node in by_id.values() {
            let parent_path = match node.parent {
                Some(parent) => match by_id.get(&parent) {
                    Some(p) => Some(p.path.as_str()),
                    None => {
                        return Err(StoreError::MissingParent {
                            id: node.id,
                            parent,
                        })
                    }
                },
                None => None,
            };

            let expected = node.expected_path(parent_path);
            if node.path != expected {
                return Err(StoreError::BadPath {
                    id: node.id,
                    expected,
                    found: node.path.clone(),
                });
            }

            if node.url_name.trim().is_empty() || node.url_name.contains('/') {
                return Err(StoreError::InvalidSegment {
                    id: node.id,
                    name: node.url_name.clone(),
                });
            }
        }

        // Parents before children; the path check above guarantees depth grows by one per level.
        let mut ordered: Vec<&ContentNode> = by_id.values().collect();
        ordered.sort_by_key(|n| (depth(n), n.sort_order, n.id));

        let mut visible = HashSet::new();
        let mut children: HashMap<Option<NodeId>, Vec<NodeId>> = HashMap::new();
        let mut segments = HashMap::new();
        let mut aliases: HashMap<String, Vec<NodeId>> = HashMap::new();

        for node in ordered {
            let parent_visible = node.parent.map_or(true, |p| visible.contains(&p));
            if !(node.published && parent_visible) {
                continue;
            }
            visible.insert(node.id);

            let key = (node.parent, node.url_name.to_lowercase());
            if segments.insert(key, node.id).is_some() {
                return Err(StoreError::DuplicateSegment {
                    parent: node.parent,
                    name: node.url_name.clone(),
                });
            }
            children.entry(node.parent).or_default().push(node.id);

            for alias in &node.url_aliases {
                let alias = alias_key(alias);
                if !alias.is_empty() {
                    aliases.entry(alias).or_default().push(node.id);
                }
            }
        }

        Ok(Self {
            nodes: by_id,
            visible,
            children,
            segments,
            aliases,
        })
    }

    /// Get any node in the snapshot, visible or not.
    pub fn get(&self, id: NodeId) -> Option<&ContentNode> {
        self.nodes.get(&id)
    }

    /// Get a node only if it is visible to routing.
    pub fn published(&self, id: NodeId) -> Option<&ContentNode> {
        if self.visible.contains(&id) {
            self.nodes.get(&id)
        } else {
            None
        }
    }

    /// True if the node and all its ancestors are published.
    pub fn is_published(&self, id: NodeId) -> bool {
        self.visible.contains(&id)
    }

    /// Visible child of `parent` whose url segment matches, ignoring case.
    ///
    /// `parent = None` searches the top-level nodes.
    pub fn child_by_segment(&self, parent: Option<NodeId>, segment: &str) -> Option<NodeId> {
        self.segments
            .get(&(parent, segment.to_lowercase()))
            .copied()
    }

    /// Visible children in sibling order.
    pub fn children(&self, parent: Option<NodeId>) -> &[NodeId] {
        self.children.get(&parent).map(Vec::as_slice).unwrap_or(&[])
    }

    /// First visible top-level node.
    pub fn first_root(&self) -> Option<NodeId> {
        self.children(None).first().copied()
    }

    /// Visible nodes declaring `alias` as a url alias.
    pub fn nodes_with_alias(&self, alias: &str) -> &[NodeId] {
        self.aliases
            .get(&alias_key(alias))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// True if `ancestor` appears on `node`'s path (a node is its own ancestor).
    pub fn is_descendant_or_self(&self, node: NodeId, ancestor: NodeId) -> bool {
        self.nodes
            .get(&node)
            .is_some_and(|n| n.path_ids().any(|id| id == ancestor))
    }

    /// Ids from the top-level ancestor down to `node`.
    pub fn lineage(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(&node)
            .map(|n| n.path_ids().collect())
            .unwrap_or_default()
    }

    /// Number of nodes in the snapshot, including unpublished ones.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes visible to routing.
    pub fn published_len(&self) -> usize {
        self.visible.len()
    }
}

fn depth(node: &ContentNode) -> usize {
    node.path.matches(',').count()
}

/// Normalized form of a url alias or alias-shaped request path.
pub(crate) fn alias_key(alias: &str) -> String {
    alias.trim().trim_matches('/').to_lowercase()
}
