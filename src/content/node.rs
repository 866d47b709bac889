//! Content node model.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::template::TemplateId;

/// Path marker shared by every top-level node (`"-1,<id>"`).
pub const ROOT_PATH: &str = "-1";

/// Identifier of a content node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub i64);

impl From<i64> for NodeId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<NodeId> for i64 {
    fn from(id: NodeId) -> Self {
        id.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A published content node as delivered by the content repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentNode {
    /// Unique node id.
    pub id: NodeId,

    /// Parent node, `None` for top-level nodes.
    #[serde(default)]
    pub parent: Option<NodeId>,

    /// Comma-separated ancestor chain ending with this node's id (e.g. "-1,1045,1047").
    pub path: String,

    /// Url segment, unique among siblings.
    pub url_name: String,

    /// Whether the node itself is published.
    #[serde(default = "default_published")]
    pub published: bool,

    /// Default template used when the request does not pick one.
    #[serde(default)]
    pub template: Option<TemplateId>,

    /// Position among siblings (lowest first).
    #[serde(default)]
    pub sort_order: i32,

    /// Alternative routes that resolve to this node.
    #[serde(default)]
    pub url_aliases: Vec<String>,
}

fn default_published() -> bool {
    true
}

impl ContentNode {
    /// Create a top-level node.
    pub fn root(id: i64, url_name: impl Into<String>) -> Self {
        Self {
            id: NodeId(id),
            parent: None,
            path: format!("{ROOT_PATH},{id}"),
            url_name: url_name.into(),
            published: true,
            template: None,
            sort_order: 0,
            url_aliases: Vec::new(),
        }
    }

    /// Create a node under `parent`, deriving its path.
    pub fn child_of(parent: &ContentNode, id: i64, url_name: impl Into<String>) -> Self {
        Self {
            id: NodeId(id),
            parent: Some(parent.id),
            path: format!("{},{id}", parent.path),
            url_name: url_name.into(),
            published: true,
            template: None,
            sort_order: 0,
            url_aliases: Vec::new(),
        }
    }

    pub fn with_template(mut self, template: TemplateId) -> Self {
        self.template = Some(template);
        self
    }

    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.url_aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn unpublished(mut self) -> Self {
        self.published = false;
        self
    }

    /// Ids on the path from the top-level ancestor down to this node.
    ///
    /// The leading `-1` marker and unparsable entries are skipped.
    pub fn path_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.path
            .split(',')
            .filter(|part| *part != ROOT_PATH)
            .filter_map(|part| part.trim().parse::<i64>().ok())
            .map(NodeId)
    }

    /// Path this node must have given its parent's path.
    pub fn expected_path(&self, parent_path: Option<&str>) -> String {
        format!("{},{}", parent_path.unwrap_or(ROOT_PATH), self.id)
    }
}
