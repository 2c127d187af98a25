//! Document tree node and listing types

use crate::types::{NodeId, NodeKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A directory or file held by the document store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub kind: NodeKind,
    /// None iff the node sits at root level
    pub parent_id: Option<NodeId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Node {
    pub fn new(
        id: impl Into<NodeId>,
        name: impl Into<String>,
        kind: NodeKind,
        parent_id: Option<NodeId>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            parent_id,
            created_at: None,
        }
    }

    pub fn is_root_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Direct children of one parent, split by kind.
///
/// Order is whatever the store returned and may change between calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub directories: Vec<Node>,
    pub files: Vec<Node>,
}

impl Listing {
    pub fn is_empty(&self) -> bool {
        self.directories.is_empty() && self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.directories.len() + self.files.len()
    }

    /// Directories first, then files.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.directories.iter().chain(self.files.iter())
    }

    pub fn find_by_id(&self, id: &NodeId) -> Option<&Node> {
        self.iter().find(|node| &node.id == id)
    }

    /// First node whose name matches exactly, directories searched before files.
    pub fn find_by_name(&self, name: &str) -> Option<&Node> {
        self.iter().find(|node| node.name == name)
    }

    /// Compare two listings ignoring item order.
    pub fn same_contents(&self, other: &Listing) -> bool {
        fn sorted(nodes: &[Node]) -> Vec<&Node> {
            let mut nodes: Vec<&Node> = nodes.iter().collect();
            nodes.sort_by(|a, b| a.id.cmp(&b.id));
            nodes
        }
        sorted(&self.directories) == sorted(&other.directories)
            && sorted(&self.files) == sorted(&other.files)
    }
}
