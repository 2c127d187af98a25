//! In-memory document store.
//!
//! Holds the whole forest behind a lock and enforces the same structural rules
//! as the remote store. Every mutating request is recorded so callers can
//! inspect exactly what the engine sent.

use super::DocumentStore;
use crate::error::StoreError;
use crate::tree::{Listing, Node};
use crate::types::{NodeId, NodeKind};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashSet;

/// A mutating request as received by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreRequest {
    Create {
        kind: NodeKind,
        name: String,
        parent_id: Option<NodeId>,
    },
    Rename {
        kind: NodeKind,
        node_id: NodeId,
        name: String,
        parent_id: Option<NodeId>,
    },
    Delete {
        kind: NodeKind,
        node_id: NodeId,
        recursive: bool,
    },
}

#[derive(Default)]
struct MemoryState {
    /// Insertion order doubles as listing order.
    nodes: Vec<Node>,
    next_id: u64,
    requests: Vec<StoreRequest>,
    list_calls: usize,
    fail_next: Option<StoreError>,
}

impl MemoryState {
    fn position(&self, id: &NodeId) -> Option<usize> {
        self.nodes.iter().position(|node| &node.id == id)
    }

    fn get(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| &node.id == id)
    }

    fn require_directory(&self, parent_id: Option<&NodeId>) -> Result<(), StoreError> {
        match parent_id {
            None => Ok(()),
            Some(id) => match self.get(id) {
                Some(node) if node.kind.is_directory() => Ok(()),
                Some(_) => Err(StoreError::InvalidParent(format!("{} is not a directory", id))),
                None => Err(StoreError::InvalidParent(format!("{} does not exist", id))),
            },
        }
    }

    fn name_taken(&self, parent_id: Option<&NodeId>, name: &str, except: Option<&NodeId>) -> bool {
        self.nodes.iter().any(|node| {
            node.parent_id.as_ref() == parent_id && node.name == name && Some(&node.id) != except
        })
    }

    /// `id` together with all of its descendants.
    fn subtree(&self, id: &NodeId) -> HashSet<NodeId> {
        let mut members = HashSet::new();
        members.insert(id.clone());
        loop {
            let before = members.len();
            for node in &self.nodes {
                if let Some(parent) = &node.parent_id {
                    if members.contains(parent) {
                        members.insert(node.id.clone());
                    }
                }
            }
            if members.len() == before {
                return members;
            }
        }
    }

    fn take_failure(&mut self) -> Result<(), StoreError> {
        match self.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Document store backed by process memory
#[derive(Default)]
pub struct MemoryDocumentStore {
    state: RwLock<MemoryState>,
    reject_duplicate_names: bool,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject creates and renames that reuse a sibling's name.
    pub fn with_unique_names() -> Self {
        Self {
            state: RwLock::new(MemoryState::default()),
            reject_duplicate_names: true,
        }
    }

    /// Insert a node with a caller-chosen id. The parent must already exist.
    pub fn insert(&self, node: Node) -> Result<(), StoreError> {
        let mut state = self.state.write();
        if state.position(&node.id).is_some() {
            return Err(StoreError::Conflict(format!("id {} already exists", node.id)));
        }
        state.require_directory(node.parent_id.as_ref())?;
        state.nodes.push(node);
        Ok(())
    }

    /// Make the next store call of any kind fail with `err`.
    pub fn fail_next(&self, err: StoreError) {
        self.state.write().fail_next = Some(err);
    }

    /// Mutating requests received so far, oldest first.
    pub fn requests(&self) -> Vec<StoreRequest> {
        self.state.read().requests.clone()
    }

    /// Number of listing calls served so far.
    pub fn list_calls(&self) -> usize {
        self.state.read().list_calls
    }

    pub fn get(&self, id: &NodeId) -> Option<Node> {
        self.state.read().get(id).cloned()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.state.read().position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.state.read().nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list_children(&self, parent_id: Option<&NodeId>) -> Result<Listing, StoreError> {
        let mut state = self.state.write();
        state.list_calls += 1;
        state.take_failure()?;
        if let Some(id) = parent_id {
            if state.position(id).is_none() {
                return Err(StoreError::NotFound(id.to_string()));
            }
        }

        let mut listing = Listing::default();
        for node in state
            .nodes
            .iter()
            .filter(|node| node.parent_id.as_ref() == parent_id)
        {
            match node.kind {
                NodeKind::Directory => listing.directories.push(node.clone()),
                NodeKind::File => listing.files.push(node.clone()),
            }
        }
        Ok(listing)
    }

    async fn create_node(
        &self,
        kind: NodeKind,
        name: &str,
        parent_id: Option<&NodeId>,
    ) -> Result<Node, StoreError> {
        let mut state = self.state.write();
        state.requests.push(StoreRequest::Create {
            kind,
            name: name.to_string(),
            parent_id: parent_id.cloned(),
        });
        state.take_failure()?;
        state.require_directory(parent_id)?;
        if self.reject_duplicate_names && state.name_taken(parent_id, name, None) {
            return Err(StoreError::Conflict(format!("{} already exists", name)));
        }

        state.next_id += 1;
        let prefix = match kind {
            NodeKind::Directory => "dir",
            NodeKind::File => "file",
        };
        let node = Node {
            id: NodeId::new(format!("{}-{}", prefix, state.next_id)),
            name: name.to_string(),
            kind,
            parent_id: parent_id.cloned(),
            created_at: Some(Utc::now()),
        };
        state.nodes.push(node.clone());
        Ok(node)
    }

    async fn rename_node(
        &self,
        kind: NodeKind,
        new_name: &str,
        node_id: &NodeId,
        parent_id: Option<&NodeId>,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write();
        state.requests.push(StoreRequest::Rename {
            kind,
            node_id: node_id.clone(),
            name: new_name.to_string(),
            parent_id: parent_id.cloned(),
        });
        state.take_failure()?;

        let index = state
            .position(node_id)
            .filter(|&i| state.nodes[i].kind == kind)
            .ok_or_else(|| StoreError::NotFound(node_id.to_string()))?;

        if state.nodes[index].parent_id.as_ref() != parent_id {
            state.require_directory(parent_id)?;
            if let Some(target) = parent_id {
                if state.subtree(node_id).contains(target) {
                    return Err(StoreError::InvalidParent(format!(
                        "{} cannot be moved into its own subtree",
                        node_id
                    )));
                }
            }
        }
        if self.reject_duplicate_names && state.name_taken(parent_id, new_name, Some(node_id)) {
            return Err(StoreError::Conflict(format!("{} already exists", new_name)));
        }

        let node = &mut state.nodes[index];
        node.name = new_name.to_string();
        node.parent_id = parent_id.cloned();
        Ok(())
    }

    async fn delete_node(
        &self,
        kind: NodeKind,
        node_id: &NodeId,
        recursive: bool,
    ) -> Result<(), StoreError> {
        let mut state = self.state.write();
        state.requests.push(StoreRequest::Delete {
            kind,
            node_id: node_id.clone(),
            recursive,
        });
        state.take_failure()?;

        match state.get(node_id) {
            Some(node) if node.kind == kind => {}
            _ => return Err(StoreError::NotFound(node_id.to_string())),
        }

        let doomed = state.subtree(node_id);
        if kind.is_directory() && !recursive && doomed.len() > 1 {
            return Err(StoreError::Conflict(format!("directory {} is not empty", node_id)));
        }
        state.nodes.retain(|node| !doomed.contains(&node.id));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> MemoryDocumentStore {
        let store = MemoryDocumentStore::new();
        store
            .insert(Node::new("D1", "Docs", NodeKind::Directory, None))
            .unwrap();
        store
            .insert(Node::new("D2", "Reports", NodeKind::Directory, Some("D1".into())))
            .unwrap();
        store
            .insert(Node::new("F9", "draft.txt", NodeKind::File, Some("D2".into())))
            .unwrap();
        store
    }

    #[tokio::test]
    async fn lists_only_direct_children() {
        let store = seeded();
        let root = store.list_children(None).await.unwrap();
        assert_eq!(root.directories.len(), 1);
        assert!(root.files.is_empty());

        let docs = store.list_children(Some(&"D1".into())).await.unwrap();
        assert_eq!(docs.directories[0].id, NodeId::new("D2"));
        assert!(docs.files.is_empty());
    }

    #[tokio::test]
    async fn listing_unknown_parent_is_not_found() {
        let store = seeded();
        let err = store.list_children(Some(&"nope".into())).await.unwrap_err();
        assert_eq!(err, StoreError::NotFound("nope".to_string()));
    }

    #[tokio::test]
    async fn create_under_file_is_invalid_parent() {
        let store = seeded();
        let err = store
            .create_node(NodeKind::File, "x", Some(&"F9".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidParent(_)));
    }

    #[tokio::test]
    async fn duplicate_names_accepted_unless_unique_mode() {
        let store = seeded();
        store
            .create_node(NodeKind::Directory, "Reports", Some(&"D1".into()))
            .await
            .unwrap();

        let strict = MemoryDocumentStore::with_unique_names();
        strict
            .create_node(NodeKind::Directory, "Reports", None)
            .await
            .unwrap();
        let err = strict
            .create_node(NodeKind::Directory, "Reports", None)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[tokio::test]
    async fn recursive_delete_removes_descendants() {
        let store = seeded();
        let err = store
            .delete_node(NodeKind::Directory, &"D1".into(), false)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));

        store
            .delete_node(NodeKind::Directory, &"D1".into(), true)
            .await
            .unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn rename_rejects_cycles_and_wrong_kind() {
        let store = seeded();
        let err = store
            .rename_node(NodeKind::Directory, "Docs", &"D1".into(), Some(&"D2".into()))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidParent(_)));

        let err = store
            .rename_node(NodeKind::File, "Docs", &"D1".into(), None)
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn injected_failure_fires_once() {
        let store = seeded();
        store.fail_next(StoreError::Transport("reset".to_string()));
        assert!(store.list_children(None).await.is_err());
        assert!(store.list_children(None).await.is_ok());
        assert_eq!(store.list_calls(), 2);
    }
}
