use async_trait::async_trait;
use docnav::store::{DocumentStore, MemoryDocumentStore};
use docnav::tree::{Listing, Node};
use docnav::types::{NodeId, NodeKind};
use docnav::StoreError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Root: Docs (D1) { Reports (D2) { Q1 (D3) }, draft.txt (F9) }, readme.md (F1)
pub fn seeded_store() -> Arc<MemoryDocumentStore> {
    let store = MemoryDocumentStore::new();
    store
        .insert(Node::new("D1", "Docs", NodeKind::Directory, None))
        .unwrap();
    store
        .insert(Node::new("D2", "Reports", NodeKind::Directory, Some("D1".into())))
        .unwrap();
    store
        .insert(Node::new("D3", "Q1", NodeKind::Directory, Some("D2".into())))
        .unwrap();
    store
        .insert(Node::new("F9", "draft.txt", NodeKind::File, Some("D1".into())))
        .unwrap();
    store
        .insert(Node::new("F1", "readme.md", NodeKind::File, None))
        .unwrap();
    Arc::new(store)
}

/// Store whose listing order changes on every call.
pub struct ReorderingStore {
    pub inner: Arc<MemoryDocumentStore>,
    calls: AtomicUsize,
}

impl ReorderingStore {
    pub fn new(inner: Arc<MemoryDocumentStore>) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl DocumentStore for ReorderingStore {
    async fn list_children(&self, parent_id: Option<&NodeId>) -> Result<Listing, StoreError> {
        let mut listing = self.inner.list_children(parent_id).await?;
        if self.calls.fetch_add(1, Ordering::SeqCst) % 2 == 1 {
            listing.directories.reverse();
            listing.files.reverse();
        }
        Ok(listing)
    }

    async fn create_node(
        &self,
        kind: NodeKind,
        name: &str,
        parent_id: Option<&NodeId>,
    ) -> Result<Node, StoreError> {
        self.inner.create_node(kind, name, parent_id).await
    }

    async fn rename_node(
        &self,
        kind: NodeKind,
        new_name: &str,
        node_id: &NodeId,
        parent_id: Option<&NodeId>,
    ) -> Result<(), StoreError> {
        self.inner
            .rename_node(kind, new_name, node_id, parent_id)
            .await
    }

    async fn delete_node(
        &self,
        kind: NodeKind,
        node_id: &NodeId,
        recursive: bool,
    ) -> Result<(), StoreError> {
        self.inner.delete_node(kind, node_id, recursive).await
    }
}
