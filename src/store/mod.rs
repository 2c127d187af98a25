//! Document Store
//!
//! Stateless request layer over the remote hierarchical store. The engine only
//! requests creations and deletions here; the store owns node identity and the
//! parent relation.

pub mod contract;
pub mod http;
pub mod memory;

use crate::error::StoreError;
use crate::tree::{Listing, Node};
use crate::types::{NodeId, NodeKind};
use async_trait::async_trait;

pub use http::HttpDocumentStore;
pub use memory::{MemoryDocumentStore, StoreRequest};

/// Document store interface
///
/// A `parent_id` of `None` always means root level. Implementations that talk
/// to a store with a concrete root container translate at their own boundary.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// List the direct children of `parent_id`.
    async fn list_children(&self, parent_id: Option<&NodeId>) -> Result<Listing, StoreError>;

    /// Create a directory or file under `parent_id`.
    async fn create_node(
        &self,
        kind: NodeKind,
        name: &str,
        parent_id: Option<&NodeId>,
    ) -> Result<Node, StoreError>;

    /// Rename `node_id`, setting its parent to `parent_id` in the same update.
    async fn rename_node(
        &self,
        kind: NodeKind,
        new_name: &str,
        node_id: &NodeId,
        parent_id: Option<&NodeId>,
    ) -> Result<(), StoreError>;

    /// Delete `node_id`. `recursive` only applies to directories.
    async fn delete_node(
        &self,
        kind: NodeKind,
        node_id: &NodeId,
        recursive: bool,
    ) -> Result<(), StoreError>;
}
