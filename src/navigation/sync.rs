//! Mutation Synchronizer
//!
//! Wraps every create/rename/delete with a refetch of the current directory.
//! The refetch is issued strictly after the mutation's response, and the
//! displayed listing is only ever replaced by a freshly fetched one.

use super::session::NavigationSession;
use crate::error::{ApiError, StoreError};
use crate::tree::Node;
use crate::types::{NodeId, NodeKind};
use tracing::{info, warn};

/// Result of a delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The node was already gone; the end state matches the intent.
    AlreadyAbsent,
}

/// Reject names the store cannot represent before any request is made.
pub fn validate_name(name: &str) -> Result<(), ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError::InvalidName("Name cannot be empty".to_string()));
    }
    if name.contains('/') {
        return Err(ApiError::InvalidName(format!(
            "Name cannot contain '/': {}",
            name
        )));
    }
    Ok(())
}

pub struct MutationSynchronizer<'s> {
    session: &'s mut NavigationSession,
}

impl<'s> MutationSynchronizer<'s> {
    pub fn new(session: &'s mut NavigationSession) -> Self {
        Self { session }
    }

    /// Create under the current directory, then refetch.
    pub async fn create(&mut self, kind: NodeKind, name: &str) -> Result<Node, ApiError> {
        validate_name(name)?;
        let parent_id = self.session.current_parent_id().cloned();
        let node = self
            .session
            .store()
            .create_node(kind, name, parent_id.as_ref())
            .await?;
        info!(%kind, name, id = %node.id, "Created node");
        self.refetch("create").await?;
        Ok(node)
    }

    /// Rename a node, keeping it under the current directory, then refetch.
    pub async fn rename(
        &mut self,
        kind: NodeKind,
        new_name: &str,
        node_id: &NodeId,
    ) -> Result<(), ApiError> {
        validate_name(new_name)?;
        let parent_id = self.session.current_parent_id().cloned();
        self.session
            .store()
            .rename_node(kind, new_name, node_id, parent_id.as_ref())
            .await?;
        info!(%kind, %node_id, new_name, "Renamed node");
        self.refetch("rename").await?;
        Ok(())
    }

    /// Delete a node (directories always recursively), then refetch.
    pub async fn delete(
        &mut self,
        kind: NodeKind,
        node_id: &NodeId,
    ) -> Result<DeleteOutcome, ApiError> {
        let outcome = match self
            .session
            .store()
            .delete_node(kind, node_id, kind.is_directory())
            .await
        {
            Ok(()) => DeleteOutcome::Deleted,
            Err(StoreError::NotFound(_)) => {
                info!(%kind, %node_id, "Node already absent");
                DeleteOutcome::AlreadyAbsent
            }
            Err(err) => return Err(err.into()),
        };
        info!(%kind, %node_id, ?outcome, "Deleted node");
        self.refetch("delete").await?;
        Ok(outcome)
    }

    async fn refetch(&mut self, after: &str) -> Result<(), StoreError> {
        self.session.refresh().await.map_err(|err| {
            warn!(after, error = %err, "Mutation applied but listing refresh failed");
            err
        })
    }
}
