//! Navigation Session
//!
//! Single owner of "where am I": the frame stack, the listing currently shown
//! and the edit state of its rows. The listing always reflects the latest
//! successful fetch for `current_parent_id()`; a failed fetch leaves stack and
//! listing exactly as they were.

use super::frames::{FrameStack, NavigationFrame};
use super::sync::MutationSynchronizer;
use crate::edit::{EditRegistry, NodeEditState, RowIntent};
use crate::error::{ApiError, StoreError};
use crate::store::DocumentStore;
use crate::tree::{Listing, Node};
use crate::types::NodeId;
use std::sync::Arc;
use tracing::{debug, info};

pub struct NavigationSession {
    store: Arc<dyn DocumentStore>,
    frames: FrameStack,
    listing: Listing,
    edits: EditRegistry,
}

impl NavigationSession {
    /// Session positioned at root with nothing fetched yet.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            frames: FrameStack::new(),
            listing: Listing::default(),
            edits: EditRegistry::new(),
        }
    }

    /// Create a session and load the root listing.
    pub async fn at_root(store: Arc<dyn DocumentStore>) -> Result<Self, StoreError> {
        let mut session = Self::new(store);
        session.enter_root().await?;
        Ok(session)
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn frames(&self) -> &[NavigationFrame] {
        self.frames.frames()
    }

    pub fn frame_stack(&self) -> &FrameStack {
        &self.frames
    }

    pub fn current_parent_id(&self) -> Option<&NodeId> {
        self.frames.current_parent_id()
    }

    pub fn breadcrumb_path(&self) -> Vec<&str> {
        self.frames.breadcrumb_path()
    }

    pub fn breadcrumb(&self) -> String {
        self.frames.breadcrumb()
    }

    /// Clear the stack and show root.
    pub async fn enter_root(&mut self) -> Result<&Listing, StoreError> {
        self.transition(FrameStack::new()).await?;
        info!("Entered root");
        Ok(&self.listing)
    }

    /// Descend into `node_id`; it becomes the parent for all later operations.
    pub async fn enter_directory(
        &mut self,
        node_id: impl Into<NodeId>,
        display_name: impl Into<String>,
    ) -> Result<&Listing, StoreError> {
        let frame = NavigationFrame::new(node_id, display_name);
        let next = self.frames.pushed(frame);
        self.transition(next).await?;
        info!(breadcrumb = %self.breadcrumb(), "Entered directory");
        Ok(&self.listing)
    }

    /// Pop one level. Returns false (and touches nothing) when already at root.
    pub async fn go_back(&mut self) -> Result<bool, StoreError> {
        let Some(next) = self.frames.popped() else {
            debug!("go_back at root ignored");
            return Ok(false);
        };
        self.transition(next).await?;
        info!(breadcrumb = %self.breadcrumb(), "Went back");
        Ok(true)
    }

    /// Activate a listed row: opens it when it is a directory not being edited.
    pub async fn open(&mut self, node_id: &NodeId) -> Result<RowIntent, ApiError> {
        let node = self.listed_node(node_id)?.clone();
        let intent = self.edits.activate(&node);
        if intent == RowIntent::Open {
            self.enter_directory(node.id, node.name).await?;
        }
        Ok(intent)
    }

    pub fn edit_state(&self, node_id: &NodeId) -> NodeEditState {
        self.edits.state(node_id)
    }

    pub fn edits(&self) -> &EditRegistry {
        &self.edits
    }

    pub fn edits_mut(&mut self) -> &mut EditRegistry {
        &mut self.edits
    }

    /// Put a listed row into `Editing`, seeded with its current name.
    pub fn start_edit(&mut self, node_id: &NodeId) -> Result<bool, ApiError> {
        let node = self.listed_node(node_id)?.clone();
        Ok(self.edits.start(&node))
    }

    pub fn cancel_edit(&mut self, node_id: &NodeId) -> bool {
        self.edits.cancel(node_id)
    }

    /// Leave `Editing` right away, then issue the rename through the synchronizer.
    ///
    /// The row is `Viewing` whether or not the rename succeeds; the refreshed
    /// listing is what shows the new name. Returns false if the row was not
    /// being edited.
    pub async fn confirm_edit(&mut self, node_id: &NodeId) -> Result<bool, ApiError> {
        let Some(intent) = self.edits.confirm(node_id) else {
            return Ok(false);
        };
        self.synchronizer()
            .rename(intent.kind, &intent.new_name, &intent.node_id)
            .await?;
        Ok(true)
    }

    pub fn synchronizer(&mut self) -> MutationSynchronizer<'_> {
        MutationSynchronizer::new(self)
    }

    pub(crate) fn listed_node(&self, node_id: &NodeId) -> Result<&Node, ApiError> {
        self.listing.find_by_id(node_id).ok_or_else(|| {
            StoreError::NotFound(format!("{} is not in the current listing", node_id)).into()
        })
    }

    /// Re-read the listing for the current position.
    pub(crate) async fn refresh(&mut self) -> Result<(), StoreError> {
        let listing = self
            .store
            .list_children(self.frames.current_parent_id())
            .await?;
        self.edits.retain_listed(&listing);
        self.listing = listing;
        Ok(())
    }

    /// Fetch the listing for `next`, then commit both stack and listing.
    async fn transition(&mut self, next: FrameStack) -> Result<(), StoreError> {
        let listing = self.store.list_children(next.current_parent_id()).await?;
        debug!(
            depth = next.depth(),
            entries = listing.len(),
            "Listing fetched"
        );
        self.frames = next;
        self.listing = listing;
        self.edits.clear();
        Ok(())
    }
}
