//! Node Edit State
//!
//! Per-row `Viewing`/`Editing` state machine gating when a rename may fire.
//! Buffers are never persisted; they are discarded on confirm, cancel, or when
//! the row leaves the displayed listing.

use crate::tree::{Listing, Node};
use crate::types::{NodeId, NodeKind};
use std::collections::HashMap;

/// Pending rename text for one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    pub pending_name: String,
}

/// Edit state of a single row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NodeEditState {
    #[default]
    Viewing,
    Editing(EditBuffer),
}

impl NodeEditState {
    pub fn is_editing(&self) -> bool {
        matches!(self, NodeEditState::Editing(_))
    }

    pub fn pending_name(&self) -> Option<&str> {
        match self {
            NodeEditState::Editing(buffer) => Some(&buffer.pending_name),
            NodeEditState::Viewing => None,
        }
    }

    /// `Viewing -> Editing`, seeding the buffer with the current name.
    pub fn start(&mut self, current_name: &str) -> bool {
        if self.is_editing() {
            return false;
        }
        *self = NodeEditState::Editing(EditBuffer {
            pending_name: current_name.to_string(),
        });
        true
    }

    /// Replace the pending text. No effect while viewing.
    pub fn set_pending(&mut self, text: &str) -> bool {
        match self {
            NodeEditState::Editing(buffer) => {
                buffer.pending_name = text.to_string();
                true
            }
            NodeEditState::Viewing => false,
        }
    }

    pub fn push_char(&mut self, c: char) -> bool {
        match self {
            NodeEditState::Editing(buffer) => {
                buffer.pending_name.push(c);
                true
            }
            NodeEditState::Viewing => false,
        }
    }

    pub fn backspace(&mut self) -> bool {
        match self {
            NodeEditState::Editing(buffer) => buffer.pending_name.pop().is_some(),
            NodeEditState::Viewing => false,
        }
    }

    /// `Editing -> Viewing`, yielding the buffer to submit.
    pub fn confirm(&mut self) -> Option<EditBuffer> {
        match std::mem::take(self) {
            NodeEditState::Editing(buffer) => Some(buffer),
            NodeEditState::Viewing => None,
        }
    }

    /// `Editing -> Viewing`, discarding the buffer.
    pub fn cancel(&mut self) -> bool {
        std::mem::take(self).is_editing()
    }
}

/// What a single activation (click/enter) on a row means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowIntent {
    /// Descend into the directory.
    Open,
    /// The row is being renamed; activation does not open it.
    EditInProgress,
    /// Files have nothing to open.
    NotADirectory,
}

/// Rename ready to be handed to the synchronizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameIntent {
    pub kind: NodeKind,
    pub node_id: NodeId,
    pub new_name: String,
}

/// Edit state of every row in the displayed listing.
///
/// Rows not present are `Viewing`. At most one row is `Editing`: starting an
/// edit on another row discards the previous buffer.
#[derive(Debug, Default)]
pub struct EditRegistry {
    rows: HashMap<NodeId, (NodeKind, NodeEditState)>,
}

impl EditRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, node_id: &NodeId) -> NodeEditState {
        self.rows
            .get(node_id)
            .map(|(_, state)| state.clone())
            .unwrap_or_default()
    }

    pub fn is_editing(&self, node_id: &NodeId) -> bool {
        self.rows
            .get(node_id)
            .map(|(_, state)| state.is_editing())
            .unwrap_or(false)
    }

    /// Row currently being edited, if any.
    pub fn editing(&self) -> Option<(&NodeId, &str)> {
        self.rows
            .iter()
            .find_map(|(id, (_, state))| state.pending_name().map(|name| (id, name)))
    }

    pub fn start(&mut self, node: &Node) -> bool {
        if self.is_editing(&node.id) {
            return false;
        }
        self.rows.clear();
        let mut state = NodeEditState::Viewing;
        state.start(&node.name);
        self.rows.insert(node.id.clone(), (node.kind, state));
        true
    }

    pub fn set_pending(&mut self, node_id: &NodeId, text: &str) -> bool {
        self.rows
            .get_mut(node_id)
            .map(|(_, state)| state.set_pending(text))
            .unwrap_or(false)
    }

    pub fn push_char(&mut self, node_id: &NodeId, c: char) -> bool {
        self.rows
            .get_mut(node_id)
            .map(|(_, state)| state.push_char(c))
            .unwrap_or(false)
    }

    pub fn backspace(&mut self, node_id: &NodeId) -> bool {
        self.rows
            .get_mut(node_id)
            .map(|(_, state)| state.backspace())
            .unwrap_or(false)
    }

    pub fn cancel(&mut self, node_id: &NodeId) -> bool {
        self.rows
            .remove(node_id)
            .map(|(_, mut state)| state.cancel())
            .unwrap_or(false)
    }

    /// Move the row back to `Viewing` and hand out the rename to issue.
    pub fn confirm(&mut self, node_id: &NodeId) -> Option<RenameIntent> {
        let (kind, mut state) = self.rows.remove(node_id)?;
        state.confirm().map(|buffer| RenameIntent {
            kind,
            node_id: node_id.clone(),
            new_name: buffer.pending_name,
        })
    }

    pub fn activate(&self, node: &Node) -> RowIntent {
        if self.is_editing(&node.id) {
            RowIntent::EditInProgress
        } else if node.kind.is_directory() {
            RowIntent::Open
        } else {
            RowIntent::NotADirectory
        }
    }

    /// Drop buffers of rows no longer shown.
    pub fn retain_listed(&mut self, listing: &Listing) {
        self.rows
            .retain(|node_id, _| listing.find_by_id(node_id).is_some());
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }
}
