//! Navigation frames and the back-stack.
//!
//! A `FrameStack` is never mutated in place: every transition produces a new
//! stack, and the session swaps it in only once the matching listing has been
//! fetched.

use crate::types::NodeId;

/// One ancestor directory above the current position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationFrame {
    pub node_id: NodeId,
    pub display_name: String,
}

impl NavigationFrame {
    pub fn new(node_id: impl Into<NodeId>, display_name: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            display_name: display_name.into(),
        }
    }
}

/// Root-to-current sequence of frames. Empty means "at root".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameStack {
    frames: Vec<NavigationFrame>,
}

impl FrameStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stack with `frame` on top.
    pub fn pushed(&self, frame: NavigationFrame) -> FrameStack {
        let mut frames = Vec::with_capacity(self.frames.len() + 1);
        frames.extend_from_slice(&self.frames);
        frames.push(frame);
        FrameStack { frames }
    }

    /// Stack without its top frame, or None when already at root.
    pub fn popped(&self) -> Option<FrameStack> {
        let (_, rest) = self.frames.split_last()?;
        Some(FrameStack {
            frames: rest.to_vec(),
        })
    }

    pub fn top(&self) -> Option<&NavigationFrame> {
        self.frames.last()
    }

    /// Parent id for every listing and mutation issued at this position.
    pub fn current_parent_id(&self) -> Option<&NodeId> {
        self.top().map(|frame| &frame.node_id)
    }

    pub fn is_root(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn frames(&self) -> &[NavigationFrame] {
        &self.frames
    }

    /// Display names, root to current.
    pub fn breadcrumb_path(&self) -> Vec<&str> {
        self.frames
            .iter()
            .map(|frame| frame.display_name.as_str())
            .collect()
    }

    /// Breadcrumb rendered as `"/ a / b / c"`; `"/ "` at root.
    pub fn breadcrumb(&self) -> String {
        format!("/ {}", self.breadcrumb_path().join(" / "))
    }
}
