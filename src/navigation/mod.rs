//! Navigation and synchronization engine.
//!
//! `NavigationSession` tracks the current position in the document tree;
//! `MutationSynchronizer` routes every write through the store and refreshes
//! the displayed listing afterwards.

pub mod frames;
pub mod session;
pub mod sync;

pub use frames::{FrameStack, NavigationFrame};
pub use session::NavigationSession;
pub use sync::{validate_name, DeleteOutcome, MutationSynchronizer};
