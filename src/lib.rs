//! Docnav: Document Tree Navigation
//!
//! Navigation and synchronization engine over a remotely stored hierarchical
//! document tree. Tracks the current position, turns navigation and mutation
//! intents into store calls, and refetches the displayed listing after every
//! write so it never shows state the store has not just confirmed.

pub mod config;
pub mod edit;
pub mod error;
pub mod logging;
pub mod navigation;
pub mod store;
pub mod tooling;
pub mod tree;
pub mod types;

pub use error::{ApiError, StoreError};
pub use navigation::{MutationSynchronizer, NavigationSession};
pub use store::DocumentStore;
