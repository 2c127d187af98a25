//! Document tree model: nodes and per-parent listings.

pub mod node;

pub use node::{Listing, Node};
