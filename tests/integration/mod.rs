//! Integration tests for the document navigator

mod config_loading;
mod edit_flow;
mod mutation_consistency;
mod navigation_properties;
mod support;
