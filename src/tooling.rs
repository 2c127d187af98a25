//! Tooling & Integration Layer
//!
//! Command-line front end for the navigation engine.

pub mod cli;

pub use cli::{run_shell, Cli, Shell, ShellCommand};
