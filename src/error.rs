//! Error types for the document navigator.

use thiserror::Error;

/// Failures reported by a document store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Network or protocol failure. Retryable by user action, never automatically.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The target node does not exist (or no longer exists).
    #[error("Node not found: {0}")]
    NotFound(String),

    /// The requested parent is not an existing directory.
    #[error("Invalid parent: {0}")]
    InvalidParent(String),

    /// The store refused a name that already exists under the parent.
    #[error("Name conflict: {0}")]
    Conflict(String),

    /// Any other non-success response.
    #[error("Store rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
}

impl StoreError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Transport(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Transport(err.to_string())
    }
}

/// Crate-level error surfaced to callers of the engine and the shell.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl ApiError {
    /// The underlying store failure, if this error came from the store.
    pub fn store_error(&self) -> Option<&StoreError> {
        match self {
            ApiError::Store(err) => Some(err),
            _ => None,
        }
    }
}
