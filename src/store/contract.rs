//! Wire shapes of the document store HTTP API and the translation between
//! them and the engine's node model.

use crate::error::StoreError;
use crate::tree::{Listing, Node};
use crate::types::{NodeId, NodeKind};
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store operation, used to classify failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    List,
    Create,
    Rename,
    Delete,
}

/// Listing item as returned by `GET /directories`
#[derive(Debug, Clone, Deserialize)]
pub struct ShortDetails {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Body of `GET /directories`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListingBody {
    #[serde(default)]
    pub directories: Vec<ShortDetails>,
    #[serde(default)]
    pub files: Vec<ShortDetails>,
}

/// Directory or file details returned by create calls. Extra fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeDetails {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreateDirectoryRequest<'a> {
    pub name: &'a str,
    pub parent_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct CreateFileRequest<'a> {
    pub filename: &'a str,
    pub parent_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct NodeUpdate<'a> {
    pub name: &'a str,
    pub parent_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct UpdateRequest<'a> {
    pub updates: NodeUpdate<'a>,
}

#[derive(Debug, Serialize)]
pub struct DeleteDirectoryRequest {
    pub recursive: bool,
}

/// FastAPI-style error body
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// Maps the engine's "no parent" to and from the store's root container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootSentinel {
    root_id: Option<NodeId>,
}

impl RootSentinel {
    pub fn new(root_id: Option<NodeId>) -> Self {
        Self { root_id }
    }

    /// Parent id to put on the wire for an engine-side parent.
    pub fn outbound<'a>(&'a self, parent_id: Option<&'a NodeId>) -> Option<&'a str> {
        parent_id
            .or(self.root_id.as_ref())
            .map(|id| id.as_str())
    }

    /// Engine-side parent for a parent id read off the wire.
    pub fn inbound(&self, parent_id: Option<String>) -> Option<NodeId> {
        let parent_id = parent_id.filter(|id| !id.is_empty())?;
        match &self.root_id {
            Some(root) if root.as_str() == parent_id => None,
            _ => Some(NodeId::new(parent_id)),
        }
    }

    /// Collapse an engine-side parent that names the root container itself.
    pub fn normalize(&self, parent_id: Option<&NodeId>) -> Option<NodeId> {
        self.inbound(parent_id.map(|id| id.as_str().to_string()))
    }
}

/// Parse the store's timestamps, which may or may not carry an offset.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

impl ListingBody {
    /// Listing items carry no parent, so every node is stamped with the queried one.
    pub fn into_listing(self, parent_id: Option<NodeId>) -> Listing {
        let convert = |item: ShortDetails, kind: NodeKind| Node {
            id: NodeId::new(item.id),
            name: item.name,
            kind,
            parent_id: parent_id.clone(),
            created_at: item.created_at.as_deref().and_then(parse_timestamp),
        };
        Listing {
            directories: self
                .directories
                .into_iter()
                .map(|item| convert(item, NodeKind::Directory))
                .collect(),
            files: self
                .files
                .into_iter()
                .map(|item| convert(item, NodeKind::File))
                .collect(),
        }
    }
}

impl NodeDetails {
    pub fn into_node(self, kind: NodeKind, root: &RootSentinel) -> Node {
        Node {
            id: NodeId::new(self.id),
            name: self.name,
            kind,
            parent_id: root.inbound(self.parent_id),
            created_at: self.created_at.as_deref().and_then(parse_timestamp),
        }
    }
}

/// Extract a human-readable message from an error response body.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: serde_json::Value::String(detail),
        }) => detail,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) if body.trim().is_empty() => "empty response body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

/// Map a non-success HTTP status to the store error taxonomy.
///
/// Several store routes wrap database failures in a 500 whose detail carries
/// the database message, so a server error saying "not found" is read the
/// same way as a 404.
pub fn classify_status(op: StoreOp, status: u16, message: String) -> StoreError {
    let missing = (500..600).contains(&status) && reports_missing(&message);
    match (op, status) {
        (StoreOp::Create, 400 | 404 | 422) => StoreError::InvalidParent(message),
        (StoreOp::Create, _) if missing => StoreError::InvalidParent(message),
        (_, 404) => StoreError::NotFound(message),
        (_, _) if missing => StoreError::NotFound(message),
        (_, 409) => StoreError::Conflict(message),
        (_, status) => StoreError::Rejected { status, message },
    }
}

fn reports_missing(message: &str) -> bool {
    message.to_lowercase().contains("not found")
}
