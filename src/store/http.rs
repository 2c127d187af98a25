//! HTTP client for the remote document store.

use super::contract::{
    classify_status, error_message, CreateDirectoryRequest, CreateFileRequest,
    DeleteDirectoryRequest, ListingBody, NodeDetails, NodeUpdate, RootSentinel, StoreOp,
    UpdateRequest,
};
use super::DocumentStore;
use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::tree::{Listing, Node};
use crate::types::{NodeId, NodeKind};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use tracing::{debug, warn};

/// Document store reached over its REST API.
pub struct HttpDocumentStore {
    client: Client,
    base_url: String,
    user_token: String,
    root: RootSentinel,
}

impl HttpDocumentStore {
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Build around an existing client (shared connection pool).
    pub fn with_client(client: Client, config: &StoreConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_token: config.user_token.clone(),
            root: RootSentinel::new(config.root_id.clone().map(NodeId::new)),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn node_endpoint(&self, kind: NodeKind, node_id: &NodeId) -> String {
        self.endpoint(&format!("{}/{}", kind.collection(), node_id))
    }

    async fn execute(&self, op: StoreOp, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = request
            .query(&[("user_token", self.user_token.as_str())])
            .send()
            .await
            .map_err(|e| {
                warn!(?op, error = %e, "Store request did not complete");
                StoreError::Transport(e.to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = error_body(op, response.text().await);
        let err = classify_status(op, status.as_u16(), error_message(&body));
        warn!(?op, status = status.as_u16(), error = %err, "Store request failed");
        Err(err)
    }
}

/// Body of a failed response; a body that cannot be read is reported, not dropped.
fn error_body<E: std::fmt::Display>(op: StoreOp, read: Result<String, E>) -> String {
    match read {
        Ok(body) => body,
        Err(e) => {
            debug!(?op, error = %e, "Could not read error response body");
            format!("unreadable response body: {}", e)
        }
    }
}

#[async_trait]
impl DocumentStore for HttpDocumentStore {
    async fn list_children(&self, parent_id: Option<&NodeId>) -> Result<Listing, StoreError> {
        let parent = self.root.normalize(parent_id);
        let mut request = self.client.get(self.endpoint("directories"));
        if let Some(wire_parent) = self.root.outbound(parent.as_ref()) {
            request = request.query(&[("parent_id", wire_parent)]);
        }
        debug!(parent = ?parent, "GET /directories");

        let body: ListingBody = self
            .execute(StoreOp::List, request)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Transport(format!("Malformed listing body: {}", e)))?;
        Ok(body.into_listing(parent))
    }

    async fn create_node(
        &self,
        kind: NodeKind,
        name: &str,
        parent_id: Option<&NodeId>,
    ) -> Result<Node, StoreError> {
        let parent = self.root.normalize(parent_id);
        let wire_parent = self.root.outbound(parent.as_ref());
        let url = self.endpoint(kind.collection());
        debug!(%kind, name, parent = ?parent, "POST /{}", kind.collection());

        let request = match kind {
            NodeKind::Directory => self.client.post(url).json(&CreateDirectoryRequest {
                name,
                parent_id: wire_parent,
            }),
            NodeKind::File => self.client.post(url).json(&CreateFileRequest {
                filename: name,
                parent_id: wire_parent,
            }),
        };

        let details: NodeDetails = self
            .execute(StoreOp::Create, request)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Transport(format!("Malformed node body: {}", e)))?;
        let mut node = details.into_node(kind, &self.root);
        // Some store builds echo no parent on create; the request's parent is authoritative.
        if node.parent_id.is_none() {
            node.parent_id = parent;
        }
        Ok(node)
    }

    async fn rename_node(
        &self,
        kind: NodeKind,
        new_name: &str,
        node_id: &NodeId,
        parent_id: Option<&NodeId>,
    ) -> Result<(), StoreError> {
        let parent = self.root.normalize(parent_id);
        debug!(%kind, %node_id, new_name, parent = ?parent, "PATCH /{}/{{id}}", kind.collection());

        let request = self
            .client
            .patch(self.node_endpoint(kind, node_id))
            .json(&UpdateRequest {
                updates: NodeUpdate {
                    name: new_name,
                    parent_id: self.root.outbound(parent.as_ref()),
                },
            });
        self.execute(StoreOp::Rename, request).await?;
        Ok(())
    }

    async fn delete_node(
        &self,
        kind: NodeKind,
        node_id: &NodeId,
        recursive: bool,
    ) -> Result<(), StoreError> {
        debug!(%kind, %node_id, recursive, "DELETE /{}/{{id}}", kind.collection());

        let request = self.client.delete(self.node_endpoint(kind, node_id));
        let request = match kind {
            NodeKind::Directory => request.json(&DeleteDirectoryRequest { recursive }),
            NodeKind::File => request,
        };
        self.execute(StoreOp::Delete, request).await?;
        Ok(())
    }
}
