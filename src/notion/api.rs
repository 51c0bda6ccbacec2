use async_trait::async_trait;

use super::error::NotionError;
use super::models::{ChildrenPage, ContentNode};

/// The two read operations the tree walk needs from the document API.
///
/// `NotionClient` talks HTTP; tests substitute a scripted implementation.
#[async_trait]
pub trait DocumentApi: Send + Sync {
    /// Metadata for a single node (`GET /pages/{id}`)
    async fn retrieve_node(&self, id: &str) -> Result<ContentNode, NotionError>;

    /// One page of a node's children (`GET /blocks/{id}/children`)
    async fn list_children(&self, id: &str, cursor: Option<&str>) -> Result<ChildrenPage, NotionError>;
}
