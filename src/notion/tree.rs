use std::collections::VecDeque;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::api::DocumentApi;
use super::error::NotionError;
use super::id::normalize_id;
use super::models::{ContentNode, PageDocument};

/// A node whose child listing stopped early because a page request failed.
/// Children gathered before the failure are still in the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Truncation {
    pub node_id: String,
    pub pages_fetched: usize,
    pub status: Option<u16>,
    pub message: String,
}

/// Result of walking a node's descendants
#[derive(Debug, Clone, Default)]
pub struct TreeFetch {
    pub blocks: Vec<ContentNode>,
    pub truncated: Vec<Truncation>,
    pub requests: usize,
}

impl TreeFetch {
    pub fn is_complete(&self) -> bool {
        self.truncated.is_empty()
    }

    /// Total number of nodes in the tree, nested children included
    pub fn node_count(&self) -> usize {
        self.blocks.iter().map(ContentNode::subtree_size).sum()
    }
}

/// A node whose children are being listed.
struct Frame {
    /// The node that owns this listing; `None` for the walk's root
    node: Option<ContentNode>,
    id: String,
    cursor: Option<String>,
    /// Items from the last page that have not been placed yet
    pending: VecDeque<ContentNode>,
    /// Children already resolved, in API order
    resolved: Vec<ContentNode>,
    pages_fetched: usize,
    exhausted: bool,
}

impl Frame {
    fn root(id: String) -> Self {
        Self {
            node: None,
            id,
            cursor: None,
            pending: VecDeque::new(),
            resolved: Vec::new(),
            pages_fetched: 0,
            exhausted: false,
        }
    }

    fn for_node(node: ContentNode) -> Self {
        let mut frame = Self::root(node.id.clone());
        frame.node = Some(node);
        frame
    }
}

/// Depth-first walk over a node's descendants driven by an explicit stack.
///
/// Each `step` issues at most one listing request. A child with
/// `has_children` gets its own frame and is fully resolved before its next
/// sibling is looked at, so output order matches the API's order at every
/// level. A failed page ends that node's listing and is recorded as a
/// `Truncation`; the walk carries on with the rest of the tree.
pub struct TreeWalk {
    stack: Vec<Frame>,
    finished: Option<Vec<ContentNode>>,
    truncated: Vec<Truncation>,
    requests: usize,
}

impl TreeWalk {
    pub fn new(root_id: impl Into<String>) -> Self {
        Self {
            stack: vec![Frame::root(root_id.into())],
            finished: None,
            truncated: Vec::new(),
            requests: 0,
        }
    }

    pub fn is_done(&self) -> bool {
        self.finished.is_some()
    }

    /// Listing requests issued so far
    pub fn requests_issued(&self) -> usize {
        self.requests
    }

    /// Nodes currently open on the stack, the root included
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Truncations recorded so far
    pub fn truncations(&self) -> &[Truncation] {
        &self.truncated
    }

    /// Advance the walk until one request has been issued or nothing is left.
    /// Returns `false` once the walk is complete.
    pub async fn step(&mut self, api: &dyn DocumentApi) -> bool {
        loop {
            let Some(top) = self.stack.last_mut() else {
                return false;
            };

            if let Some(node) = top.pending.pop_front() {
                if node.has_children() {
                    self.stack.push(Frame::for_node(node));
                } else {
                    top.resolved.push(node);
                }
                continue;
            }

            if !top.exhausted {
                self.fetch_page(api).await;
                return true;
            }

            if let Some(frame) = self.stack.pop() {
                self.close(frame);
            }
        }
    }

    /// Run the walk to the end
    pub async fn run(mut self, api: &dyn DocumentApi) -> TreeFetch {
        while self.step(api).await {}
        self.finish()
    }

    /// Consume the walk. Frames still open (when called before the walk is
    /// done) are folded into their parents with whatever they hold.
    pub fn finish(mut self) -> TreeFetch {
        while let Some(mut frame) = self.stack.pop() {
            frame.resolved.extend(frame.pending.drain(..));
            self.close(frame);
        }

        TreeFetch {
            blocks: self.finished.unwrap_or_default(),
            truncated: self.truncated,
            requests: self.requests,
        }
    }

    /// Attach a finished frame's children to its node and hand the node to
    /// the parent frame, or store the result when the root closes.
    fn close(&mut self, frame: Frame) {
        match (self.stack.last_mut(), frame.node) {
            (Some(parent), Some(mut node)) => {
                node.children = Some(frame.resolved);
                parent.resolved.push(node);
            }
            _ => self.finished = Some(frame.resolved),
        }
    }

    async fn fetch_page(&mut self, api: &dyn DocumentApi) {
        let Some(frame) = self.stack.last_mut() else {
            return;
        };

        self.requests += 1;
        match api.list_children(&frame.id, frame.cursor.as_deref()).await {
            Ok(page) => {
                frame.pages_fetched += 1;
                let next = page.continuation().map(str::to_string);
                if page.has_more && next.is_none() {
                    warn!(node_id = %frame.id, "listing reported more results without a cursor");
                }
                match next {
                    Some(cursor) => frame.cursor = Some(cursor),
                    None => frame.exhausted = true,
                }
                frame.pending.extend(page.results);
            }
            Err(err) => {
                warn!(
                    node_id = %frame.id,
                    pages_fetched = frame.pages_fetched,
                    error = %err,
                    "child listing failed, keeping partial results"
                );
                frame.exhausted = true;
                self.truncated.push(Truncation {
                    node_id: frame.id.clone(),
                    pages_fetched: frame.pages_fetched,
                    status: err.status(),
                    message: err.to_string(),
                });
            }
        }
    }
}

/// Fetches a page and its complete block tree from the document API
#[derive(Clone)]
pub struct ContentTreeFetcher {
    api: Arc<dyn DocumentApi>,
}

impl ContentTreeFetcher {
    pub fn new(api: Arc<dyn DocumentApi>) -> Self {
        Self { api }
    }

    /// Page metadata plus every descendant block.
    ///
    /// A failed metadata lookup is returned as an error; failed child pages
    /// only mark the document incomplete.
    pub async fn fetch_document(&self, id: &str) -> Result<PageDocument, NotionError> {
        let id = normalize_id(id);
        let page = self.api.retrieve_node(&id).await?;
        let tree = self.fetch_children(&id).await;

        info!(
            page_id = %id,
            nodes = tree.node_count(),
            requests = tree.requests + 1,
            complete = tree.is_complete(),
            "fetched notion page"
        );

        Ok(PageDocument {
            page,
            complete: tree.is_complete(),
            blocks: tree.blocks,
            truncated: tree.truncated,
        })
    }

    /// Descendants of `id`; the identifier is used as given
    pub async fn fetch_children(&self, id: &str) -> TreeFetch {
        TreeWalk::new(id).run(self.api.as_ref()).await
    }
}
