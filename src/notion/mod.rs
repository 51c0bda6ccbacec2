// Notion content proxy: a client for the external document API and the
// work-list walk that assembles a page's full block tree.

pub mod api;
pub mod client;
pub mod error;
pub mod id;
pub mod models;
pub mod tree;

pub use api::DocumentApi;
pub use client::NotionClient;
pub use error::NotionError;
pub use id::normalize_id;
pub use models::{ChildrenPage, ContentNode, PageDocument};
pub use tree::{ContentTreeFetcher, Truncation, TreeFetch, TreeWalk};
