use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::tree::Truncation;

/// A page or block as returned by the document API.
///
/// Only the fields the walk needs are typed; everything else the API sends is
/// kept in `fields` and written back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentNode {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_children: Option<bool>,
    /// Filled in by the walk, never by the API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<ContentNode>>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl ContentNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            has_children: None,
            children: None,
            fields: Map::new(),
        }
    }

    pub fn with_children_flag(mut self, has_children: bool) -> Self {
        self.has_children = Some(has_children);
        self
    }

    pub fn with_field(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    pub fn has_children(&self) -> bool {
        self.has_children.unwrap_or(false)
    }

    /// Block type as reported upstream ("paragraph", "toggle", ...)
    pub fn kind(&self) -> Option<&str> {
        self.fields.get("type").and_then(Value::as_str)
    }

    /// Number of nodes in this subtree, the node itself included
    pub fn subtree_size(&self) -> usize {
        1 + self
            .children
            .as_deref()
            .map(|c| c.iter().map(ContentNode::subtree_size).sum())
            .unwrap_or(0)
    }
}

/// One page of a children listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChildrenPage {
    #[serde(default)]
    pub results: Vec<ContentNode>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

impl ChildrenPage {
    /// Cursor for the following page, if the listing continues
    pub fn continuation(&self) -> Option<&str> {
        if self.has_more {
            self.next_cursor.as_deref()
        } else {
            None
        }
    }
}

/// Response body for the page proxy endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageDocument {
    pub page: ContentNode,
    pub blocks: Vec<ContentNode>,
    pub complete: bool,
    pub truncated: Vec<Truncation>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_unknown_fields() {
        let raw = json!({
            "object": "block",
            "id": "b1",
            "type": "paragraph",
            "has_children": false,
            "paragraph": { "rich_text": [] }
        });
        let node: ContentNode = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(node.id, "b1");
        assert!(!node.has_children());
        assert_eq!(node.kind(), Some("paragraph"));
        assert_eq!(serde_json::to_value(&node).unwrap(), raw);
    }

    #[test]
    fn page_metadata_gains_no_fields() {
        let raw = json!({ "object": "page", "id": "p1", "url": "https://notion.so/p1" });
        let node: ContentNode = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&node).unwrap(), raw);
    }

    #[test]
    fn children_serialize_when_present() {
        let mut node = ContentNode::new("parent").with_children_flag(true);
        node.children = Some(vec![ContentNode::new("child")]);
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["children"][0]["id"], "child");
        assert_eq!(node.subtree_size(), 2);
    }

    #[test]
    fn continuation_requires_has_more() {
        let page = ChildrenPage {
            results: vec![],
            has_more: false,
            next_cursor: Some("c".into()),
        };
        assert_eq!(page.continuation(), None);

        let page: ChildrenPage =
            serde_json::from_value(json!({ "results": [], "has_more": true, "next_cursor": "c2" })).unwrap();
        assert_eq!(page.continuation(), Some("c2"));

        let page: ChildrenPage = serde_json::from_value(json!({ "results": [], "has_more": true, "next_cursor": null })).unwrap();
        assert_eq!(page.continuation(), None);
    }
}
