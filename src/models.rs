//! Forge API payload types.
//!
//! Forge resources are passed through opaquely: the crate splits the
//! JSON:API envelope apart (`data`, `included`, `links`) but does not
//! interpret resource schemas beyond that. Admin-API endpoints return raw
//! `serde_json::Value` lists and are not modeled at all.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One JSON:API resource object: type, id, attributes, relationships.
///
/// Attributes and relationships stay untyped; the only field this crate
/// ever reads itself is `attributes.name` (folder-tree search).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceObject {
    /// Resource type, e.g. `"folders"`, `"hubs"`, `"versions"`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Resource id.
    pub id: String,

    /// Untyped attribute map.
    #[serde(default)]
    pub attributes: Value,

    /// Untyped relationship map.
    #[serde(default)]
    pub relationships: Value,

    /// Anything else the server sent (links, meta, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ResourceObject {
    /// The resource's `attributes.name`, if present.
    pub fn name(&self) -> Option<&str> {
        self.attributes.get("name").and_then(Value::as_str)
    }

    /// The resource's `attributes.displayName`, if present.
    pub fn display_name(&self) -> Option<&str> {
        self.attributes.get("displayName").and_then(Value::as_str)
    }
}

/// A `links.next` entry pointing at the following page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageLink {
    #[serde(default)]
    pub href: Option<String>,
}

/// Pagination link metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageLinks {
    #[serde(default)]
    pub next: Option<PageLink>,
}

/// One page of a JSON:API response: `data`, optional `included`, optional
/// `links.next.href`.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonApiPage {
    #[serde(default)]
    pub data: Vec<ResourceObject>,
    #[serde(default)]
    pub included: Vec<ResourceObject>,
    #[serde(default)]
    pub links: PageLinks,
}

/// A single-resource JSON:API response (`data` is one object).
#[derive(Debug, Clone, Deserialize)]
pub struct JsonApiSingle {
    pub data: ResourceObject,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_object_roundtrip() {
        let json = serde_json::json!({
            "type": "folders",
            "id": "urn:adsk.wipprod:fs.folder:co.abc",
            "attributes": {"name": "Plans", "displayName": "Plans"},
            "relationships": {},
            "links": {"self": {"href": "/folders/abc"}}
        });
        let obj: ResourceObject = serde_json::from_value(json).unwrap();
        assert_eq!(obj.kind, "folders");
        assert_eq!(obj.name(), Some("Plans"));
        assert_eq!(obj.display_name(), Some("Plans"));
        assert!(obj.extra.contains_key("links"));
    }

    #[test]
    fn page_without_included_or_links() {
        let json = serde_json::json!({
            "data": [{"type": "hubs", "id": "b.1"}]
        });
        let page: JsonApiPage = serde_json::from_value(json).unwrap();
        assert_eq!(page.data.len(), 1);
        assert!(page.included.is_empty());
        assert!(page.links.next.is_none());
    }

    #[test]
    fn missing_name_is_none() {
        let obj: ResourceObject =
            serde_json::from_value(serde_json::json!({"type": "folders", "id": "x"})).unwrap();
        assert_eq!(obj.name(), None);
    }
}
