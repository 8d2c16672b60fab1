//! Document and query value types exchanged with the document store

use serde::{Deserialize, Serialize};

/// A stored document, database or collection resource.
///
/// Keys keep their insertion order so filters and documents serialize
/// the way callers built them.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Well-known document property names
pub mod fields {
    /// User-visible document id
    pub const ID: &str = "id";
    /// Entity discriminator stamped by the connector
    pub const TYPE: &str = "type";
    /// Store-assigned resource id
    pub const RID: &str = "_rid";
    /// Store-assigned addressable link used for replace operations
    pub const SELF_LINK: &str = "_self";
    /// Store-assigned entity tag
    pub const ETAG: &str = "_etag";
    /// Store-assigned last-modified timestamp (unix seconds)
    pub const TS: &str = "_ts";
}

/// Returns the `_self` link of a resource, if the store assigned one
pub fn self_link(resource: &Document) -> Option<&str> {
    resource.get(fields::SELF_LINK).and_then(|v| v.as_str())
}

/// Named parameter bound into a query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryParameter {
    /// Parameter name including the leading `@`
    pub name: String,
    /// Bound value
    pub value: serde_json::Value,
}

impl QueryParameter {
    /// Create a parameter named `@<field>`
    pub fn for_field(field: &str, value: serde_json::Value) -> Self {
        Self {
            name: format!("@{}", field),
            value,
        }
    }
}

/// Parameterized query in the store's JSON shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    /// Query text
    pub query: String,
    /// Parameters in binding order
    #[serde(default)]
    pub parameters: Vec<QueryParameter>,
}

impl QuerySpec {
    /// Look up a bound parameter by name (including `@`)
    pub fn parameter(&self, name: &str) -> Option<&serde_json::Value> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| &p.value)
    }
}
