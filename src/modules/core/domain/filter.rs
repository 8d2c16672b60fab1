//! Caller-supplied filter model

use doclink_types::fields;
use serde::{Deserialize, Serialize};

/// Ordered field → equality-value map
pub type WhereClause = serde_json::Map<String, serde_json::Value>;

/// Filter object handed in by the data access framework.
///
/// Only the `where` clause is understood. Any other top-level key
/// (`limit`, `skip`, `order`, `fields`, `include`, ...) fails
/// deserialization instead of being silently dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Filter {
    /// Equality predicates, in the order the caller listed them
    #[serde(rename = "where", default, skip_serializing_if = "Option::is_none")]
    pub where_clause: Option<WhereClause>,
}

impl Filter {
    /// Create an empty filter (matches every document of the entity type)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filter from an optional where clause
    pub fn with_where(where_clause: Option<WhereClause>) -> Self {
        Self { where_clause }
    }

    /// Filter selecting a single id
    pub fn by_id(id: serde_json::Value) -> Self {
        Self::new().eq(fields::ID, id)
    }

    /// Add an equality predicate
    pub fn eq(mut self, field: impl Into<String>, value: serde_json::Value) -> Self {
        self.where_clause
            .get_or_insert_with(WhereClause::new)
            .insert(field.into(), value);
        self
    }

    /// Iterate the predicates in order
    pub fn predicates(&self) -> impl Iterator<Item = (&String, &serde_json::Value)> {
        self.where_clause.iter().flat_map(|w| w.iter())
    }

    /// Number of equality predicates
    pub fn len(&self) -> usize {
        self.where_clause.as_ref().map_or(0, |w| w.len())
    }

    /// Returns true if the filter has no predicates
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
