//! Data connector trait definition

use async_trait::async_trait;
use doclink_core::{DocLinkError, Filter, WhereClause};
use doclink_types::{Capability, Document, Primitive};

/// Verbs a data access framework invokes on a connector.
///
/// Every call resolves to exactly one outcome. Verbs that are not
/// supported fail with [`DocLinkError::NotImplemented`]; none of them
/// report success without doing the work.
#[async_trait]
pub trait DataConnector: Send + Sync {
    /// Resolve the configured database and collection.
    ///
    /// Must succeed before any other verb is used.
    async fn connect(&self) -> Result<(), DocLinkError>;

    /// Release the connection. There is no persistent state to release.
    async fn disconnect(&self) -> Result<(), DocLinkError>;

    /// Check that the resolved collection is still reachable
    async fn ping(&self) -> Result<(), DocLinkError>;

    /// Insert `data` as a new instance of `entity_type`
    async fn create(&self, entity_type: &str, data: Document) -> Result<Document, DocLinkError>;

    /// Fetch the instances of `entity_type` with the given id
    async fn find_by_id(
        &self,
        entity_type: &str,
        id: &serde_json::Value,
    ) -> Result<Vec<Document>, DocLinkError>;

    /// Fetch the instances of `entity_type` matching `filter`
    async fn find_all(
        &self,
        entity_type: &str,
        filter: Option<&Filter>,
    ) -> Result<Vec<Document>, DocLinkError>;

    /// Count the instances of `entity_type` matching `where_clause`
    async fn count(
        &self,
        entity_type: &str,
        where_clause: Option<&WhereClause>,
    ) -> Result<usize, DocLinkError>;

    /// Merge `data` into the existing instance with the given id
    async fn update_attributes(
        &self,
        entity_type: &str,
        id: &serde_json::Value,
        data: Document,
    ) -> Result<Document, DocLinkError>;

    /// Update the instance named by `data.id`, or create it if it does not exist
    async fn upsert(&self, entity_type: &str, data: Document) -> Result<Document, DocLinkError>;

    /// Delete every matching instance
    async fn delete_all(
        &self,
        entity_type: &str,
        where_clause: Option<&WhereClause>,
    ) -> Result<usize, DocLinkError>;

    /// Apply `data` to every matching instance
    async fn update_all(
        &self,
        entity_type: &str,
        where_clause: Option<&WhereClause>,
        data: Document,
    ) -> Result<usize, DocLinkError>;

    /// Capability tags for framework introspection
    fn supported_types(&self) -> &'static [Capability];

    /// Type of the `id` property the store expects
    fn default_id_type(&self) -> Primitive;

    /// Get the connector type name
    fn connector_type(&self) -> &'static str;
}
