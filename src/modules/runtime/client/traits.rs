//! Document store client capability

use async_trait::async_trait;
use doclink_core::DocLinkError;
use doclink_types::{Document, QuerySpec};
use futures::stream::BoxStream;
use futures::TryStreamExt;

/// Lazily evaluated query results; yields an error item if the query fails
pub type DocumentStream = BoxStream<'static, Result<Document, DocLinkError>>;

/// Capabilities the connector needs from a document store client.
///
/// Links are the store's `_self` links. Errors are reported as
/// [`DocLinkError::Store`] and are passed through by the connector as-is.
#[async_trait]
pub trait DocumentClient: Send + Sync {
    /// Insert a document into a collection and return the stored document
    async fn create_document(
        &self,
        collection_link: &str,
        document: Document,
    ) -> Result<Document, DocLinkError>;

    /// Run a query against the documents of a collection
    fn query_documents(&self, collection_link: &str, query: QuerySpec) -> DocumentStream;

    /// Replace the document at `document_link` and return the stored result
    async fn replace_document(
        &self,
        document_link: &str,
        document: Document,
    ) -> Result<Document, DocLinkError>;

    /// Run a query against the account's databases
    fn query_databases(&self, query: QuerySpec) -> DocumentStream;

    /// Run a query against the collections of a database
    fn query_collections(&self, database_link: &str, query: QuerySpec) -> DocumentStream;
}

/// Drain a query stream into a vector, stopping at the first error
pub async fn collect(stream: DocumentStream) -> Result<Vec<Document>, DocLinkError> {
    stream.try_collect().await
}
