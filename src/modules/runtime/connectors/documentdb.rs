//! Document database connector implementation

use async_trait::async_trait;
use doclink_core::{build_query, DocLinkError, Filter, NotFoundKind, Settings, WhereClause};
use doclink_types::{fields, self_link, Capability, Document, Primitive};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use super::traits::DataConnector;
use crate::client::{collect, DocumentClient};
use crate::resolver::{self, ResolvedHandles};

/// Connector translating data access verbs into document-store queries.
///
/// Construct it with immutable [`Settings`] and a client, call
/// [`connect`](DataConnector::connect) once, then share it behind an `Arc`.
pub struct DocumentDbConnector {
    settings: Arc<Settings>,
    client: Arc<dyn DocumentClient>,
    handles: OnceCell<ResolvedHandles>,
}

impl DocumentDbConnector {
    /// Create an unconnected connector
    pub fn new(settings: Arc<Settings>, client: Arc<dyn DocumentClient>) -> Self {
        Self {
            settings,
            client,
            handles: OnceCell::new(),
        }
    }

    /// Settings this connector was built with
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Resolved handles, once `connect` has succeeded
    pub fn handles(&self) -> Option<&ResolvedHandles> {
        self.handles.get()
    }

    /// Returns true once `connect` has succeeded
    pub fn is_connected(&self) -> bool {
        self.handles.initialized()
    }

    fn collection_link(&self) -> Result<&str, DocLinkError> {
        self.handles
            .get()
            .map(|handles| handles.collection.as_str())
            .ok_or(DocLinkError::NotConnected)
    }

    async fn query(
        &self,
        entity_type: &str,
        filter: Option<&Filter>,
    ) -> Result<Vec<Document>, DocLinkError> {
        let collection = self.collection_link()?;
        let query = build_query(entity_type, filter)?;
        debug!(entity_type, query = %query.query, "querying documents");
        collect(self.client.query_documents(collection, query)).await
    }
}

#[async_trait]
impl DataConnector for DocumentDbConnector {
    async fn connect(&self) -> Result<(), DocLinkError> {
        let settings = &self.settings;
        self.handles
            .get_or_try_init(|| async {
                let handles = resolver::resolve(
                    self.client.as_ref(),
                    settings.database_id(),
                    settings.collection_id(),
                )
                .await?;
                info!(
                    host = settings.host(),
                    database = settings.database_id(),
                    collection = settings.collection_id(),
                    "document database connection established"
                );
                Ok::<_, DocLinkError>(handles)
            })
            .await?;
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), DocLinkError> {
        Ok(())
    }

    async fn ping(&self) -> Result<(), DocLinkError> {
        let handles = self.handles.get().ok_or(DocLinkError::NotConnected)?;
        let collection_id = self.settings.collection_id();
        resolver::find_collection(self.client.as_ref(), &handles.database, collection_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| {
                DocLinkError::not_found(
                    NotFoundKind::Collection,
                    format!("Unknown \"collection\" id \"{}\".", collection_id),
                )
            })
    }

    async fn create(
        &self,
        entity_type: &str,
        mut data: Document,
    ) -> Result<Document, DocLinkError> {
        let collection = self.collection_link()?;
        data.insert(
            fields::TYPE.to_string(),
            Value::String(entity_type.to_string()),
        );
        debug!(entity_type, "creating document");
        self.client.create_document(collection, data).await
    }

    async fn find_by_id(
        &self,
        entity_type: &str,
        id: &Value,
    ) -> Result<Vec<Document>, DocLinkError> {
        self.query(entity_type, Some(&Filter::by_id(id.clone())))
            .await
    }

    async fn find_all(
        &self,
        entity_type: &str,
        filter: Option<&Filter>,
    ) -> Result<Vec<Document>, DocLinkError> {
        self.query(entity_type, filter).await
    }

    async fn count(
        &self,
        entity_type: &str,
        where_clause: Option<&WhereClause>,
    ) -> Result<usize, DocLinkError> {
        let filter = Filter::with_where(where_clause.cloned());
        Ok(self.query(entity_type, Some(&filter)).await?.len())
    }

    async fn update_attributes(
        &self,
        entity_type: &str,
        id: &Value,
        data: Document,
    ) -> Result<Document, DocLinkError> {
        let mut document = self
            .find_by_id(entity_type, id)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                DocLinkError::not_found(
                    NotFoundKind::Model,
                    format!("No instance of \"{}\" with id {}", entity_type, id),
                )
            })?;

        // Replace goes through the link of the document as it was read
        let link = self_link(&document).map(str::to_owned).ok_or_else(|| {
            DocLinkError::Internal(format!(
                "{} {} was returned without a _self link",
                entity_type, id
            ))
        })?;

        document.extend(data);
        document.insert(
            fields::TYPE.to_string(),
            Value::String(entity_type.to_string()),
        );

        debug!(entity_type, %link, "replacing document");
        self.client.replace_document(&link, document).await
    }

    async fn upsert(&self, entity_type: &str, data: Document) -> Result<Document, DocLinkError> {
        let id = match data.get(fields::ID) {
            Some(id) if !id.is_null() => id.clone(),
            _ => return self.create(entity_type, data).await,
        };

        match self.update_attributes(entity_type, &id, data.clone()).await {
            Err(DocLinkError::NotFound {
                kind: NotFoundKind::Model,
                ..
            }) => {
                debug!(entity_type, %id, "no existing instance, creating");
                self.create(entity_type, data).await
            }
            other => other,
        }
    }

    async fn delete_all(
        &self,
        _entity_type: &str,
        _where_clause: Option<&WhereClause>,
    ) -> Result<usize, DocLinkError> {
        Err(DocLinkError::NotImplemented("destroyAll"))
    }

    async fn update_all(
        &self,
        _entity_type: &str,
        _where_clause: Option<&WhereClause>,
        _data: Document,
    ) -> Result<usize, DocLinkError> {
        Err(DocLinkError::NotImplemented("update"))
    }

    fn supported_types(&self) -> &'static [Capability] {
        Capability::all()
    }

    fn default_id_type(&self) -> Primitive {
        Primitive::String
    }

    fn connector_type(&self) -> &'static str {
        "documentdb"
    }
}
