//! In-memory document store client
//!
//! Keeps databases, collections and documents in process memory and
//! understands the equality-only query grammar the query builder emits.
//! Useful for tests and local development; every call is counted and a
//! one-shot failure can be injected per operation.

use async_trait::async_trait;
use doclink_core::{DocLinkError, BASE_QUERY};
use doclink_types::{fields, self_link, Document, Primitive, QuerySpec};
use futures::stream::{self, StreamExt, TryStreamExt};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::trace;
use uuid::Uuid;

use super::traits::{DocumentClient, DocumentStream};

/// `r.<field> = @<param>`
static PREDICATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^r\.([A-Za-z_][A-Za-z0-9_]*)\s*=\s*(@[A-Za-z_][A-Za-z0-9_]*)$").unwrap()
});

/// Client operations, for call counting and failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateDocument,
    QueryDocuments,
    ReplaceDocument,
    QueryDatabases,
    QueryCollections,
}

impl Operation {
    const COUNT: usize = 5;

    fn index(self) -> usize {
        self as usize
    }
}

/// In-memory [`DocumentClient`]. Clones share the same store.
#[derive(Clone, Default)]
pub struct MemoryDocumentClient {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    state: RwLock<State>,
    calls: [AtomicUsize; Operation::COUNT],
}

#[derive(Default)]
struct State {
    databases: Vec<DatabaseEntry>,
    failures: HashMap<Operation, (u16, String)>,
}

struct DatabaseEntry {
    resource: Document,
    collections: Vec<CollectionEntry>,
}

struct CollectionEntry {
    resource: Document,
    documents: Vec<Document>,
}

impl MemoryDocumentClient {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a database resource
    pub async fn create_database(&self, id: &str) -> Result<Document, DocLinkError> {
        let mut state = self.inner.state.write().await;
        if state.databases.iter().any(|db| has_id(&db.resource, id)) {
            return Err(conflict());
        }

        let rid = new_rid();
        let resource = new_resource(id, &rid, format!("dbs/{}/", rid));
        state.databases.push(DatabaseEntry {
            resource: resource.clone(),
            collections: Vec::new(),
        });
        Ok(resource)
    }

    /// Create a collection resource under the database at `database_link`
    pub async fn create_collection(
        &self,
        database_link: &str,
        id: &str,
    ) -> Result<Document, DocLinkError> {
        let mut state = self.inner.state.write().await;
        let database = state.database_mut(database_link)?;
        if database.collections.iter().any(|c| has_id(&c.resource, id)) {
            return Err(conflict());
        }

        let rid = new_rid();
        let resource = new_resource(id, &rid, format!("{}colls/{}/", database_link, rid));
        database.collections.push(CollectionEntry {
            resource: resource.clone(),
            documents: Vec::new(),
        });
        Ok(resource)
    }

    /// Create the database and collection if missing; returns the collection link
    pub async fn ensure_collection(
        &self,
        database_id: &str,
        collection_id: &str,
    ) -> Result<String, DocLinkError> {
        let database = match self.find_database(database_id).await {
            Some(database) => database,
            None => self.create_database(database_id).await?,
        };
        let database_link = link_of(&database);

        let existing = {
            let state = self.inner.state.read().await;
            state
                .database(&database_link)?
                .collections
                .iter()
                .find(|c| has_id(&c.resource, collection_id))
                .map(|c| link_of(&c.resource))
        };
        match existing {
            Some(link) => Ok(link),
            None => Ok(link_of(
                &self.create_collection(&database_link, collection_id).await?,
            )),
        }
    }

    /// Snapshot of the documents stored in a collection
    pub async fn documents(&self, collection_link: &str) -> Result<Vec<Document>, DocLinkError> {
        let state = self.inner.state.read().await;
        Ok(state.collection(collection_link)?.documents.clone())
    }

    /// Make the next call of `operation` fail with a store error
    pub async fn fail_next(&self, operation: Operation, status: u16, message: impl Into<String>) {
        let mut state = self.inner.state.write().await;
        state.failures.insert(operation, (status, message.into()));
    }

    /// Number of times `operation` has been invoked
    pub fn calls(&self, operation: Operation) -> usize {
        self.inner.calls[operation.index()].load(Ordering::SeqCst)
    }

    async fn find_database(&self, id: &str) -> Option<Document> {
        let state = self.inner.state.read().await;
        state
            .databases
            .iter()
            .find(|db| has_id(&db.resource, id))
            .map(|db| db.resource.clone())
    }

    fn record(&self, operation: Operation) {
        trace!(?operation, "memory client call");
        self.inner.calls[operation.index()].fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentClient for MemoryDocumentClient {
    async fn create_document(
        &self,
        collection_link: &str,
        mut document: Document,
    ) -> Result<Document, DocLinkError> {
        self.record(Operation::CreateDocument);
        let mut state = self.inner.state.write().await;
        state.take_failure(Operation::CreateDocument)?;
        let collection = state.collection_mut(collection_link)?;

        let id = match document.get(fields::ID) {
            None | Some(Value::Null) => Value::String(Uuid::new_v4().to_string()),
            Some(id) if Primitive::of(id).is_some() => id.clone(),
            Some(_) => {
                return Err(DocLinkError::store(
                    400,
                    "The input content is invalid because 'id' must be a string or a number",
                ))
            }
        };
        if collection
            .documents
            .iter()
            .any(|d| d.get(fields::ID).is_some_and(|v| same_value(v, &id)))
        {
            return Err(conflict());
        }

        let rid = new_rid();
        document.insert(fields::ID.to_string(), id);
        document.insert(fields::RID.to_string(), Value::String(rid.clone()));
        document.insert(
            fields::SELF_LINK.to_string(),
            Value::String(format!("{}docs/{}/", collection_link, rid)),
        );
        stamp(&mut document);

        collection.documents.push(document.clone());
        Ok(document)
    }

    fn query_documents(&self, collection_link: &str, query: QuerySpec) -> DocumentStream {
        self.record(Operation::QueryDocuments);
        let inner = self.inner.clone();
        let collection_link = collection_link.to_string();
        into_stream(async move {
            let mut state = inner.state.write().await;
            state.take_failure(Operation::QueryDocuments)?;
            let collection = state.collection(&collection_link)?;
            evaluate(&query, &collection.documents)
        })
    }

    async fn replace_document(
        &self,
        document_link: &str,
        mut document: Document,
    ) -> Result<Document, DocLinkError> {
        self.record(Operation::ReplaceDocument);
        let mut state = self.inner.state.write().await;
        state.take_failure(Operation::ReplaceDocument)?;

        for collection in state
            .databases
            .iter_mut()
            .flat_map(|db| db.collections.iter_mut())
        {
            let Some(position) = collection
                .documents
                .iter()
                .position(|d| self_link(d) == Some(document_link))
            else {
                continue;
            };

            let id = document.get(fields::ID).cloned().unwrap_or(Value::Null);
            if Primitive::of(&id).is_none() {
                return Err(DocLinkError::store(
                    400,
                    "The input content is invalid because 'id' must be a string or a number",
                ));
            }
            let clash = collection
                .documents
                .iter()
                .enumerate()
                .any(|(i, d)| {
                    i != position && d.get(fields::ID).is_some_and(|v| same_value(v, &id))
                });
            if clash {
                return Err(conflict());
            }

            let previous = &collection.documents[position];
            for field in [fields::RID, fields::SELF_LINK] {
                if let Some(value) = previous.get(field) {
                    document.insert(field.to_string(), value.clone());
                }
            }
            stamp(&mut document);

            collection.documents[position] = document.clone();
            return Ok(document);
        }

        Err(DocLinkError::store(
            404,
            format!("Resource '{}' does not exist", document_link),
        ))
    }

    fn query_databases(&self, query: QuerySpec) -> DocumentStream {
        self.record(Operation::QueryDatabases);
        let inner = self.inner.clone();
        into_stream(async move {
            let mut state = inner.state.write().await;
            state.take_failure(Operation::QueryDatabases)?;
            evaluate(&query, state.databases.iter().map(|db| &db.resource))
        })
    }

    fn query_collections(&self, database_link: &str, query: QuerySpec) -> DocumentStream {
        self.record(Operation::QueryCollections);
        let inner = self.inner.clone();
        let database_link = database_link.to_string();
        into_stream(async move {
            let mut state = inner.state.write().await;
            state.take_failure(Operation::QueryCollections)?;
            let database = state.database(&database_link)?;
            evaluate(&query, database.collections.iter().map(|c| &c.resource))
        })
    }
}

impl State {
    fn take_failure(&mut self, operation: Operation) -> Result<(), DocLinkError> {
        match self.failures.remove(&operation) {
            Some((status, message)) => Err(DocLinkError::store(status, message)),
            None => Ok(()),
        }
    }

    fn database(&self, link: &str) -> Result<&DatabaseEntry, DocLinkError> {
        self.databases
            .iter()
            .find(|db| self_link(&db.resource) == Some(link))
            .ok_or_else(|| missing_link(link))
    }

    fn database_mut(&mut self, link: &str) -> Result<&mut DatabaseEntry, DocLinkError> {
        self.databases
            .iter_mut()
            .find(|db| self_link(&db.resource) == Some(link))
            .ok_or_else(|| missing_link(link))
    }

    fn collection(&self, link: &str) -> Result<&CollectionEntry, DocLinkError> {
        self.databases
            .iter()
            .flat_map(|db| db.collections.iter())
            .find(|c| self_link(&c.resource) == Some(link))
            .ok_or_else(|| missing_link(link))
    }

    fn collection_mut(&mut self, link: &str) -> Result<&mut CollectionEntry, DocLinkError> {
        self.databases
            .iter_mut()
            .flat_map(|db| db.collections.iter_mut())
            .find(|c| self_link(&c.resource) == Some(link))
            .ok_or_else(|| missing_link(link))
    }
}

fn into_stream<F>(query: F) -> DocumentStream
where
    F: Future<Output = Result<Vec<Document>, DocLinkError>> + Send + 'static,
{
    stream::once(query)
        .map_ok(|docs| stream::iter(docs.into_iter().map(Ok::<Document, DocLinkError>)))
        .try_flatten()
        .boxed()
}

/// Apply the query's equality predicates to `candidates`
fn evaluate<'a>(
    query: &QuerySpec,
    candidates: impl IntoIterator<Item = &'a Document>,
) -> Result<Vec<Document>, DocLinkError> {
    let predicates = parse_predicates(query)?;
    Ok(candidates
        .into_iter()
        .filter(|doc| {
            predicates
                .iter()
                .all(|(field, value)| doc.get(*field).is_some_and(|v| same_value(v, value)))
        })
        .cloned()
        .collect())
}

fn parse_predicates(query: &QuerySpec) -> Result<Vec<(&str, &Value)>, DocLinkError> {
    let rest = query
        .query
        .strip_prefix(BASE_QUERY)
        .ok_or_else(|| syntax_error(&query.query))?
        .trim();
    if rest.is_empty() {
        return Ok(Vec::new());
    }

    let clause = rest
        .strip_prefix("WHERE")
        .ok_or_else(|| syntax_error(rest))?;

    let mut predicates = Vec::new();
    for predicate in clause.split(" AND ") {
        let caps = PREDICATE_PATTERN
            .captures(predicate.trim())
            .ok_or_else(|| syntax_error(predicate))?;
        let field = caps.get(1).map_or("", |m| m.as_str());
        let name = caps.get(2).map_or("", |m| m.as_str());
        let value = query.parameter(name).ok_or_else(|| {
            DocLinkError::store(400, format!("Parameter '{}' is not bound", name))
        })?;
        predicates.push((field, value));
    }
    Ok(predicates)
}

/// Store equality: numbers compare by value, so `42` matches `42.0`
fn same_value(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(l), Value::Number(r)) => l.as_f64() == r.as_f64(),
        _ => left == right,
    }
}

fn has_id(resource: &Document, id: &str) -> bool {
    resource.get(fields::ID).and_then(Value::as_str) == Some(id)
}

fn link_of(resource: &Document) -> String {
    self_link(resource).unwrap_or_default().to_string()
}

fn new_rid() -> String {
    Uuid::new_v4().simple().to_string()
}

fn new_resource(id: &str, rid: &str, link: String) -> Document {
    let mut resource = Document::new();
    resource.insert(fields::ID.to_string(), Value::String(id.to_string()));
    resource.insert(fields::RID.to_string(), Value::String(rid.to_string()));
    resource.insert(fields::SELF_LINK.to_string(), Value::String(link));
    stamp(&mut resource);
    resource
}

fn stamp(resource: &mut Document) {
    resource.insert(
        fields::ETAG.to_string(),
        Value::String(format!("\"{}\"", Uuid::new_v4())),
    );
    resource.insert(
        fields::TS.to_string(),
        Value::from(chrono::Utc::now().timestamp()),
    );
}

fn conflict() -> DocLinkError {
    DocLinkError::store(409, "Entity with the specified id already exists in the system.")
}

fn missing_link(link: &str) -> DocLinkError {
    DocLinkError::store(404, format!("Resource '{}' does not exist", link))
}

fn syntax_error(near: &str) -> DocLinkError {
    DocLinkError::store(400, format!("Syntax error near '{}'", near.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::collect;
    use doclink_core::{build_query, lookup_by_id, Filter};
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_ensure_collection_is_idempotent() {
        let client = MemoryDocumentClient::new();
        let first = client.ensure_collection("db", "coll").await.unwrap();
        let second = client.ensure_collection("db", "coll").await.unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with("dbs/"));
        assert!(first.contains("/colls/"));
    }

    #[tokio::test]
    async fn test_create_assigns_metadata() {
        let client = MemoryDocumentClient::new();
        let link = client.ensure_collection("db", "coll").await.unwrap();

        let created = client
            .create_document(&link, doc(json!({"id": "a", "x": 1})))
            .await
            .unwrap();
        assert_eq!(created.get("x"), Some(&json!(1)));
        assert!(self_link(&created).unwrap().starts_with(&format!("{}docs/", link)));
        assert!(created.contains_key(fields::RID));
        assert!(created.contains_key(fields::ETAG));
        assert!(created.contains_key(fields::TS));
        assert_eq!(client.documents(&link).await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn test_create_generates_missing_id() {
        let client = MemoryDocumentClient::new();
        let link = client.ensure_collection("db", "coll").await.unwrap();
        let created = client.create_document(&link, doc(json!({"x": 1}))).await.unwrap();
        assert!(Primitive::Uuid.validate(created.get("id").unwrap()));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_id() {
        let client = MemoryDocumentClient::new();
        let link = client.ensure_collection("db", "coll").await.unwrap();
        client.create_document(&link, doc(json!({"id": 1}))).await.unwrap();
        let err = client.create_document(&link, doc(json!({"id": 1}))).await.unwrap_err();
        assert_eq!(err.status_code(), 409);
    }

    #[tokio::test]
    async fn test_create_in_unknown_collection() {
        let client = MemoryDocumentClient::new();
        let err = client
            .create_document("dbs/x/colls/y/", doc(json!({"id": 1})))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_query_documents_with_builder_output() {
        let client = MemoryDocumentClient::new();
        let link = client.ensure_collection("db", "coll").await.unwrap();
        for body in [
            json!({"id": "1", "type": "Widget", "color": "red"}),
            json!({"id": "2", "type": "Widget", "color": "blue"}),
            json!({"id": "3", "type": "Gadget", "color": "red"}),
        ] {
            client.create_document(&link, doc(body)).await.unwrap();
        }

        let all_widgets = build_query("Widget", None).unwrap();
        let docs = collect(client.query_documents(&link, all_widgets)).await.unwrap();
        assert_eq!(docs.len(), 2);

        let filter = Filter::new().eq("color", json!("red"));
        let red_widgets = build_query("Widget", Some(&filter)).unwrap();
        let docs = collect(client.query_documents(&link, red_widgets)).await.unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].get("id"), Some(&json!("1")));
    }

    #[tokio::test]
    async fn test_query_matches_numbers_by_value() {
        let client = MemoryDocumentClient::new();
        let link = client.ensure_collection("db", "coll").await.unwrap();
        client
            .create_document(&link, doc(json!({"id": 42, "type": "Widget"})))
            .await
            .unwrap();

        let query = build_query("Widget", Some(&Filter::by_id(json!(42.0)))).unwrap();
        let docs = collect(client.query_documents(&link, query)).await.unwrap();
        assert_eq!(docs.len(), 1);

        let err = client
            .create_document(&link, doc(json!({"id": 42.0})))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 409);
    }

    #[tokio::test]
    async fn test_query_rejects_unknown_grammar() {
        let client = MemoryDocumentClient::new();
        let link = client.ensure_collection("db", "coll").await.unwrap();
        let query = QuerySpec {
            query: "SELECT * FROM root r WHERE r.age > @age".to_string(),
            parameters: vec![],
        };
        let err = collect(client.query_documents(&link, query)).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[tokio::test]
    async fn test_query_databases_and_collections() {
        let client = MemoryDocumentClient::new();
        let coll_link = client.ensure_collection("MyDbId", "MyCollId").await.unwrap();

        let dbs = collect(client.query_databases(lookup_by_id("MyDbId"))).await.unwrap();
        assert_eq!(dbs.len(), 1);
        let db_link = link_of(&dbs[0]);

        let colls = collect(client.query_collections(&db_link, lookup_by_id("MyCollId")))
            .await
            .unwrap();
        assert_eq!(colls.len(), 1);
        assert_eq!(link_of(&colls[0]), coll_link);

        let none = collect(client.query_databases(lookup_by_id("Other"))).await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_replace_document() {
        let client = MemoryDocumentClient::new();
        let link = client.ensure_collection("db", "coll").await.unwrap();
        let created = client
            .create_document(&link, doc(json!({"id": "a", "x": 1})))
            .await
            .unwrap();
        let doc_link = self_link(&created).unwrap().to_string();

        let replaced = client
            .replace_document(&doc_link, doc(json!({"id": "a", "x": 2})))
            .await
            .unwrap();
        assert_eq!(replaced.get("x"), Some(&json!(2)));
        assert_eq!(self_link(&replaced), Some(doc_link.as_str()));
        assert_eq!(client.documents(&link).await.unwrap(), vec![replaced]);

        let err = client
            .replace_document("dbs/x/colls/y/docs/z/", doc(json!({"id": "a"})))
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_fail_next_is_one_shot_and_calls_are_counted() {
        let client = MemoryDocumentClient::new();
        let link = client.ensure_collection("db", "coll").await.unwrap();
        client.fail_next(Operation::QueryDocuments, 503, "unavailable").await;

        let query = build_query("Widget", None).unwrap();
        let err = collect(client.query_documents(&link, query.clone())).await.unwrap_err();
        assert_eq!(err.status_code(), 503);
        assert!(collect(client.query_documents(&link, query)).await.is_ok());

        assert_eq!(client.calls(Operation::QueryDocuments), 2);
        assert_eq!(client.calls(Operation::CreateDocument), 0);
    }
}
