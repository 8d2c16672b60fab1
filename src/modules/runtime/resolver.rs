//! Connection resolution
//!
//! Maps the configured database and collection ids onto the store's
//! `_self` links, which every later client call is addressed by.

use doclink_core::{lookup_by_id, DocLinkError, NotFoundKind, Result};
use doclink_types::{self_link, Document};
use tracing::{debug, warn};

use crate::client::{collect, DocumentClient};

/// Store links resolved once per connector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHandles {
    /// `_self` link of the database
    pub database: String,
    /// `_self` link of the collection
    pub collection: String,
}

/// Resolve `database_id`, then `collection_id` under it.
///
/// Client errors pass through unchanged; an empty lookup becomes a
/// [`DocLinkError::NotFound`] naming the missing resource.
pub async fn resolve(
    client: &dyn DocumentClient,
    database_id: &str,
    collection_id: &str,
) -> Result<ResolvedHandles> {
    let database = find_database(client, database_id)
        .await?
        .ok_or_else(|| {
            warn!(database_id, "cannot find database");
            DocLinkError::not_found(
                NotFoundKind::Database,
                format!("Unknown \"database\" id \"{}\".", database_id),
            )
        })?;
    let database = link(&database, "database")?;
    debug!(database_id, link = %database, "resolved database");

    let collection = find_collection(client, &database, collection_id)
        .await?
        .ok_or_else(|| {
            warn!(collection_id, "cannot find collection");
            DocLinkError::not_found(
                NotFoundKind::Collection,
                format!("Unknown \"collection\" id \"{}\".", collection_id),
            )
        })?;
    let collection = link(&collection, "collection")?;
    debug!(collection_id, link = %collection, "resolved collection");

    Ok(ResolvedHandles {
        database,
        collection,
    })
}

/// First database whose id is `database_id`, if any
pub async fn find_database(
    client: &dyn DocumentClient,
    database_id: &str,
) -> Result<Option<Document>> {
    let results = collect(client.query_databases(lookup_by_id(database_id))).await?;
    Ok(results.into_iter().next())
}

/// First collection under `database_link` whose id is `collection_id`, if any
pub async fn find_collection(
    client: &dyn DocumentClient,
    database_link: &str,
    collection_id: &str,
) -> Result<Option<Document>> {
    let results =
        collect(client.query_collections(database_link, lookup_by_id(collection_id))).await?;
    Ok(results.into_iter().next())
}

fn link(resource: &Document, what: &str) -> Result<String> {
    self_link(resource).map(str::to_owned).ok_or_else(|| {
        DocLinkError::Internal(format!("store returned a {} without a _self link", what))
    })
}
