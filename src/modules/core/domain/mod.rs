//! Domain models for Doclink

mod datasource;
mod filter;
mod query;
mod settings;

pub use datasource::{ConnectorKind, DataSource};
pub use filter::{Filter, WhereClause};
pub use query::{build_query, lookup_by_id, BASE_QUERY};
pub use settings::Settings;
