//! Data connectors for Doclink
//!
//! [`DataConnector`] is the verb set a data access framework drives;
//! [`DocumentDbConnector`] implements it against a [`DocumentClient`](crate::client::DocumentClient).

mod documentdb;
mod traits;

pub use documentdb::DocumentDbConnector;
pub use traits::DataConnector;
