//! Connector runtime for Doclink
//!
//! This crate provides the document store client seam, connection
//! resolution and the document database connector.

pub mod client;
pub mod connectors;
pub mod resolver;

pub use client::{DocumentClient, MemoryDocumentClient};
pub use connectors::{DataConnector, DocumentDbConnector};
pub use resolver::ResolvedHandles;
