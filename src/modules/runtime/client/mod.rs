//! Document store clients
//!
//! The connector talks to the store only through [`DocumentClient`]. The
//! HTTP client for a hosted account implements it outside this crate;
//! [`MemoryDocumentClient`] is the in-process implementation.

mod memory;
mod traits;

pub use memory::{MemoryDocumentClient, Operation};
pub use traits::{collect, DocumentClient, DocumentStream};
