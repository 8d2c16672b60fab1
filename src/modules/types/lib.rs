//! Type definitions for Doclink
//!
//! This crate contains the wire-level value types shared across the Doclink
//! workspace: documents, query specs, the connector capability set and the
//! primitive id-type marker.

pub mod capability;
pub mod document;
pub mod primitive;

pub use capability::Capability;
pub use document::{fields, self_link, Document, QueryParameter, QuerySpec};
pub use primitive::Primitive;
