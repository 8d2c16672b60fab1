//! Core domain logic for Doclink
//!
//! This crate contains the connector settings, the filter model, the pure
//! query builder and the error taxonomy shared by every Doclink crate.

pub mod domain;
pub mod error;

pub use domain::*;
pub use error::{DocLinkError, NotFoundKind, Result};
