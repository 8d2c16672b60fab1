//! Error types for Doclink

use std::fmt;
use thiserror::Error;

/// Which lookup came back empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotFoundKind {
    /// Configured database id is unknown to the store
    Database,
    /// Configured collection id is unknown under the resolved database
    Collection,
    /// No document of the requested entity type has the given id
    Model,
}

impl NotFoundKind {
    /// Stable code callers can branch on
    pub fn code(&self) -> &'static str {
        match self {
            NotFoundKind::Database => "DATABASE_NOT_FOUND",
            NotFoundKind::Collection => "COLLECTION_NOT_FOUND",
            NotFoundKind::Model => "MODEL_NOT_FOUND",
        }
    }
}

impl fmt::Display for NotFoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Main error type for Doclink operations
#[derive(Error, Debug)]
pub enum DocLinkError {
    /// Configuration file parsing error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Error reported by the document store client, passed through untouched
    #[error("Store error ({status}): {message}")]
    Store {
        /// Status reported by the store (HTTP-style)
        status: u16,
        /// Message reported by the store
        message: String,
    },

    /// A lookup returned zero results where one was required
    #[error("{kind}: {message}")]
    NotFound {
        /// What was being looked up
        kind: NotFoundKind,
        /// Human-readable description
        message: String,
    },

    /// Verb deliberately not supported by this connector
    #[error("Operation not implemented: {0}")]
    NotImplemented(&'static str),

    /// Verb invoked before `connect` resolved the database and collection
    #[error("Connector is not connected; call connect() first")]
    NotConnected,

    /// Filter uses a construct the query builder cannot express
    #[error("Unsupported filter: {0}")]
    UnsupportedFilter(String),

    /// File system error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Environment variable not found
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DocLinkError {
    /// Build a structured not-found condition
    pub fn not_found(kind: NotFoundKind, message: impl Into<String>) -> Self {
        DocLinkError::NotFound {
            kind,
            message: message.into(),
        }
    }

    /// Build a store error with the given status
    pub fn store(status: u16, message: impl Into<String>) -> Self {
        DocLinkError::Store {
            status,
            message: message.into(),
        }
    }

    /// Returns true for the structured not-found condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, DocLinkError::NotFound { .. })
    }

    /// Returns the not-found code, if this is a not-found condition
    pub fn not_found_code(&self) -> Option<&'static str> {
        match self {
            DocLinkError::NotFound { kind, .. } => Some(kind.code()),
            _ => None,
        }
    }

    /// Returns true if this error should be logged at error level
    pub fn is_error(&self) -> bool {
        match self {
            DocLinkError::Store { status, .. } => *status >= 500,
            DocLinkError::Io(_) | DocLinkError::Internal(_) => true,
            _ => false,
        }
    }

    /// Returns true if this error was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    /// Returns the HTTP-style status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            DocLinkError::Store { status, .. } => *status,
            DocLinkError::NotFound { .. } => 404,
            DocLinkError::NotImplemented(_) => 501,
            DocLinkError::NotConnected => 503,
            DocLinkError::Validation(_) | DocLinkError::UnsupportedFilter(_) => 400,
            _ => 500,
        }
    }

    /// Sanitize the error message to avoid leaking sensitive information
    pub fn sanitized_message(&self) -> String {
        match self {
            // Store and config messages may echo hosts or keys
            DocLinkError::Store { status, .. } => format!("Document store error ({})", status),
            DocLinkError::Config(_) | DocLinkError::EnvVarNotFound(_) => {
                "Configuration error".to_string()
            }

            DocLinkError::Internal(_) => "Internal server error".to_string(),

            _ => self.to_string(),
        }
    }
}

/// Result type alias using DocLinkError
pub type Result<T> = std::result::Result<T, DocLinkError>;
