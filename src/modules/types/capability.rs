//! Connector capability descriptors

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Capability tags a connector advertises to the data access framework
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// Generic database backend
    Db,
    /// Schemaless (non-relational) backend
    Nosql,
    /// Document database speaking the SQL-like document query API
    Documentdb,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Db => write!(f, "db"),
            Capability::Nosql => write!(f, "nosql"),
            Capability::Documentdb => write!(f, "documentdb"),
        }
    }
}

impl FromStr for Capability {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "db" => Ok(Capability::Db),
            "nosql" => Ok(Capability::Nosql),
            "documentdb" | "docdb" => Ok(Capability::Documentdb),
            _ => Err(format!("Unknown capability: {}", s)),
        }
    }
}

impl Capability {
    /// Returns every capability, in the order connectors report them
    pub fn all() -> &'static [Capability] {
        &[Capability::Db, Capability::Nosql, Capability::Documentdb]
    }
}
