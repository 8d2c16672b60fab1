//! Primitive type markers for document ids

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Scalar types a document id may take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    /// String type
    String,
    /// Integer type (i64/u64)
    Int,
    /// Floating point type (f64)
    Float,
    /// UUID rendered as a string
    Uuid,
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Primitive::String => write!(f, "string"),
            Primitive::Int => write!(f, "int"),
            Primitive::Float => write!(f, "float"),
            Primitive::Uuid => write!(f, "uuid"),
        }
    }
}

impl FromStr for Primitive {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "string" | "str" => Ok(Primitive::String),
            "int" | "integer" | "i64" => Ok(Primitive::Int),
            "float" | "f64" | "double" => Ok(Primitive::Float),
            "uuid" => Ok(Primitive::Uuid),
            _ => Err(format!("Unknown primitive type: {}", s)),
        }
    }
}

impl Primitive {
    /// Returns all supported primitive types
    pub fn all() -> &'static [Primitive] {
        &[
            Primitive::String,
            Primitive::Int,
            Primitive::Float,
            Primitive::Uuid,
        ]
    }

    /// Returns the first primitive type the value satisfies, if any
    pub fn of(value: &serde_json::Value) -> Option<Primitive> {
        Self::all().iter().copied().find(|p| p.validate(value))
    }

    /// Validates a JSON value against this primitive type
    pub fn validate(&self, value: &serde_json::Value) -> bool {
        match self {
            Primitive::String => value.is_string(),
            Primitive::Int => value.is_i64() || value.is_u64(),
            Primitive::Float => value.is_f64() || value.is_i64() || value.is_u64(),
            Primitive::Uuid => value
                .as_str()
                .map(|s| uuid::Uuid::parse_str(s).is_ok())
                .unwrap_or(false),
        }
    }
}
