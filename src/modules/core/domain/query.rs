//! Query builder
//!
//! Turns an entity type and an equality [`Filter`] into a parameterized
//! [`QuerySpec`]. Everything here is pure: no I/O, no logging.

use doclink_types::{fields, QueryParameter, QuerySpec};
use once_cell::sync::Lazy;
use regex::Regex;

use super::Filter;
use crate::error::{DocLinkError, Result};

/// Query text every builder output starts with
pub const BASE_QUERY: &str = "SELECT * FROM root r";

/// Field names are spliced into the query text, so only plain identifiers pass
static FIELD_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

/// Filter combinators the framework may send at the top of a where clause
const LOGICAL_KEYS: &[&str] = &["and", "or", "nor"];

/// Comparison operators the framework nests inside a field value
const OPERATOR_KEYS: &[&str] = &[
    "gt", "gte", "lt", "lte", "between", "inq", "nin", "neq", "like", "nlike", "ilike",
    "nilike", "regexp", "near", "exists",
];

/// Build the query selecting documents of `entity_type` matching `filter`.
///
/// The first predicate is always `r.type = @type`; each where-clause key
/// follows in the order the caller listed it. Non-equality constructs are
/// rejected with [`DocLinkError::UnsupportedFilter`].
pub fn build_query(entity_type: &str, filter: Option<&Filter>) -> Result<QuerySpec> {
    let mut predicates = vec![format!("r.{0} = @{0}", fields::TYPE)];
    let mut parameters = vec![QueryParameter::for_field(
        fields::TYPE,
        serde_json::Value::String(entity_type.to_string()),
    )];

    if let Some(filter) = filter {
        for (field, value) in filter.predicates() {
            check_predicate(field, value)?;
            predicates.push(format!("r.{0} = @{0}", field));
            parameters.push(QueryParameter::for_field(field, value.clone()));
        }
    }

    Ok(QuerySpec {
        query: format!("{} WHERE {}", BASE_QUERY, predicates.join(" AND ")),
        parameters,
    })
}

/// Build the lookup used to resolve a database or collection by its id
pub fn lookup_by_id(id: &str) -> QuerySpec {
    QuerySpec {
        query: format!("{0} WHERE r.{1} = @{1}", BASE_QUERY, fields::ID),
        parameters: vec![QueryParameter::for_field(
            fields::ID,
            serde_json::Value::String(id.to_string()),
        )],
    }
}

fn check_predicate(field: &str, value: &serde_json::Value) -> Result<()> {
    if LOGICAL_KEYS.contains(&field) {
        return Err(DocLinkError::UnsupportedFilter(format!(
            "logical combinator '{}' is not supported; only equality predicates are",
            field
        )));
    }

    if !FIELD_PATTERN.is_match(field) {
        return Err(DocLinkError::UnsupportedFilter(format!(
            "invalid field name '{}'",
            field
        )));
    }

    if field == fields::TYPE {
        return Err(DocLinkError::UnsupportedFilter(format!(
            "'{}' is reserved for the entity type",
            fields::TYPE
        )));
    }

    if let Some(object) = value.as_object() {
        if let Some(op) = object.keys().find(|k| OPERATOR_KEYS.contains(&k.as_str())) {
            return Err(DocLinkError::UnsupportedFilter(format!(
                "operator '{}' on field '{}' is not supported; only equality predicates are",
                op, field
            )));
        }
    }

    Ok(())
}
