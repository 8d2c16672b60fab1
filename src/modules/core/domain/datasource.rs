//! Data source configuration root

use serde::Deserialize;
use std::fmt;

use super::Settings;

/// Connector implementation a data source is bound to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorKind {
    /// Document database over its SQL-like query API
    #[default]
    #[serde(alias = "docdb")]
    Documentdb,
}

impl fmt::Display for ConnectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectorKind::Documentdb => write!(f, "documentdb"),
        }
    }
}

/// A named data source as written in a configuration file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DataSource {
    /// Unique name for this data source
    pub name: String,

    /// Connector implementation; defaults to `documentdb`
    #[serde(default)]
    pub connector: ConnectorKind,

    /// Connection settings, written inline next to `name`
    #[serde(flatten)]
    pub settings: Settings,
}

impl DataSource {
    /// Create a document-database data source
    pub fn new(name: impl Into<String>, settings: Settings) -> Self {
        Self {
            name: name.into(),
            connector: ConnectorKind::Documentdb,
            settings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_datasource_new() {
        let source = DataSource::new("inventory", Settings::new("https://h", "k", "d", "c"));
        assert_eq!(source.name, "inventory");
        assert_eq!(source.connector, ConnectorKind::Documentdb);
        assert_eq!(source.settings.database_id(), "d");
    }

    #[test]
    fn test_datasource_flattened_settings() {
        let source: DataSource = serde_json::from_str(
            r#"{"name":"inventory","host":"https://h","masterKey":"k","databaseId":"d","collectionId":"c"}"#,
        )
        .unwrap();
        assert_eq!(source.connector, ConnectorKind::Documentdb);
        assert_eq!(source.settings.collection_id(), "c");
    }

    #[test]
    fn test_connector_kind_alias() {
        let source: DataSource = serde_json::from_str(
            r#"{"name":"inventory","connector":"docdb","host":"https://h","masterKey":"k","databaseId":"d","collectionId":"c"}"#,
        )
        .unwrap();
        assert_eq!(source.connector.to_string(), "documentdb");
    }

    #[test]
    fn test_capability_tag_is_not_a_connector() {
        let err = serde_json::from_str::<DataSource>(
            r#"{"name":"inventory","connector":"nosql","host":"https://h","masterKey":"k","databaseId":"d","collectionId":"c"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("nosql"));
    }
}
