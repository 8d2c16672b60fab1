//! YAML data source parser

use doclink_core::{DataSource, DocLinkError};

use crate::env::EnvSubstitutor;

/// Parser for data source files.
///
/// YAML is a superset of JSON, so `datasources.json`-style files parse too.
pub struct YamlParser;

impl YamlParser {
    /// Parse a YAML string into a DataSource, substituting `{{ env.VAR }}` first
    pub fn parse(content: &str) -> Result<DataSource, DocLinkError> {
        let substituted = EnvSubstitutor::new().substitute(content)?;
        Self::parse_raw(&substituted)
    }

    /// Parse a YAML string without environment variable substitution
    pub fn parse_raw(content: &str) -> Result<DataSource, DocLinkError> {
        serde_yaml::from_str::<DataSource>(content)
            .map_err(|e| DocLinkError::Config(format!("YAML parse error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doclink_core::ConnectorKind;

    #[test]
    fn test_parse_camel_case_config() {
        let yaml = r#"
name: inventory
connector: documentdb
host: "https://inventory.documents.example.com:443/"
masterKey: MyKey
databaseId: MyDbId
collectionId: MyCollId
"#;
        let source = YamlParser::parse_raw(yaml).unwrap();
        assert_eq!(source.name, "inventory");
        assert_eq!(source.connector, ConnectorKind::Documentdb);
        assert_eq!(source.settings.host(), "https://inventory.documents.example.com:443/");
        assert_eq!(source.settings.master_key(), "MyKey");
        assert_eq!(source.settings.database_id(), "MyDbId");
        assert_eq!(source.settings.collection_id(), "MyCollId");
    }

    #[test]
    fn test_parse_snake_case_config_defaults_connector() {
        let yaml = r#"
name: inventory
host: "https://h"
master_key: k
database_id: d
collection_id: c
"#;
        let source = YamlParser::parse_raw(yaml).unwrap();
        assert_eq!(source.connector, ConnectorKind::Documentdb);
        assert_eq!(source.settings.collection_id(), "c");
    }

    #[test]
    fn test_parse_rejects_capability_tag_as_connector() {
        let yaml = r#"
name: inventory
connector: nosql
host: "https://h"
masterKey: k
databaseId: d
collectionId: c
"#;
        let err = YamlParser::parse_raw(yaml).unwrap_err();
        assert!(matches!(err, DocLinkError::Config(_)));
        assert!(err.to_string().contains("unknown variant `nosql`"));
    }

    #[test]
    fn test_parse_json_datasource() {
        let json = r#"{"name": "inventory", "connector": "documentdb", "host": "https://h",
            "masterKey": "k", "databaseId": "d", "collectionId": "c"}"#;
        let source = YamlParser::parse_raw(json).unwrap();
        assert_eq!(source.settings.database_id(), "d");
    }

    #[test]
    fn test_parse_substitutes_env() {
        std::env::set_var("DOCLINK_TEST_YAML_KEY", "from-env");
        let yaml = r#"
name: inventory
host: "https://h"
masterKey: "{{ env.DOCLINK_TEST_YAML_KEY }}"
databaseId: d
collectionId: c
"#;
        let source = YamlParser::parse(yaml).unwrap();
        assert_eq!(source.settings.master_key(), "from-env");
        std::env::remove_var("DOCLINK_TEST_YAML_KEY");
    }

    #[test]
    fn test_parse_missing_field() {
        let yaml = r#"
name: inventory
host: "https://h"
masterKey: k
databaseId: d
"#;
        let err = YamlParser::parse_raw(yaml).unwrap_err();
        assert!(matches!(err, DocLinkError::Config(_)));
        assert!(err.to_string().contains("collectionId"));
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let yaml = "invalid: yaml: content: [";
        assert!(YamlParser::parse_raw(yaml).is_err());
    }
}
