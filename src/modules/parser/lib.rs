//! Configuration parsing for Doclink
//!
//! This crate handles parsing of YAML data source files, validation, and
//! environment variable substitution.

pub mod env;
pub mod validator;
pub mod yaml;

pub use validator::ConfigValidator;
pub use yaml::YamlParser;

use doclink_core::{DataSource, DocLinkError};

/// Parse a data source file from a path
pub fn parse_file(path: &str) -> Result<DataSource, DocLinkError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| DocLinkError::Config(format!("Failed to read file '{}': {}", path, e)))?;

    parse_string(&content)
}

/// Parse and validate a data source from a string
pub fn parse_string(content: &str) -> Result<DataSource, DocLinkError> {
    let source = YamlParser::parse(content)?;

    ConfigValidator::new().validate(&source)?;

    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_config() {
        let yaml = r#"
name: inventory
connector: documentdb
host: "https://inventory.documents.example.com:443/"
masterKey: MyKey
databaseId: MyDbId
collectionId: MyCollId
"#;
        let source = parse_string(yaml).unwrap();
        assert_eq!(source.name, "inventory");
        assert_eq!(source.settings.database_id(), "MyDbId");
    }

    #[test]
    fn test_parse_string_runs_validation() {
        let yaml = r#"
name: inventory
host: MyHost
masterKey: MyKey
databaseId: MyDbId
collectionId: MyCollId
"#;
        let err = parse_string(yaml).unwrap_err();
        assert!(matches!(err, DocLinkError::Validation(_)));
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_file("/nonexistent/doclink/datasource.yaml").unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }
}
