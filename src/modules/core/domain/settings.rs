//! Connector settings

use serde::Deserialize;
use std::fmt;

/// Immutable connection settings for a document-database data source.
///
/// Fields are private; once built, settings are shared read-only
/// (typically behind an `Arc`) for the lifetime of the connector.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Account endpoint, e.g. `https://account.documents.example.com:443/`
    host: String,

    /// Account master key
    #[serde(alias = "master_key")]
    master_key: String,

    /// Human-readable id of the database to resolve on connect
    #[serde(alias = "database_id")]
    database_id: String,

    /// Human-readable id of the collection to resolve on connect
    #[serde(alias = "collection_id")]
    collection_id: String,
}

impl Settings {
    /// Create settings from their four required parts
    pub fn new(
        host: impl Into<String>,
        master_key: impl Into<String>,
        database_id: impl Into<String>,
        collection_id: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            master_key: master_key.into(),
            database_id: database_id.into(),
            collection_id: collection_id.into(),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn master_key(&self) -> &str {
        &self.master_key
    }

    pub fn database_id(&self) -> &str {
        &self.database_id
    }

    pub fn collection_id(&self) -> &str {
        &self.collection_id
    }

    /// Master key with everything but the last four characters masked
    pub fn redacted_master_key(&self) -> String {
        let chars: Vec<char> = self.master_key.chars().collect();
        if chars.len() <= 4 {
            return "*".repeat(chars.len());
        }
        let visible: String = chars[chars.len() - 4..].iter().collect();
        format!("{}{}", "*".repeat(chars.len() - 4), visible)
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("host", &self.host)
            .field("master_key", &self.redacted_master_key())
            .field("database_id", &self.database_id)
            .field("collection_id", &self.collection_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_new() {
        let settings = Settings::new("https://host", "MyKey", "MyDbId", "MyCollId");
        assert_eq!(settings.host(), "https://host");
        assert_eq!(settings.master_key(), "MyKey");
        assert_eq!(settings.database_id(), "MyDbId");
        assert_eq!(settings.collection_id(), "MyCollId");
    }

    #[test]
    fn test_settings_debug_masks_key() {
        let settings = Settings::new("https://host", "supersecretkey", "db", "coll");
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("supersecretkey"));
        assert!(debug.contains("**********tkey"));
    }

    #[test]
    fn test_redacted_short_key() {
        let settings = Settings::new("https://host", "abc", "db", "coll");
        assert_eq!(settings.redacted_master_key(), "***");
    }

    #[test]
    fn test_settings_serde_accepts_both_casings() {
        let camel: Settings = serde_json::from_str(
            r#"{"host":"https://h","masterKey":"k","databaseId":"d","collectionId":"c"}"#,
        )
        .unwrap();
        let snake: Settings = serde_json::from_str(
            r#"{"host":"https://h","master_key":"k","database_id":"d","collection_id":"c"}"#,
        )
        .unwrap();
        assert_eq!(camel, snake);
    }

    #[test]
    fn test_settings_serde_requires_all_fields() {
        let result: std::result::Result<Settings, _> =
            serde_json::from_str(r#"{"host":"https://h","masterKey":"k","databaseId":"d"}"#);
        assert!(result.is_err());
    }
}
