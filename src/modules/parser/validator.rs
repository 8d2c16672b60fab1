//! Data source validation

use doclink_core::{DataSource, DocLinkError};
use once_cell::sync::Lazy;
use regex::Regex;

/// Regex pattern for valid names (lower-kebab-case or lower_snake_case)
static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z][a-z0-9]*(?:[-_][a-z0-9]+)*$").unwrap()
});

/// Account endpoints are plain http(s) URLs
static HOST_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[^\s/:]+(?::\d{1,5})?(?:/\S*)?$").unwrap()
});

/// Validates a parsed data source before a connector is built from it
pub struct ConfigValidator;

impl ConfigValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }

    /// Validate the whole data source
    pub fn validate(&self, source: &DataSource) -> Result<(), DocLinkError> {
        self.validate_name(&source.name)?;
        self.validate_settings(source)?;
        Ok(())
    }

    fn validate_name(&self, name: &str) -> Result<(), DocLinkError> {
        if name.is_empty() {
            return Err(DocLinkError::Validation(
                "Data source name cannot be empty".to_string(),
            ));
        }

        if !NAME_PATTERN.is_match(name) {
            return Err(DocLinkError::Validation(format!(
                "Invalid data source name '{}': must be lower-kebab-case or lower_snake_case",
                name
            )));
        }

        Ok(())
    }

    fn validate_settings(&self, source: &DataSource) -> Result<(), DocLinkError> {
        let settings = &source.settings;

        if !HOST_PATTERN.is_match(settings.host()) {
            return Err(DocLinkError::Validation(format!(
                "Data source '{}' has an invalid host '{}': expected an http(s) URL",
                source.name,
                settings.host()
            )));
        }

        let required = [
            ("masterKey", settings.master_key()),
            ("databaseId", settings.database_id()),
            ("collectionId", settings.collection_id()),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(DocLinkError::Validation(format!(
                    "Data source '{}' has an empty '{}'",
                    source.name, field
                )));
            }
        }

        Ok(())
    }
}

impl Default for ConfigValidator {
    fn default() -> Self {
        Self::new()
    }
}
