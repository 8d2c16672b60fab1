//! Environment variable substitution for configuration files
//!
//! Secrets such as the master key are usually kept out of the file and
//! written as `{{ env.DOCLINK_MASTER_KEY }}` placeholders instead.

use doclink_core::DocLinkError;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Placeholder syntax: `{{ env.VAR_NAME }}`
static ENV_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*env\.([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").unwrap()
});

/// Replaces `{{ env.VAR }}` placeholders with process environment values.
///
/// Every referenced variable must be set; unset ones are reported together.
pub struct EnvSubstitutor {
    /// Load a `.env` file from the working directory before substituting
    load_dotenv: bool,
}

impl EnvSubstitutor {
    /// Substitutor that also reads `.env`
    pub fn new() -> Self {
        Self { load_dotenv: true }
    }

    /// Skip `.env` loading (the process environment is used as-is)
    pub fn without_dotenv(mut self) -> Self {
        self.load_dotenv = false;
        self
    }

    /// Substitute every placeholder in `content`
    pub fn substitute(&self, content: &str) -> Result<String, DocLinkError> {
        if !Self::has_placeholders(content) {
            return Ok(content.to_string());
        }

        if self.load_dotenv {
            // A missing .env file is fine
            let _ = dotenvy::dotenv();
        }

        let mut missing: Vec<String> = Vec::new();
        for name in Self::referenced_vars(content) {
            if std::env::var(&name).is_err() && !missing.contains(&name) {
                missing.push(name);
            }
        }
        if !missing.is_empty() {
            return Err(DocLinkError::EnvVarNotFound(missing.join(", ")));
        }

        let substituted = ENV_PATTERN.replace_all(content, |cap: &Captures<'_>| {
            std::env::var(&cap[1]).unwrap_or_default()
        });
        Ok(substituted.into_owned())
    }

    /// Check if a string contains environment variable placeholders
    pub fn has_placeholders(content: &str) -> bool {
        ENV_PATTERN.is_match(content)
    }

    /// Names of all variables referenced by placeholders, in order of appearance
    pub fn referenced_vars(content: &str) -> Vec<String> {
        ENV_PATTERN
            .captures_iter(content)
            .map(|cap| cap[1].to_string())
            .collect()
    }
}

impl Default for EnvSubstitutor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_placeholders() {
        assert!(EnvSubstitutor::has_placeholders("{{ env.DOCLINK_MASTER_KEY }}"));
        assert!(EnvSubstitutor::has_placeholders("masterKey: {{env.KEY}}"));
        assert!(!EnvSubstitutor::has_placeholders("masterKey: plain"));
        assert!(!EnvSubstitutor::has_placeholders("{{ inputs.id }}"));
    }

    #[test]
    fn test_referenced_vars() {
        let content = "host: {{ env.DOCLINK_HOST }}\nmasterKey: {{ env.DOCLINK_KEY }}";
        assert_eq!(
            EnvSubstitutor::referenced_vars(content),
            vec!["DOCLINK_HOST".to_string(), "DOCLINK_KEY".to_string()]
        );
    }

    #[test]
    fn test_substitute_with_env_var() {
        std::env::set_var("DOCLINK_TEST_SUBST_KEY", "s3cr3t");
        let result = EnvSubstitutor::new()
            .without_dotenv()
            .substitute("masterKey: {{ env.DOCLINK_TEST_SUBST_KEY }}")
            .unwrap();
        assert_eq!(result, "masterKey: s3cr3t");
        std::env::remove_var("DOCLINK_TEST_SUBST_KEY");
    }

    #[test]
    fn test_substitute_without_placeholders_is_unchanged() {
        let content = "masterKey: plain\nhost: \"https://h\"";
        assert_eq!(EnvSubstitutor::new().substitute(content).unwrap(), content);
    }

    #[test]
    fn test_substitute_missing_var() {
        let err = EnvSubstitutor::new()
            .without_dotenv()
            .substitute("{{ env.DOCLINK_NONEXISTENT_12345 }} {{ env.DOCLINK_NONEXISTENT_12345 }}")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Environment variable not found: DOCLINK_NONEXISTENT_12345"
        );
    }
}
