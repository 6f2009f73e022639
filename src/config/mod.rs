//! Canonical link configuration.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── types/     # Utility types
//! │   ├── error  # ConfigError, ConfigDiagnostics
//! │   └── field  # FieldPath
//! └── mod.rs     # CanonicalConfig (this file)
//! ```
//!
//! # Keys
//!
//! | Key                 | Purpose                                         |
//! |---------------------|-------------------------------------------------|
//! | `site_url`          | Base URL prepended to every pathname (required) |
//! | `include`           | Whitelist patterns; only matches get a link     |
//! | `exclude`           | Blacklist patterns; used when `include` is empty|
//! | `no_trailing_slash` | Drop the trailing `/` from the pathname         |
//! | `no_query_string`   | Leave the query string out                      |
//! | `no_hash`           | Leave the fragment out                          |
//!
//! # Example
//!
//! ```toml
//! site_url = "https://my-site.com"
//! exclude = ["^/drafts", "^/404$"]
//! no_trailing_slash = true
//! ```

pub mod types;

pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath, Severity};

use crate::log;
use crate::logger::{Level, Logger};
use crate::matcher::{Pattern, deserialize_patterns};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

// ============================================================================
// root configuration
// ============================================================================

/// Options for the canonical link hook.
///
/// Defaults are applied once here; the render path never re-checks them.
/// camelCase aliases accept options objects written for JS site generators.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CanonicalConfig {
    /// Base URL, e.g. `https://my-site.com`. Absent or empty disables output.
    #[serde(alias = "siteUrl", skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,

    /// Whitelist patterns. Non-empty switches to include mode.
    #[serde(deserialize_with = "deserialize_patterns")]
    pub include: Vec<Pattern>,

    /// Blacklist patterns. Ignored while `include` is non-empty.
    #[serde(deserialize_with = "deserialize_patterns")]
    pub exclude: Vec<Pattern>,

    #[serde(alias = "noTrailingSlash")]
    pub no_trailing_slash: bool,

    #[serde(alias = "noQueryString")]
    pub no_query_string: bool,

    #[serde(alias = "noHash")]
    pub no_hash: bool,
}

impl CanonicalConfig {
    /// Config with only `site_url` set.
    pub fn new(site_url: impl Into<String>) -> Self {
        Self {
            site_url: Some(site_url.into()),
            ..Self::default()
        }
    }

    /// Configured base URL, `None` if absent or empty.
    pub fn site_url(&self) -> Option<&str> {
        self.site_url.as_deref().filter(|url| !url.is_empty())
    }

    pub fn with_include<I, P>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Pattern>,
    {
        self.include = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_exclude<I, P>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Pattern>,
    {
        self.exclude = patterns.into_iter().map(Into::into).collect();
        self
    }

    pub fn no_trailing_slash(mut self, enable: bool) -> Self {
        self.no_trailing_slash = enable;
        self
    }

    pub fn no_query_string(mut self, enable: bool) -> Self {
        self.no_query_string = enable;
        self
    }

    pub fn no_hash(mut self, enable: bool) -> Self {
        self.no_hash = enable;
        self
    }

    // ========================================================================
    // loading
    // ========================================================================

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Parse configuration from a JSON options object
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load configuration from file path with unknown field detection.
    ///
    /// `.json` files are parsed as JSON, everything else as TOML. Unknown
    /// keys are reported through `logger` and otherwise ignored.
    pub fn load(path: &Path, logger: &dyn Logger) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let parsed = if is_json {
            Self::parse_json_with_ignored(&content)
        } else {
            Self::parse_toml_with_ignored(&content)
        };
        let (config, ignored) =
            parsed.with_context(|| format!("failed to parse `{}`", path.display()))?;

        if !ignored.is_empty() {
            let display_path = path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_else(|| path.to_string_lossy());
            log!(logger, Level::Warn; "unknown fields in {}, ignoring: {}", display_path, ignored.join(", "));
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_toml_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Parse JSON content, collecting any unknown fields.
    fn parse_json_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let mut deserializer = serde_json::Deserializer::from_str(content);
        let config = serde_ignored::deserialize(&mut deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        deserializer.end()?;
        Ok((config, ignored))
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Check the options ahead of rendering.
    ///
    /// Rendering never fails on bad options; this is for hosts that want to
    /// surface problems once at startup instead of once per page.
    pub fn validate(&self) -> ConfigDiagnostics {
        let mut diag = ConfigDiagnostics::new();

        match self.site_url() {
            None => diag.warn(
                FieldPath::SITE_URL,
                "not configured, canonical URLs will not be generated",
            ),
            Some(url) => Self::validate_site_url(url, &mut diag),
        }

        Self::validate_patterns(FieldPath::INCLUDE, &self.include, &mut diag);
        Self::validate_patterns(FieldPath::EXCLUDE, &self.exclude, &mut diag);

        if !self.include.is_empty() && !self.exclude.is_empty() {
            diag.hint(
                FieldPath::EXCLUDE,
                "ignored because `include` is set; only included paths get a canonical link",
            );
        }

        diag
    }

    /// Like [`validate`](Self::validate), but fails only on errors.
    ///
    /// Warnings and hints are dropped; call `validate` to see them.
    pub fn check(&self) -> Result<(), ConfigError> {
        self.validate()
            .into_result()
            .map_err(ConfigError::Diagnostics)
    }

    fn validate_site_url(site_url: &str, diag: &mut ConfigDiagnostics) {
        if url::Url::parse(site_url).is_err() {
            diag.error_with_hint(
                FieldPath::SITE_URL,
                format!("`{site_url}` is not an absolute URL"),
                "use a full URL such as `https://my-site.com`",
            );
            return;
        }

        if site_url.ends_with('/') {
            diag.hint(
                FieldPath::SITE_URL,
                format!("`{site_url}` ends with `/`, canonical URLs will contain `//`"),
            );
        }
    }

    fn validate_patterns(field: FieldPath, patterns: &[Pattern], diag: &mut ConfigDiagnostics) {
        for pattern in patterns {
            if let Err(err) = pattern.check() {
                diag.error_with_hint(
                    field,
                    format!("invalid regex pattern provided: \"{}\"", pattern.as_str()),
                    err.to_string(),
                );
            }
        }
    }
}

// ============================================================================
// Test Helpers
// ============================================================================

/// Parse TOML config, panicking on unknown fields to catch typos in tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> CanonicalConfig {
    let (parsed, ignored) = CanonicalConfig::parse_toml_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::MemoryLogger;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.site_url(), None);
        assert!(config.include.is_empty());
        assert!(config.exclude.is_empty());
        assert!(!config.no_trailing_slash);
        assert!(!config.no_query_string);
        assert!(!config.no_hash);
    }

    #[test]
    fn test_parse_all_keys() {
        let config = test_parse_config(
            r#"site_url = "https://my-site.com"
include = ["^/blog", "^/docs"]
exclude = ["^/drafts"]
no_trailing_slash = true
no_query_string = true
no_hash = true"#,
        );
        assert_eq!(config.site_url(), Some("https://my-site.com"));
        assert_eq!(config.include.len(), 2);
        assert_eq!(config.exclude[0].as_str(), "^/drafts");
        assert!(config.no_trailing_slash);
        assert!(config.no_query_string);
        assert!(config.no_hash);
    }

    #[test]
    fn test_empty_site_url_is_absent() {
        let config = test_parse_config(r#"site_url = """#);
        assert_eq!(config.site_url(), None);
    }

    #[test]
    fn test_from_str_invalid_toml() {
        let result = CanonicalConfig::from_toml_str("site_url = ");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_json_camel_case_aliases() {
        let config = CanonicalConfig::from_json_str(
            r#"{
                "siteUrl": "https://my-site.com",
                "exclude": ["^/admin"],
                "noTrailingSlash": true,
                "noQueryString": false,
                "noHash": true
            }"#,
        )
        .unwrap();
        assert_eq!(config.site_url(), Some("https://my-site.com"));
        assert_eq!(config.exclude.len(), 1);
        assert!(config.no_trailing_slash);
        assert!(!config.no_query_string);
        assert!(config.no_hash);
    }

    #[test]
    fn test_builder() {
        let config = CanonicalConfig::new("https://my-site.com")
            .with_include(["^/blog"])
            .with_exclude(["^/drafts"])
            .no_trailing_slash(true);
        assert_eq!(config.include[0].as_str(), "^/blog");
        assert_eq!(config.exclude[0].as_str(), "^/drafts");
        assert!(config.no_trailing_slash);
        assert!(!config.no_hash);
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "site_url = \"https://my-site.com\"\nsiteurl = \"typo\"";
        let (config, ignored) = CanonicalConfig::parse_toml_with_ignored(content).unwrap();
        assert_eq!(config.site_url(), Some("https://my-site.com"));
        assert_eq!(ignored.len(), 1);
        assert!(ignored[0].contains("siteurl"));
    }

    #[test]
    fn test_load_toml_file_warns_unknown_fields() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "site_url = \"https://my-site.com\"\nno_slash = true").unwrap();

        let logger = MemoryLogger::new();
        let config = CanonicalConfig::load(file.path(), &logger).unwrap();

        assert_eq!(config.site_url(), Some("https://my-site.com"));
        let warnings = logger.messages(Level::Warn);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("no_slash"));
    }

    #[test]
    fn test_load_json_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"siteUrl": "https://my-site.com", "noHash": true}}"#).unwrap();

        let logger = MemoryLogger::new();
        let config = CanonicalConfig::load(file.path(), &logger).unwrap();

        assert_eq!(config.site_url(), Some("https://my-site.com"));
        assert!(config.no_hash);
        assert!(logger.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = CanonicalConfig::load(&path, &MemoryLogger::new()).unwrap_err();
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn test_validate_missing_site_url() {
        let diag = CanonicalConfig::default().validate();
        assert!(!diag.has_errors());
        let warnings: Vec<_> = diag.warnings().collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].field, FieldPath::SITE_URL);
    }

    #[test]
    fn test_validate_relative_site_url() {
        let diag = CanonicalConfig::new("my-site.com").validate();
        assert!(diag.has_errors());
    }

    #[test]
    fn test_validate_trailing_slash_site_url() {
        let diag = CanonicalConfig::new("https://my-site.com/").validate();
        assert!(!diag.has_errors());
        assert_eq!(diag.hints().count(), 1);
    }

    #[test]
    fn test_validate_invalid_patterns() {
        let diag = CanonicalConfig::new("https://my-site.com")
            .with_exclude(["(", "^/ok", "[x"])
            .validate();
        let errors: Vec<_> = diag.errors().collect();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|e| e.field == FieldPath::EXCLUDE));
        assert!(errors[0].message.contains("\"(\""));
    }

    #[test]
    fn test_validate_lookaround_pattern() {
        let diag = CanonicalConfig::new("https://my-site.com")
            .with_exclude(["^/(?!blog)"])
            .validate();
        assert!(diag.is_empty());
    }

    #[test]
    fn test_check_fails_on_invalid_pattern() {
        let config = CanonicalConfig::new("https://my-site.com").with_include(["("]);
        let err = config.check().unwrap_err();
        assert!(matches!(&err, ConfigError::Diagnostics(diag) if diag.errors().count() == 1));
        assert!(err.to_string().contains("invalid regex pattern provided"));
    }

    #[test]
    fn test_check_passes_with_warnings_only() {
        let config = CanonicalConfig::default();
        assert!(config.check().is_ok());
        assert_eq!(config.validate().warnings().count(), 1);
        assert_eq!(config.validate().to_string(), "");
    }

    #[test]
    fn test_validate_exclude_ignored_hint() {
        let diag = CanonicalConfig::new("https://my-site.com")
            .with_include(["^/blog"])
            .with_exclude(["^/blog/drafts"])
            .validate();
        assert!(diag.hints().any(|h| h.field == FieldPath::EXCLUDE));
    }

    #[test]
    fn test_validate_clean_config() {
        let diag = CanonicalConfig::new("https://my-site.com")
            .with_exclude(["^/admin"])
            .validate();
        assert!(diag.is_empty());
    }
}
