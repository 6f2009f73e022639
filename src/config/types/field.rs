//! Type-safe config field path.

use owo_colors::OwoColorize;
use std::fmt;

/// One of the config keys, spelled as in the config file.
///
/// The set is closed: diagnostics can only point at keys that exist.
///
/// # Example
///
/// ```ignore
/// diag.warn(FieldPath::SITE_URL, "not configured");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldPath(&'static str);

impl FieldPath {
    pub const SITE_URL: Self = Self("site_url");
    pub const INCLUDE: Self = Self("include");
    pub const EXCLUDE: Self = Self("exclude");

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_path_matches_config_keys() {
        assert_eq!(FieldPath::SITE_URL.as_str(), "site_url");
        assert_eq!(FieldPath::INCLUDE.as_str(), "include");
        assert_eq!(FieldPath::EXCLUDE.as_str(), "exclude");
    }

    #[test]
    fn test_field_path_display_quotes_key() {
        let display = FieldPath::EXCLUDE.to_string();
        assert!(display.contains("`exclude`"));
    }
}
