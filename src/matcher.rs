//! Pathname pattern matching.
//!
//! Patterns are unanchored regular expressions tested against a normalized
//! pathname, so `"/admin"` also matches `/admin/dashboard`. Anchor with
//! `^` and `$` for exact paths.
//!
//! ```text
//! "pathname/"   → "/pathname"
//! "/pathname/"  → "/pathname"
//! ""            → "/"
//! ```

use std::fmt;

use fancy_regex::Regex as FancyRegex;
use regex::Regex;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::log;
use crate::logger::{Level, Logger};

// =============================================================================
// Pattern
// =============================================================================

/// A pathname pattern: raw regex text or an already compiled regex.
///
/// Literal text may use lookaround and backreferences; it is compiled with
/// `fancy-regex`, which hands plain expressions to `regex`.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Compiled on every evaluation; invalid text never matches.
    Literal(String),
    Compiled(Regex),
}

impl Pattern {
    /// Pattern source text.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal(text) => text,
            Self::Compiled(re) => re.as_str(),
        }
    }

    /// Compile literal text without testing anything.
    pub fn check(&self) -> Result<(), fancy_regex::Error> {
        match self {
            Self::Literal(text) => FancyRegex::new(text).map(drop),
            Self::Compiled(_) => Ok(()),
        }
    }

    /// Test an already normalized pathname.
    ///
    /// Literal text that fails to compile is logged and counts as no match.
    pub fn is_match(&self, normalized: &str, logger: &dyn Logger) -> bool {
        let text = match self {
            Self::Compiled(re) => return re.is_match(normalized),
            Self::Literal(text) => text,
        };

        let Ok(re) = FancyRegex::new(text) else {
            log!(logger, Level::Error; "invalid regex pattern provided: \"{}\"", text);
            return false;
        };

        // Backtracking limit exceeded
        re.is_match(normalized).unwrap_or_else(|err| {
            log!(logger, Level::Error; "regex pattern \"{}\" failed on `{}`: {}", text, normalized, err);
            false
        })
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Pattern {
    fn from(text: &str) -> Self {
        Self::Literal(text.to_string())
    }
}

impl From<String> for Pattern {
    fn from(text: String) -> Self {
        Self::Literal(text)
    }
}

impl From<Regex> for Pattern {
    fn from(re: Regex) -> Self {
        Self::Compiled(re)
    }
}

impl Serialize for Pattern {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.as_str().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self::Literal)
    }
}

// =============================================================================
// Config-side deserialization
// =============================================================================

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPatterns {
    List(Vec<RawPattern>),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPattern {
    Text(String),
    Other(IgnoredAny),
}

/// Lenient pattern list: a value that is not a list yields no patterns,
/// and non-string entries are dropped.
pub(crate) fn deserialize_patterns<'de, D>(deserializer: D) -> Result<Vec<Pattern>, D::Error>
where
    D: Deserializer<'de>,
{
    let patterns = match RawPatterns::deserialize(deserializer)? {
        RawPatterns::List(items) => items
            .into_iter()
            .filter_map(|item| match item {
                RawPattern::Text(text) => Some(Pattern::Literal(text)),
                RawPattern::Other(_) => None,
            })
            .collect(),
        RawPatterns::Other(_) => Vec::new(),
    };
    Ok(patterns)
}

// =============================================================================
// Matching
// =============================================================================

/// Normalize a pathname for matching.
///
/// Strips at most one leading and one trailing slash, then prepends a single
/// leading slash.
pub fn normalize_pathname(pathname: &str) -> String {
    let trimmed = pathname.strip_prefix('/').unwrap_or(pathname);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    format!("/{trimmed}")
}

/// Whether any pattern matches `pathname`. Stops at the first match.
pub fn matches(patterns: &[Pattern], pathname: &str, logger: &dyn Logger) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let normalized = normalize_pathname(pathname);
    patterns
        .iter()
        .any(|pattern| pattern.is_match(&normalized, logger))
}
