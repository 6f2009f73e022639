//! Browser-style location of the page being rendered.

use serde::{Deserialize, Serialize};

/// The parts of the page URL the hook looks at.
///
/// `search` and `hash` keep their leading `?` / `#` (or are empty), the same
/// as `window.location`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub pathname: String,
    pub search: String,
    pub hash: String,
}

impl Location {
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            ..Self::default()
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = hash.into();
        self
    }

    /// Pathname, falling back to `/` when empty.
    pub fn pathname_or_root(&self) -> &str {
        if self.pathname.is_empty() {
            "/"
        } else {
            &self.pathname
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pathname_or_root() {
        assert_eq!(Location::default().pathname_or_root(), "/");
        assert_eq!(Location::new("/posts/").pathname_or_root(), "/posts/");
    }

    #[test]
    fn test_deserialize_partial() {
        let location: Location = serde_json::from_str(r#"{"pathname": "/a/"}"#).unwrap();
        assert_eq!(location, Location::new("/a/"));
        assert!(location.search.is_empty());
        assert!(location.hash.is_empty());
    }
}
