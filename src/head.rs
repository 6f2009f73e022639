//! `<head>` link declarations.
//!
//! Links are keyed by their `href`, so pushing the same canonical URL twice
//! leaves a single `<link>` in the head.

use std::borrow::Cow;
use std::fmt;

use rustc_hash::FxHashSet;

// =============================================================================
// HTML Escaping
// =============================================================================

/// Characters that require escaping inside a double-quoted attribute.
const ESCAPE_CHARS: [char; 5] = ['<', '>', '&', '"', '\''];

#[inline]
fn escape_char(c: char) -> Option<&'static str> {
    match c {
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '&' => Some("&amp;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#39;"),
        _ => None,
    }
}

/// Escape an HTML attribute value.
///
/// Uses `Cow` to avoid allocation when no escaping is needed.
pub fn escape_attr(s: &str) -> Cow<'_, str> {
    if !s.contains(ESCAPE_CHARS) {
        return Cow::Borrowed(s);
    }

    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match escape_char(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}

// =============================================================================
// HeadLink
// =============================================================================

/// A `<link>` element destined for the page head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadLink {
    pub rel: String,
    pub href: String,
}

impl HeadLink {
    pub fn new(rel: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            rel: rel.into(),
            href: href.into(),
        }
    }

    /// `<link rel="canonical" href="...">`
    pub fn canonical(href: impl Into<String>) -> Self {
        Self::new("canonical", href)
    }

    /// Deduplication key: the URL itself.
    #[inline]
    pub fn key(&self) -> &str {
        &self.href
    }

    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for HeadLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"<link rel="{}" href="{}">"#,
            escape_attr(&self.rel),
            escape_attr(&self.href)
        )
    }
}

// =============================================================================
// HeadTags
// =============================================================================

/// Ordered set of head links, unique by key.
#[derive(Debug, Clone, Default)]
pub struct HeadTags {
    links: Vec<HeadLink>,
    keys: FxHashSet<String>,
}

impl HeadTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a link. Returns `false` if one with the same key is already present.
    pub fn push(&mut self, link: HeadLink) -> bool {
        if !self.keys.insert(link.key().to_string()) {
            return false;
        }
        self.links.push(link);
        true
    }

    /// The canonical link, if any.
    pub fn canonical(&self) -> Option<&HeadLink> {
        self.links.iter().find(|link| link.rel == "canonical")
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeadLink> {
        self.links.iter()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Render all links, one per line.
    pub fn to_html(&self) -> String {
        self.to_string()
    }
}

impl Extend<HeadLink> for HeadTags {
    fn extend<T: IntoIterator<Item = HeadLink>>(&mut self, iter: T) {
        for link in iter {
            self.push(link);
        }
    }
}

impl fmt::Display for HeadTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, link) in self.links.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{link}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr("https://a.com/"), "https://a.com/");
        assert!(matches!(escape_attr("plain"), Cow::Borrowed(_)));
        assert_eq!(
            escape_attr(r#"/?a=1&b="x"<'y'>"#),
            "/?a=1&amp;b=&quot;x&quot;&lt;&#39;y&#39;&gt;"
        );
    }

    #[test]
    fn test_canonical_link_html() {
        let link = HeadLink::canonical("https://my-site.com/?a=1&b=2");
        assert_eq!(
            link.to_html(),
            r#"<link rel="canonical" href="https://my-site.com/?a=1&amp;b=2">"#
        );
        assert_eq!(link.key(), "https://my-site.com/?a=1&b=2");
    }

    #[test]
    fn test_head_tags_dedupe_by_key() {
        let mut tags = HeadTags::new();
        assert!(tags.push(HeadLink::canonical("https://my-site.com/a")));
        assert!(!tags.push(HeadLink::canonical("https://my-site.com/a")));
        assert!(tags.push(HeadLink::new("alternate", "https://my-site.com/feed.xml")));
        assert_eq!(tags.len(), 2);
        assert_eq!(
            tags.canonical().map(HeadLink::key),
            Some("https://my-site.com/a")
        );
    }

    #[test]
    fn test_head_tags_extend_and_render() {
        let mut tags = HeadTags::new();
        tags.extend([
            HeadLink::canonical("https://a.com/"),
            HeadLink::canonical("https://a.com/"),
            HeadLink::new("alternate", "https://a.com/feed.xml"),
        ]);
        assert_eq!(
            tags.to_html(),
            "<link rel=\"canonical\" href=\"https://a.com/\">\n<link rel=\"alternate\" href=\"https://a.com/feed.xml\">"
        );
    }

    #[test]
    fn test_empty_head_tags() {
        let tags = HeadTags::new();
        assert!(tags.is_empty());
        assert!(tags.canonical().is_none());
        assert_eq!(tags.to_html(), "");
    }
}
