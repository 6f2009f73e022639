//! Per-page render hook.
//!
//! ```text
//! location ──► policy (include / exclude) ──► builder ──► <link rel="canonical">
//!                  │                                          │
//!                  └── no ──► page unchanged         prepended to page
//! ```
//!
//! The hook fails open: a missing `site_url` or a broken pattern only costs
//! the canonical link, never the page.


use std::fmt;

use crate::builder;
use crate::config::CanonicalConfig;
use crate::head::{HeadLink, HeadTags};
use crate::location::Location;
use crate::log;
use crate::logger::{Level, Logger};
use crate::policy::should_emit;

/// Canonical URL for this page, or `None` if the page gets no link.
///
/// Warns through `logger` once when `site_url` is missing.
pub fn canonical_url(
    config: &CanonicalConfig,
    location: &Location,
    logger: &dyn Logger,
) -> Option<String> {
    if config.site_url().is_none() {
        log!(logger, Level::Warn; "`site_url` is not configured, canonical URLs will not be generated");
        return None;
    }

    should_emit(config, &location.pathname, logger).then(|| builder::build(config, location))
}

/// Wrap rendered page content, adding the canonical link when allowed.
pub fn wrap_page<E>(
    element: E,
    location: &Location,
    config: &CanonicalConfig,
    logger: &dyn Logger,
) -> Page<E> {
    let mut page = Page::new(element);
    if let Some(url) = canonical_url(config, location, logger) {
        page.head.push(HeadLink::canonical(url));
    }
    page
}

// =============================================================================
// Page
// =============================================================================

/// Page content with the head declarations that precede it.
#[derive(Debug, Clone)]
pub struct Page<E> {
    pub head: HeadTags,
    pub element: E,
}

impl<E> Page<E> {
    pub fn new(element: E) -> Self {
        Self {
            head: HeadTags::new(),
            element,
        }
    }

    /// Canonical URL added by the hook, if any.
    pub fn canonical_url(&self) -> Option<&str> {
        self.head.canonical().map(HeadLink::key)
    }

    pub fn into_parts(self) -> (HeadTags, E) {
        (self.head, self.element)
    }

    pub fn into_element(self) -> E {
        self.element
    }
}

/// Head links first, then the original content.
impl<E: fmt::Display> fmt::Display for Page<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.head.is_empty() {
            writeln!(f, "{}", self.head)?;
        }
        write!(f, "{}", self.element)
    }
}
