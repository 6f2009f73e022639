//! Canonical URL assembly.
//!
//! Plain concatenation of `site_url`, the pathname and the optional query
//! string and fragment. Nothing is escaped or re-encoded.

use crate::config::CanonicalConfig;
use crate::location::Location;

/// Build the canonical URL for `location`.
///
/// Only meaningful once the policy allowed the page; a missing `site_url`
/// contributes nothing.
pub fn build(config: &CanonicalConfig, location: &Location) -> String {
    let mut pathname = location.pathname_or_root();

    // Root "/" is never trimmed
    if config.no_trailing_slash && pathname.len() > 1 {
        pathname = pathname.strip_suffix('/').unwrap_or(pathname);
    }

    let site_url = config.site_url().unwrap_or_default();
    let mut url = String::with_capacity(
        site_url.len() + pathname.len() + location.search.len() + location.hash.len(),
    );
    url.push_str(site_url);
    url.push_str(pathname);

    if !config.no_query_string {
        url.push_str(&location.search);
    }
    if !config.no_hash {
        url.push_str(&location.hash);
    }

    url
}
