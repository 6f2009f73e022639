//! Canonical `<link>` hook for tola static sites.
//!
//! Called once per rendered page. Decides from `include` / `exclude`
//! patterns whether the page gets a canonical link, then builds the URL
//! from `site_url` and the page location.
//!
//! ```ignore
//! use tola_canonical::{CanonicalConfig, Location, TermLogger, wrap_page};
//!
//! let config = CanonicalConfig::new("https://my-site.com").with_exclude(["^/drafts"]);
//! let location = Location::new("/posts/hello/");
//! let page = wrap_page(body_html, &location, &config, &TermLogger::new());
//! assert_eq!(page.canonical_url(), Some("https://my-site.com/posts/hello/"));
//! ```

pub mod builder;
pub mod config;
pub mod head;
pub mod hook;
pub mod location;
pub mod logger;
pub mod matcher;
pub mod policy;

pub use config::{CanonicalConfig, ConfigDiagnostics, ConfigError, FieldPath};
pub use head::{HeadLink, HeadTags};
pub use hook::{Page, canonical_url, wrap_page};
pub use location::Location;
pub use logger::{Level, Logger, MemoryLogger, NullLogger, TermLogger};
pub use matcher::{Pattern, matches, normalize_pathname};
pub use policy::{Mode, should_emit};
