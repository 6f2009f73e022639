//! Include/exclude decision.
//!
//! Exactly one mode is active per page:
//!
//! | `include`  | Mode    | Emit when                        |
//! |------------|---------|----------------------------------|
//! | non-empty  | Include | some `include` pattern matches   |
//! | empty      | Exclude | no `exclude` pattern matches     |
//!
//! `exclude` is never consulted in include mode.

use crate::config::CanonicalConfig;
use crate::logger::Logger;
use crate::matcher::{Pattern, matches};

/// Which pattern list decides, borrowed from the config.
#[derive(Debug, Clone, Copy)]
pub enum Mode<'a> {
    /// Whitelist: emit only on match.
    Include(&'a [Pattern]),
    /// Blacklist: emit unless matched.
    Exclude(&'a [Pattern]),
}

impl<'a> Mode<'a> {
    /// Include mode iff `include` is non-empty.
    pub fn select(config: &'a CanonicalConfig) -> Self {
        if config.include.is_empty() {
            Self::Exclude(&config.exclude)
        } else {
            Self::Include(&config.include)
        }
    }

    pub fn allows(&self, pathname: &str, logger: &dyn Logger) -> bool {
        match self {
            Self::Include(patterns) => matches(patterns, pathname, logger),
            Self::Exclude(patterns) => !matches(patterns, pathname, logger),
        }
    }
}

/// Whether `pathname` gets a canonical link.
///
/// Always `false` without a `site_url`; warning about that is left to the
/// caller so it happens once per render.
pub fn should_emit(config: &CanonicalConfig, pathname: &str, logger: &dyn Logger) -> bool {
    if config.site_url().is_none() {
        return false;
    }
    Mode::select(config).allows(pathname, logger)
}
