//! Logging sinks for render-time diagnostics.
//!
//! The hook itself never writes to the terminal. Every diagnostic goes
//! through a [`Logger`] handed in by the caller:
//!
//! - [`TermLogger`] prints `[canonical] message` with a colored prefix
//! - [`MemoryLogger`] records entries for tests or for forwarding
//! - [`NullLogger`] drops everything
//!
//! # Example
//!
//! ```ignore
//! let logger = TermLogger::new();
//! log!(&logger, Level::Warn; "`{}` is not configured", "site_url");
//! ```

use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::fmt;
use std::io::{Write, stderr};

/// Prefix shown in front of every terminal message.
const TARGET: &str = "canonical";

// ============================================================================
// Log Macro
// ============================================================================

/// Log a formatted message through a [`Logger`].
///
/// # Usage
/// ```ignore
/// log!(logger, Level::Error; "invalid regex pattern provided: \"{}\"", text);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr; $($arg:tt)*) => {{
        $crate::logger::Logger::log($logger, $level, &format!($($arg)*))
    }};
}

// ============================================================================
// Level + Logger trait
// ============================================================================

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Warn,
    Error,
}

impl Level {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Warn => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Leveled message sink.
pub trait Logger: Send + Sync {
    fn log(&self, level: Level, message: &str);

    fn warn(&self, message: &str) {
        self.log(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.log(Level::Error, message);
    }
}

// ============================================================================
// Terminal
// ============================================================================

/// Writes colored, prefixed lines to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TermLogger {
    verbose: bool,
}

impl TermLogger {
    pub const fn new() -> Self {
        Self { verbose: false }
    }

    /// Also print `Level::Debug` messages.
    pub const fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub const fn is_verbose(&self) -> bool {
        self.verbose
    }
}

impl Logger for TermLogger {
    fn log(&self, level: Level, message: &str) {
        if level == Level::Debug && !self.verbose {
            return;
        }

        let prefix = colorize_prefix(level);
        let mut stderr = stderr().lock();
        writeln!(stderr, "{prefix} {message}").ok();
        stderr.flush().ok();
    }
}

/// Apply color to the `[canonical]` prefix based on level
#[inline]
fn colorize_prefix(level: Level) -> String {
    let prefix = format!("[{TARGET}]");
    match level {
        Level::Error => prefix.bright_red().bold().to_string(),
        Level::Warn => prefix.bright_yellow().bold().to_string(),
        Level::Debug => prefix.dimmed().to_string(),
    }
}

// ============================================================================
// Memory
// ============================================================================

/// A recorded diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub level: Level,
    pub message: String,
}

/// Collects diagnostics in memory.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<Record>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far.
    pub fn records(&self) -> Vec<Record> {
        self.records.lock().clone()
    }

    /// Messages logged at exactly `level`.
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.level == level)
            .map(|r| r.message.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Drain recorded entries, leaving the logger empty.
    pub fn take(&self) -> Vec<Record> {
        std::mem::take(&mut *self.records.lock())
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: Level, message: &str) {
        self.records.lock().push(Record {
            level,
            message: message.to_string(),
        });
    }
}

// ============================================================================
// Null
// ============================================================================

/// Discards every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&self, _level: Level, _message: &str) {}
}

// ============================================================================
// Tests
// ============================================================================
