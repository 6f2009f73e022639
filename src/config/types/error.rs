//! Configuration error types.

use super::FieldPath;
use crate::logger::{Level, Logger};
use owo_colors::OwoColorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// ConfigError
// ============================================================================

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config JSON parsing error")]
    Json(#[from] serde_json::Error),

    // NOTE: No #[from] here - we don't want source() which causes duplicate output
    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),
}

// ============================================================================
// ConfigDiagnostic
// ============================================================================

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The option cannot work as written.
    Error,
    /// The option works but disables output.
    Warning,
    /// The option works but probably not as intended.
    Hint,
}

/// A single configuration diagnostic
#[derive(Debug, Clone)]
pub struct ConfigDiagnostic {
    pub severity: Severity,
    /// Config key (e.g., "site_url")
    pub field: FieldPath,
    pub message: String,
    /// Fix hint (optional)
    pub hint: Option<String>,
}

impl ConfigDiagnostic {
    pub fn new(severity: Severity, field: FieldPath, message: impl Into<String>) -> Self {
        Self {
            severity,
            field,
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Single-line form used when forwarding to a [`Logger`].
    fn plain(&self) -> String {
        match &self.hint {
            Some(hint) => format!("[{}] {} (hint: {hint})", self.field.as_str(), self.message),
            None => format!("[{}] {}", self.field.as_str(), self.message),
        }
    }
}

impl fmt::Display for ConfigDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Field path in cyan brackets
        writeln!(
            f,
            "{}{}{}",
            "[".dimmed(),
            self.field.as_str().cyan(),
            "]".dimmed()
        )?;
        // Message with a bullet colored by severity
        match self.severity {
            Severity::Error => write!(f, "{} {}", "→".red(), self.message)?,
            Severity::Warning | Severity::Hint => write!(f, "{} {}", "→".yellow(), self.message)?,
        }
        if let Some(hint) = &self.hint {
            write!(f, "\n  {} {}", "hint:".yellow(), hint)?;
        }
        Ok(())
    }
}

// ============================================================================
// ConfigDiagnostics
// ============================================================================

/// Findings collected by `CanonicalConfig::validate`.
#[derive(Debug, Default)]
pub struct ConfigDiagnostics {
    items: Vec<ConfigDiagnostic>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, field: FieldPath, message: impl Into<String>) {
        self.items
            .push(ConfigDiagnostic::new(Severity::Error, field, message));
    }

    /// Add an error with a hint.
    pub fn error_with_hint(
        &mut self,
        field: FieldPath,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.items
            .push(ConfigDiagnostic::new(Severity::Error, field, message).with_hint(hint));
    }

    pub fn warn(&mut self, field: FieldPath, message: impl Into<String>) {
        self.items
            .push(ConfigDiagnostic::new(Severity::Warning, field, message));
    }

    pub fn hint(&mut self, field: FieldPath, message: impl Into<String>) {
        self.items
            .push(ConfigDiagnostic::new(Severity::Hint, field, message));
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn errors(&self) -> impl Iterator<Item = &ConfigDiagnostic> {
        self.by_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ConfigDiagnostic> {
        self.by_severity(Severity::Warning)
    }

    pub fn hints(&self) -> impl Iterator<Item = &ConfigDiagnostic> {
        self.by_severity(Severity::Hint)
    }

    fn by_severity(&self, severity: Severity) -> impl Iterator<Item = &ConfigDiagnostic> {
        self.items.iter().filter(move |d| d.severity == severity)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigDiagnostic> {
        self.items.iter()
    }

    /// Forward every finding to `logger`, errors at `Level::Error`.
    pub fn report(&self, logger: &dyn Logger) {
        for item in &self.items {
            let level = match item.severity {
                Severity::Error => Level::Error,
                Severity::Warning | Severity::Hint => Level::Warn,
            };
            logger.log(level, &item.plain());
        }
    }

    /// Convert to Result (returns Err if there are errors).
    ///
    /// Warnings and hints alone still yield `Ok`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.has_errors() { Err(self) } else { Ok(()) }
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors: Vec<_> = self.errors().collect();
        if errors.is_empty() {
            return Ok(());
        }

        writeln!(f, "{}\n", "config validation failed:".red().bold())?;
        for (i, err) in errors.iter().enumerate() {
            write!(f, "{err}")?;
            if i + 1 < errors.len() {
                writeln!(f, "\n")?;
            }
        }
        if errors.len() > 1 {
            write!(
                f,
                "\n\n{} {} {}",
                "found".dimmed(),
                errors.len().to_string().red().bold(),
                "errors".dimmed()
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}
