//! The finding record rules emit and reporters render.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::position::SourceLocation;

/// How serious a finding is.
///
/// # Example
///
/// ```
/// use slim_lint_core::Severity;
///
/// let severity: Severity = "error".parse()?;
/// assert_eq!(severity, Severity::Error);
/// assert_eq!(format!("{}", Severity::Warning), "warning");
/// # Ok::<(), slim_lint_core::ParseSeverityError>(())
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// A style or correctness issue that does not stop the run from passing.
    #[default]
    Warning,
    /// A problem that fails the run, including unparseable templates.
    Error,
}

impl Severity {
    /// Returns `true` for [`Severity::Error`].
    #[must_use]
    pub const fn is_error(self) -> bool {
        matches!(self, Self::Error)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// Error returned when a severity name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown severity: {name}")]
pub struct ParseSeverityError {
    name: String,
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "warning" | "w" => Ok(Self::Warning),
            "error" | "e" => Ok(Self::Error),
            _ => Err(ParseSeverityError { name: s.to_owned() }),
        }
    }
}

/// A single finding reported against a template.
///
/// # Example
///
/// ```
/// use slim_lint_core::{Lint, Severity, SourceLocation};
///
/// let lint = Lint::new(
///     "TagCase",
///     "app/views/index.html.slim",
///     SourceLocation::from_line(3),
///     "Tag `DIV` should be written in lowercase",
///     Severity::Warning,
/// );
/// assert_eq!(lint.linter(), "TagCase");
/// assert_eq!(lint.location().line(), 3);
/// assert!(!lint.is_error());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lint {
    linter: String,
    filename: String,
    location: SourceLocation,
    message: String,
    severity: Severity,
}

impl Lint {
    /// Creates a new lint.
    #[must_use]
    pub fn new(
        linter: impl Into<String>,
        filename: impl Into<String>,
        location: SourceLocation,
        message: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            linter: linter.into(),
            filename: filename.into(),
            location,
            message: message.into(),
            severity,
        }
    }

    /// Returns the name of the rule that produced the lint.
    #[must_use]
    pub fn linter(&self) -> &str {
        &self.linter
    }

    /// Returns the file the lint was reported against.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns where in the file the lint applies.
    #[must_use]
    pub const fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// Returns the human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the severity.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns `true` if the lint has error severity.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.severity.is_error()
    }
}

impl fmt::Display for Lint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} [{}] {}: {}",
            self.filename,
            self.location.line(),
            self.severity,
            self.linter,
            self.message
        )
    }
}
