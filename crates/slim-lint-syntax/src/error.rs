//! Error types for template parsing, normalization, and visitor setup.
//!
//! Parse and filter failures are reported through [`SyntaxError`], which
//! always carries the one-based line and column where reading stopped.
//! Construction-time problems with parser options and visitor registries
//! have their own types so that callers can tell configuration bugs apart
//! from bad templates.

use slim_lint_core::Position;
use thiserror::Error;

/// The reason a template could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A line is indented deeper than its parent allows.
    #[error("Unexpected indentation")]
    UnexpectedIndentation,

    /// A dedent does not land on any enclosing indentation level.
    #[error("Malformed indentation")]
    MalformedIndentation,

    /// A line starts with a character no construct claims.
    #[error("Unknown line indicator")]
    UnknownLineIndicator,

    /// Content follows a self-closing tag marker.
    #[error("Unexpected text after closed tag")]
    TextAfterClosedTag,

    /// An attribute shortcut sequence is not configured.
    #[error("Illegal shortcut")]
    IllegalShortcut,

    /// A block expansion colon is not followed by a tag.
    #[error("Expected tag")]
    ExpectedTag,

    /// An attribute list opened but no attribute followed.
    #[error("Expected attribute")]
    ExpectedAttribute,

    /// A code attribute has no value.
    #[error("Invalid empty attribute")]
    EmptyAttribute,

    /// An attribute list was not closed.
    #[error("Expected closing delimiter {0}")]
    ExpectedClosingDelimiter(char),

    /// A quoted attribute value was not closed.
    #[error("Expected closing quote {0}")]
    ExpectedClosingQuote(char),

    /// Input ended while a construct still needed more lines.
    #[error("Unexpected end of file")]
    UnexpectedEof,

    /// A control statement spells out `end`, which is inserted implicitly.
    #[error("Explicit end statements are forbidden")]
    ExplicitEnd,
}

/// A failure to parse or normalize a template.
///
/// # Example
///
/// ```
/// use slim_lint_core::Position;
/// use slim_lint_syntax::{ErrorKind, SyntaxError};
///
/// let error = SyntaxError::new(ErrorKind::UnknownLineIndicator, Position::new(3, 1), "?oops")
///     .with_file("index.slim");
/// assert_eq!(error.line(), 3);
/// assert_eq!(error.file(), Some("index.slim"));
/// assert_eq!(error.to_string(), "Unknown line indicator (index.slim, line 3, column 1)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} ({}, line {line}, column {column})", file_label(.file.as_deref()))]
pub struct SyntaxError {
    kind: ErrorKind,
    file: Option<String>,
    line: u32,
    column: u32,
    source_line: String,
}

fn file_label(file: Option<&str>) -> &str {
    file.unwrap_or("(template)")
}

impl SyntaxError {
    /// Creates an error at `position`, quoting the offending source line.
    #[must_use]
    pub fn new(kind: ErrorKind, position: Position, source_line: impl Into<String>) -> Self {
        Self {
            kind,
            file: None,
            line: position.line,
            column: position.column,
            source_line: source_line.into(),
        }
    }

    /// Returns a copy attributed to `file`.
    #[must_use]
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Attributes the error to `file` unless it already names one.
    #[must_use]
    pub fn in_file(self, file: Option<&str>) -> Self {
        match (file, &self.file) {
            (Some(name), None) => self.with_file(name),
            _ => self,
        }
    }

    /// Returns what went wrong.
    #[must_use]
    pub const fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the template file name, if known.
    #[must_use]
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    /// Returns the one-based line.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Returns the one-based column.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Returns the error position.
    #[must_use]
    pub const fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Returns the text of the line the error points at.
    #[must_use]
    pub fn source_line(&self) -> &str {
        &self.source_line
    }
}

/// Parser options that cannot be turned into a working grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum OptionsError {
    /// A shortcut key is empty or made of word characters.
    #[error("invalid shortcut `{key}`: {reason}")]
    InvalidShortcut {
        /// The offending shortcut key.
        key: String,
        /// Why the key was rejected.
        reason: String,
    },

    /// A grammar expression built from the options failed to compile.
    #[error("failed to build parser grammar: {message}")]
    Grammar {
        /// Description of the failure.
        message: String,
    },
}

impl OptionsError {
    /// Creates an invalid shortcut error.
    #[must_use]
    pub fn invalid_shortcut(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidShortcut {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Creates a grammar compilation error.
    #[must_use]
    pub fn grammar(message: impl Into<String>) -> Self {
        Self::Grammar {
            message: message.into(),
        }
    }
}

impl From<regex::Error> for OptionsError {
    fn from(error: regex::Error) -> Self {
        Self::grammar(error.to_string())
    }
}

/// A visitor registry that cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// Neither a pattern callback nor a start callback was registered.
    #[error("visitor has no registered callbacks")]
    Empty,

    /// A single pattern binds the same capture name twice.
    #[error("capture `{name}` is bound more than once in one pattern")]
    DuplicateCapture {
        /// The repeated capture name.
        name: String,
    },
}

/// A Ruby extractor that cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ExtractorError {
    /// The parser options are invalid.
    #[error(transparent)]
    Options(#[from] OptionsError),

    /// The extraction callbacks could not be registered.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
