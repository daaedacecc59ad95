//! Errors raised while assembling a lint run.
//!
//! Problems with individual templates never surface here: a template that
//! cannot be parsed becomes an error-severity lint instead. These errors
//! describe a run that cannot start at all.

use slim_lint_syntax::{ExtractorError, OptionsError, RegistryError};
use thiserror::Error;

/// A lint run could not be set up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SetupError {
    /// The parser options are invalid.
    #[error(transparent)]
    Options(#[from] OptionsError),

    /// A linter's visitor could not be built.
    #[error("linter {linter} has an invalid visitor: {source}")]
    Registry {
        /// Name of the offending linter.
        linter: String,
        /// The underlying registry error.
        source: RegistryError,
    },

    /// The Ruby extractor could not be built.
    #[error(transparent)]
    Extractor(#[from] ExtractorError),

    /// Two linters share a name.
    #[error("linter {name} is registered twice")]
    DuplicateLinter {
        /// The repeated name.
        name: String,
    },
}

impl SetupError {
    /// Wraps a registry error raised while building `linter`'s visitor.
    #[must_use]
    pub fn registry(linter: impl Into<String>, source: RegistryError) -> Self {
        Self::Registry {
            linter: linter.into(),
            source,
        }
    }
}

/// An external analyzer could not inspect extracted source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("external analyzer failed: {message}")]
pub struct AnalyzerError {
    message: String,
}

impl AnalyzerError {
    /// Creates an error with a human-readable reason.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Returns the reason.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
