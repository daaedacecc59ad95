//! Parsing plus normalization in one call.

use tracing::debug;

use crate::convert::convert;
use crate::error::{OptionsError, SyntaxError};
use crate::filters::{Filter, extract_filters, main_filters};
use crate::lines::inject_lines;
use crate::parser::{Parser, ParserOptions};
use crate::sexp::Sexp;

const ENGINE_TARGET: &str = "slim_lint_syntax::engine";

/// Parses a template and runs the normalization pipeline over it.
///
/// # Example
///
/// ```
/// use slim_lint_syntax::{Engine, ParserOptions};
///
/// let engine = Engine::new(ParserOptions::default())?;
/// let tree = engine.call("p Hello #{name}", None)?;
/// assert_eq!(tree.head(), Some("multi"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    parser: Parser,
}

impl Engine {
    /// Creates an engine for the given parser options.
    ///
    /// # Errors
    ///
    /// Returns an [`OptionsError`] when the options are invalid.
    pub fn new(options: ParserOptions) -> Result<Self, OptionsError> {
        Ok(Self {
            parser: Parser::new(options)?,
        })
    }

    /// Returns the parser options.
    #[must_use]
    pub const fn options(&self) -> &ParserOptions {
        self.parser.options()
    }

    /// Parses and normalizes `source`. `file` only labels errors.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] when the template cannot be parsed or a
    /// pass rejects it.
    pub fn call(&self, source: &str, file: Option<&str>) -> Result<Sexp, SyntaxError> {
        run(&self.parser, source, file, main_filters())
    }
}

/// Parses a template and runs the extraction pipeline: the normalization
/// passes followed by the lowering passes that leave only code, dynamic
/// output and static text behind.
#[derive(Debug, Clone)]
pub struct ExtractEngine {
    parser: Parser,
}

impl ExtractEngine {
    /// Creates an engine for the given parser options.
    ///
    /// # Errors
    ///
    /// Returns an [`OptionsError`] when the options are invalid.
    pub fn new(options: ParserOptions) -> Result<Self, OptionsError> {
        Ok(Self {
            parser: Parser::new(options)?,
        })
    }

    /// Parses and lowers `source`. `file` only labels errors.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] when the template cannot be parsed or a
    /// pass rejects it.
    pub fn call(&self, source: &str, file: Option<&str>) -> Result<Sexp, SyntaxError> {
        run(&self.parser, source, file, extract_filters())
    }
}

fn run(
    parser: &Parser,
    source: &str,
    file: Option<&str>,
    filters: Vec<Box<dyn Filter>>,
) -> Result<Sexp, SyntaxError> {
    let raw = parser.parse(source).map_err(|err| err.in_file(file))?;
    let mut tree = convert(&raw);
    inject_lines(&mut tree);
    for mut filter in filters {
        tree = filter.call(tree).map_err(|err| err.in_file(file))?;
        debug!(
            target: ENGINE_TARGET,
            filter = filter.name(),
            file = file.unwrap_or_default(),
            "filter pass finished"
        );
    }
    Ok(tree)
}
