//! Flattening of a template into equivalent Ruby source.
//!
//! Markup becomes `puts` placeholder lines and code is copied verbatim,
//! indented two spaces per open block. Every generated line records the
//! template line it came from, so findings of an external Ruby analyzer
//! can be reported against the template.

use tracing::debug;

use crate::engine::ExtractEngine;
use crate::error::{ExtractorError, SyntaxError};
use crate::parser::ParserOptions;
use crate::sexp::Sexp;
use crate::visitor::{Flow, Visitor, VisitorBuilder};

const EXTRACTOR_TARGET: &str = "slim_lint_syntax::extractor";

/// Placeholder emitted for markup output.
const PUTS: &str = "puts";

/// Generated line to template line translation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineMap {
    originals: Vec<u32>,
}

impl LineMap {
    /// Returns the template line for a 1-based generated line.
    #[must_use]
    pub fn original_line(&self, generated: u32) -> Option<u32> {
        let index = usize::try_from(generated.checked_sub(1)?).ok()?;
        self.originals.get(index).copied()
    }

    /// Returns the number of generated lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.originals.len()
    }

    /// Returns `true` if nothing was generated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.originals.is_empty()
    }

    /// Iterates over `(generated, original)` pairs in generated order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (1_u32..).zip(self.originals.iter().copied())
    }
}

/// Ruby source generated from a template, with its line map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedSource {
    source: String,
    line_map: LineMap,
}

impl ExtractedSource {
    /// Returns the generated source. Non-empty source ends with a newline.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the line map.
    #[must_use]
    pub const fn line_map(&self) -> &LineMap {
        &self.line_map
    }

    /// Splits into source text and line map.
    #[must_use]
    pub fn into_parts(self) -> (String, LineMap) {
        (self.source, self.line_map)
    }
}

/// Traversal state of an extraction.
#[derive(Debug, Default)]
struct ExtractState {
    lines: Vec<String>,
    originals: Vec<u32>,
    depth: usize,
}

impl ExtractState {
    fn append(&mut self, code: &str, line: u32) {
        if code.trim().is_empty() {
            return;
        }
        let indent = "  ".repeat(self.depth);
        for text in code.lines() {
            self.lines.push(format!("{indent}{text}"));
            self.originals.push(line);
        }
    }

    fn finish(self) -> ExtractedSource {
        let mut source = self.lines.join("\n");
        if !source.is_empty() {
            source.push('\n');
        }
        ExtractedSource {
            source,
            line_map: LineMap {
                originals: self.originals,
            },
        }
    }
}

fn puts(state: &mut ExtractState, sexp: &Sexp) -> Flow {
    state.append(PUTS, sexp.line());
    Flow::Continue
}

fn code(state: &mut ExtractState, sexp: &Sexp) -> Flow {
    if let Some(atom) = sexp.atom_at(1) {
        state.append(atom.as_string().unwrap_or_default(), atom.line());
    }
    Flow::Continue
}

fn extraction_visitor() -> Result<Visitor<ExtractState>, ExtractorError> {
    let visitor = VisitorBuilder::<ExtractState>::new()
        .on(crate::pattern![:html, :doctype], |state, sexp, _| puts(state, sexp))
        .on(crate::pattern![:html, :tag], |state, sexp, _| puts(state, sexp))
        .on(crate::pattern![:static], |state, sexp, _| puts(state, sexp))
        .on(crate::pattern![:dynamic], |state, sexp, _| code(state, sexp))
        .on(crate::pattern![:code], |state, sexp, _| code(state, sexp))
        .on(crate::pattern![:indent], |state, _, _| {
            state.depth = state.depth.saturating_add(1);
            Flow::Continue
        })
        .on(crate::pattern![:outdent], |state, _, _| {
            state.depth = state.depth.saturating_sub(1);
            Flow::Continue
        })
        .build()?;
    Ok(visitor)
}

/// Runs the extraction pipeline and flattens its result into Ruby source.
///
/// # Example
///
/// ```
/// use slim_lint_syntax::{ParserOptions, RubyExtractor};
///
/// let extractor = RubyExtractor::new(ParserOptions::default())?;
/// let extracted = extractor.extract("p #{name}", None)?;
/// assert_eq!(extracted.source(), "puts\nname\n");
/// assert_eq!(extracted.line_map().original_line(2), Some(1));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct RubyExtractor {
    engine: ExtractEngine,
    visitor: Visitor<ExtractState>,
}

impl RubyExtractor {
    /// Creates an extractor for the given parser options.
    ///
    /// # Errors
    ///
    /// Returns an [`ExtractorError`] when the options are invalid.
    pub fn new(options: ParserOptions) -> Result<Self, ExtractorError> {
        Ok(Self {
            engine: ExtractEngine::new(options)?,
            visitor: extraction_visitor()?,
        })
    }

    /// Parses, lowers and flattens `source`.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] when the template cannot be parsed.
    pub fn extract(&self, source: &str, file: Option<&str>) -> Result<ExtractedSource, SyntaxError> {
        let tree = self.engine.call(source, file)?;
        Ok(self.extract_tree(&tree))
    }

    /// Flattens a tree produced by [`ExtractEngine`].
    #[must_use]
    pub fn extract_tree(&self, tree: &Sexp) -> ExtractedSource {
        let mut state = ExtractState::default();
        self.visitor.run(&mut state, tree);
        let extracted = state.finish();
        debug!(
            target: EXTRACTOR_TARGET,
            lines = extracted.line_map.len(),
            "extracted ruby source"
        );
        extracted
    }
}
