//! Templates prepared for linting.
//!
//! A [`Document`] pairs a template's text with its normalized tree. When
//! requested, a leading front-matter block (`---` ... `---` or `...`) is
//! blanked out before parsing. Each stripped line is replaced by an empty
//! one so that line numbers in findings still point at the original file.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use slim_lint_syntax::{Engine, Sexp, SyntaxError};

#[expect(
    clippy::expect_used,
    reason = "the front-matter pattern is a literal known to compile"
)]
static FRONT_MATTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?ms)\A(---[ \t]*\r?\n.*?\n?)^(---|\.\.\.)[ \t]*\r?$\n?")
        .expect("front-matter pattern compiles")
});

/// Blanks out a leading front-matter block, keeping one empty line per
/// line removed.
///
/// # Example
///
/// ```
/// use slim_lint::strip_front_matter;
///
/// let source = "---\ntitle: Home\n---\np Hello\n";
/// assert_eq!(strip_front_matter(source), "\n\n\np Hello\n");
/// assert_eq!(strip_front_matter("p ---"), "p ---");
/// ```
#[must_use]
pub fn strip_front_matter(source: &str) -> Cow<'_, str> {
    FRONT_MATTER.replace(source, |found: &Captures<'_>| {
        let lines = found
            .get(0)
            .map_or(0, |block| block.as_str().matches('\n').count());
        "\n".repeat(lines)
    })
}

/// A parsed template ready for linters.
///
/// # Example
///
/// ```
/// use slim_lint::{Document, Engine, ParserOptions};
///
/// let engine = Engine::new(ParserOptions::default())?;
/// let document = Document::new(&engine, "index.slim", "---\nlayout: x\n---\np Hi", true)?;
/// assert_eq!(document.source_line(4), Some("p Hi"));
/// assert_eq!(document.source_line(1), Some(""));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    file: String,
    source: String,
    source_lines: Vec<String>,
    tree: Sexp,
}

impl Document {
    /// Parses `source` with `engine`, stripping front matter first when
    /// `skip_front_matter` is set.
    ///
    /// # Errors
    ///
    /// Returns the [`SyntaxError`] that stopped parsing, labelled with
    /// `file`.
    pub fn new(
        engine: &Engine,
        file: impl Into<String>,
        source: &str,
        skip_front_matter: bool,
    ) -> Result<Self, SyntaxError> {
        let name = file.into();
        let text = if skip_front_matter {
            strip_front_matter(source).into_owned()
        } else {
            source.to_owned()
        };
        let tree = engine.call(&text, Some(&name))?;
        Ok(Self {
            source_lines: text.lines().map(str::to_owned).collect(),
            file: name,
            source: text,
            tree,
        })
    }

    /// Returns the file identifier.
    #[must_use]
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Returns the text that was parsed.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the parsed text split into lines.
    #[must_use]
    pub fn source_lines(&self) -> &[String] {
        &self.source_lines
    }

    /// Returns the text of a 1-based line.
    #[must_use]
    pub fn source_line(&self, line: u32) -> Option<&str> {
        let index = usize::try_from(line.checked_sub(1)?).ok()?;
        self.source_lines.get(index).map(String::as_str)
    }

    /// Returns the normalized tree.
    #[must_use]
    pub const fn tree(&self) -> &Sexp {
        &self.tree
    }
}
