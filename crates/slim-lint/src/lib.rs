//! Slim Lint: the linting layer over the Slim template front end.
//!
//! This facade crate re-exports the stable types from [`slim_lint_core`]
//! and [`slim_lint_syntax`] and adds what a lint run needs on top of them:
//! parsed [`Document`]s, the [`Linter`] contract, the [`Runner`] that turns
//! templates into a [`Report`], and the [`AnalyzerBridge`] that maps an
//! external Ruby analyzer's findings back onto template lines.
//!
//! # Stability
//!
//! `slim_lint` is the semver-stable entrypoint. `slim_lint_core` and
//! `slim_lint_syntax` may evolve, but the names re-exported here keep
//! their behaviour within documented constraints.
//!
//! # Core types
//!
//! - [`Position`] and [`SourceLocation`]: one-based source coordinates
//! - [`Sexp`], [`Atom`] and [`Pattern`]: the normalized tree and its patterns
//! - [`Visitor`] and [`VisitorBuilder`]: pattern-driven traversal
//! - [`Lint`], [`Severity`] and [`Report`]: findings
//! - [`RuleConfig`] and [`LinterConfig`]: rule configuration
//! - [`Runner`]: the lint entrypoint
//!
//! # Example
//!
//! ```
//! use slim_lint::{
//!     Flow, LintContext, Linter, LinterConfig, ParserOptions, RegistryError, Runner, Visitor,
//!     VisitorBuilder, pattern,
//! };
//!
//! struct NoInlineStyles;
//!
//! impl Linter for NoInlineStyles {
//!     fn name(&self) -> &'static str {
//!         "NoInlineStyles"
//!     }
//!
//!     fn visitor(&self) -> Result<Visitor<LintContext>, RegistryError> {
//!         VisitorBuilder::new()
//!             .on(pattern![:html, :attr, "style"], |context: &mut LintContext, sexp, _| {
//!                 context.report(sexp, "Move inline styles into a stylesheet");
//!                 Flow::Continue
//!             })
//!             .build()
//!     }
//! }
//!
//! let runner = Runner::new(LinterConfig::default(), ParserOptions::default())?
//!     .with_linter(NoInlineStyles)?;
//! let report = runner.run([("index.slim", "div\n  p style=\"color: red\" Hi")]);
//! assert_eq!(report.len(), 1);
//! assert_eq!(report.lints()[0].location().line(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod document;
mod error;
mod external;
mod linter;
mod runner;

pub use slim_lint_core::{
    Lint, LinterConfig, ParseSeverityError, Position, Report, RuleConfig, Severity,
    SourceLocation,
};
pub use slim_lint_syntax::{
    Anything, Atom, CaptureMap, Engine, ErrorKind, ExtractedSource, ExtractorError, Flow,
    LineMap, Matcher, Node, NodeRef, Nothing, OptionsError, ParserOptions, Pattern,
    RegistryError, RubyExtractor, Sexp, Shortcut, SyntaxError, Value, Visit, Visitor,
    VisitorBuilder, capture, pattern,
};

pub use document::{Document, strip_front_matter};
pub use error::{AnalyzerError, SetupError};
pub use external::{AnalyzerBridge, ExternalAnalyzer, ExternalOffense};
pub use linter::{LintContext, Linter};
pub use runner::{Runner, SYNTAX_LINTER, syntax_lint};

#[cfg(test)]
mod tests;
