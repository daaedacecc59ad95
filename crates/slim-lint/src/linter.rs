//! The contract between the runner and individual lint rules.
//!
//! A rule implements [`Linter`] by declaring a [`Visitor`] over
//! [`LintContext`]. The runner builds each visitor once, then runs it over
//! every document with a fresh context that collects the rule's findings.

use std::sync::Arc;

use slim_lint_core::{Lint, RuleConfig, Severity, SourceLocation};
use slim_lint_syntax::{NodeRef, RegistryError, Sexp, Visitor};

use crate::document::Document;

/// A lint rule.
///
/// # Example
///
/// ```
/// use slim_lint::{Flow, LintContext, Linter, RegistryError, Visitor, VisitorBuilder, pattern};
///
/// struct NoBreakTags;
///
/// impl Linter for NoBreakTags {
///     fn name(&self) -> &'static str {
///         "NoBreakTags"
///     }
///
///     fn visitor(&self) -> Result<Visitor<LintContext>, RegistryError> {
///         VisitorBuilder::new()
///             .on(pattern![:html, :tag, "br"], |context: &mut LintContext, sexp, _| {
///                 context.report(sexp, "Avoid `br` tags");
///                 Flow::Continue
///             })
///             .build()
///     }
/// }
/// # let _ = NoBreakTags.visitor().expect("visitor builds");
/// ```
pub trait Linter: Send + Sync {
    /// Returns the rule name used in configuration and findings.
    fn name(&self) -> &'static str;

    /// Returns the severity used when configuration does not override it.
    fn default_severity(&self) -> Severity {
        Severity::Warning
    }

    /// Builds the rule's traversal callbacks.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistryError`] when the callbacks cannot be
    /// registered.
    fn visitor(&self) -> Result<Visitor<LintContext>, RegistryError>;
}

/// Per-document state handed to a rule's callbacks.
#[derive(Debug)]
pub struct LintContext {
    linter: &'static str,
    severity: Severity,
    config: RuleConfig,
    document: Arc<Document>,
    lints: Vec<Lint>,
}

impl LintContext {
    /// Creates a context for running `linter` over `document`.
    #[must_use]
    pub const fn new(
        linter: &'static str,
        severity: Severity,
        config: RuleConfig,
        document: Arc<Document>,
    ) -> Self {
        Self {
            linter,
            severity,
            config,
            document,
            lints: Vec::new(),
        }
    }

    /// Reports a finding spanning `sexp`.
    pub fn report(&mut self, sexp: &Sexp, message: impl Into<String>) {
        self.report_at(sexp.location(), message);
    }

    /// Reports a finding spanning a node, typically a capture.
    pub fn report_node(&mut self, node: NodeRef<'_>, message: impl Into<String>) {
        self.report_at(node.location(), message);
    }

    /// Reports a finding at an explicit location.
    pub fn report_at(&mut self, location: SourceLocation, message: impl Into<String>) {
        self.lints.push(Lint::new(
            self.linter,
            self.document.file(),
            location,
            message,
            self.severity,
        ));
    }

    /// Returns the document being linted.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Returns the rule's configuration.
    #[must_use]
    pub const fn config(&self) -> &RuleConfig {
        &self.config
    }

    /// Returns the severity findings are reported with.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns the findings reported so far.
    #[must_use]
    pub fn lints(&self) -> &[Lint] {
        &self.lints
    }

    /// Consumes the context, returning its findings.
    #[must_use]
    pub fn into_lints(self) -> Vec<Lint> {
        self.lints
    }
}
