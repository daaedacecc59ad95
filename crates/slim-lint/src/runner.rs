//! Drives linters over documents.
//!
//! The runner owns the parsing engine, the registered linters with their
//! prebuilt visitors, and any external analyzer bridges. Each document is
//! linted independently: a syntax error abandons that document and is
//! reported as a single error from the [`SYNTAX_LINTER`] pseudo-rule.

use std::path::Path;
use std::sync::Arc;

use slim_lint_core::{Lint, LinterConfig, Position, Report, Severity, SourceLocation};
use slim_lint_syntax::{Engine, ParserOptions, SyntaxError, Visitor};
use tracing::{debug, warn};

use crate::document::Document;
use crate::error::SetupError;
use crate::external::AnalyzerBridge;
use crate::linter::{LintContext, Linter};

const RUNNER_TARGET: &str = "slim_lint::runner";

/// Name of the pseudo-rule reporting unparseable templates.
pub const SYNTAX_LINTER: &str = "Syntax";

struct Rule {
    linter: Box<dyn Linter>,
    visitor: Visitor<LintContext>,
}

impl Rule {
    fn name(&self) -> &str {
        self.linter.name()
    }
}

/// Lints templates with a fixed set of rules.
///
/// # Example
///
/// ```
/// use slim_lint::{LinterConfig, ParserOptions, Runner, SYNTAX_LINTER};
///
/// let runner = Runner::new(LinterConfig::default(), ParserOptions::default())?;
/// let report = runner.run([("ok.slim", "p Hi"), ("bad.slim", "p\n  ?oops")]);
/// assert_eq!(report.len(), 1);
/// assert_eq!(report.lints()[0].linter(), SYNTAX_LINTER);
/// assert_eq!(report.lints()[0].filename(), "bad.slim");
/// assert!(report.has_errors());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Runner {
    config: LinterConfig,
    engine: Engine,
    rules: Vec<Rule>,
    bridges: Vec<AnalyzerBridge>,
}

impl Runner {
    /// Creates a runner with no rules.
    ///
    /// # Errors
    ///
    /// Returns a [`SetupError`] when the parser options are invalid.
    pub fn new(config: LinterConfig, options: ParserOptions) -> Result<Self, SetupError> {
        Ok(Self {
            config,
            engine: Engine::new(options)?,
            rules: Vec::new(),
            bridges: Vec::new(),
        })
    }

    /// Registers `linter`, building its visitor once.
    ///
    /// # Errors
    ///
    /// Returns a [`SetupError`] when the visitor cannot be built or the
    /// name is already taken.
    pub fn with_linter(mut self, linter: impl Linter + 'static) -> Result<Self, SetupError> {
        let name = linter.name();
        self.ensure_unique(name)?;
        let visitor = linter
            .visitor()
            .map_err(|error| SetupError::registry(name, error))?;
        self.rules.push(Rule {
            linter: Box::new(linter),
            visitor,
        });
        Ok(self)
    }

    /// Registers an external analyzer bridge.
    ///
    /// # Errors
    ///
    /// Returns a [`SetupError`] when the name is already taken.
    pub fn with_analyzer(mut self, bridge: AnalyzerBridge) -> Result<Self, SetupError> {
        self.ensure_unique(bridge.name())?;
        self.bridges.push(bridge);
        Ok(self)
    }

    fn ensure_unique(&self, name: &str) -> Result<(), SetupError> {
        if self.rule_names().any(|taken| taken == name) {
            return Err(SetupError::DuplicateLinter {
                name: name.to_owned(),
            });
        }
        Ok(())
    }

    /// Returns the names of the registered rules and bridges.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .map(Rule::name)
            .chain(self.bridges.iter().map(AnalyzerBridge::name))
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &LinterConfig {
        &self.config
    }

    /// Lints every `(file, source)` pair into one report.
    pub fn run<'s, I>(&self, sources: I) -> Report
    where
        I: IntoIterator<Item = (&'s str, &'s str)>,
    {
        let mut report = Report::default();
        for (file, source) in sources {
            report.add_file(self.lint_source(file, source));
        }
        debug!(
            target: RUNNER_TARGET,
            files = report.files_inspected(),
            lints = report.len(),
            "lint run finished"
        );
        report
    }

    /// Lints one template.
    #[must_use]
    pub fn lint_source(&self, file: &str, source: &str) -> Vec<Lint> {
        match Document::new(&self.engine, file, source, self.config.skip_frontmatter()) {
            Ok(document) => self.lint_document(&Arc::new(document)),
            Err(error) => {
                warn!(
                    target: RUNNER_TARGET,
                    file,
                    line = error.line(),
                    column = error.column(),
                    %error,
                    "template abandoned after syntax error"
                );
                vec![syntax_lint(file, &error)]
            }
        }
    }

    /// Runs every applicable rule and bridge over a parsed document.
    #[must_use]
    pub fn lint_document(&self, document: &Arc<Document>) -> Vec<Lint> {
        let path = Path::new(document.file());
        let mut lints = Vec::new();
        for rule in &self.rules {
            let name = rule.linter.name();
            let config = self.config.rule(name);
            if !config.enabled() || !config.applies_to(path) {
                debug!(target: RUNNER_TARGET, rule = name, file = document.file(), "rule skipped");
                continue;
            }
            let severity = config
                .severity()
                .unwrap_or_else(|| rule.linter.default_severity());
            let mut context = LintContext::new(name, severity, config, Arc::clone(document));
            rule.visitor.run(&mut context, document.tree());
            lints.extend(context.into_lints());
        }
        for bridge in &self.bridges {
            let config = self.config.rule(bridge.name());
            if config.enabled() && config.applies_to(path) {
                lints.extend(bridge.lint(document, &config));
            }
        }
        lints
    }
}

impl std::fmt::Debug for Runner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runner")
            .field("config", &self.config)
            .field("rules", &self.rule_names().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

/// Converts a syntax error into the lint reported for its document.
#[must_use]
pub fn syntax_lint(file: &str, error: &SyntaxError) -> Lint {
    Lint::new(
        SYNTAX_LINTER,
        file,
        SourceLocation::at(Position::new(error.line(), error.column())),
        error.kind().to_string(),
        Severity::Error,
    )
}
