//! Bridge to an external Ruby analyzer.
//!
//! The bridge extracts Ruby source from a template, hands it to an
//! [`ExternalAnalyzer`], and maps every reported line back to the template
//! through the extractor's line map. Offenses on generated lines without a
//! template line are dropped.

use slim_lint_core::{Lint, RuleConfig, Severity, SourceLocation};
use slim_lint_syntax::{LineMap, ParserOptions, RubyExtractor};
use tracing::{debug, warn};

use crate::document::Document;
use crate::error::{AnalyzerError, SetupError};

const BRIDGE_TARGET: &str = "slim_lint::external";

/// A finding reported by an external analyzer against extracted source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalOffense {
    /// 1-based line in the extracted source.
    pub line: u32,
    /// 1-based column in the extracted source.
    pub column: u32,
    /// Human-readable description.
    pub message: String,
    /// Severity assigned by the analyzer.
    pub severity: Severity,
    /// Name of the analyzer check that fired.
    pub cop: String,
}

impl ExternalOffense {
    /// Creates a warning-severity offense.
    #[must_use]
    pub fn new(line: u32, column: u32, cop: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
            severity: Severity::Warning,
            cop: cop.into(),
        }
    }

    /// Returns a copy with the given severity.
    #[must_use]
    pub const fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

/// An analyzer that inspects Ruby source.
///
/// Invoking the analyzer, whether in process or as a child process, is
/// the implementor's concern.
pub trait ExternalAnalyzer: Send + Sync {
    /// Inspects the Ruby `source` extracted from `file`.
    ///
    /// # Errors
    ///
    /// Returns an [`AnalyzerError`] when the analyzer cannot run.
    fn analyze(&self, file: &str, source: &str) -> Result<Vec<ExternalOffense>, AnalyzerError>;
}

/// Runs an [`ExternalAnalyzer`] as a lint rule.
///
/// # Example
///
/// ```
/// use slim_lint::{
///     AnalyzerBridge, AnalyzerError, Document, Engine, ExternalAnalyzer, ExternalOffense,
///     ParserOptions, RuleConfig,
/// };
///
/// struct FlagEveryLine;
///
/// impl ExternalAnalyzer for FlagEveryLine {
///     fn analyze(&self, _file: &str, source: &str) -> Result<Vec<ExternalOffense>, AnalyzerError> {
///         Ok((1..=source.lines().count() as u32)
///             .map(|line| ExternalOffense::new(line, 1, "Demo", "flagged"))
///             .collect())
///     }
/// }
///
/// let bridge = AnalyzerBridge::new("RuboCop", ParserOptions::default(), FlagEveryLine)?;
/// let engine = Engine::new(ParserOptions::default())?;
/// let document = Document::new(&engine, "a.slim", "p\n- x = 1", false)?;
/// let lines: Vec<u32> = bridge
///     .lint(&document, &RuleConfig::default())
///     .iter()
///     .map(|lint| lint.location().line())
///     .collect();
/// assert_eq!(lines, vec![1, 2]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct AnalyzerBridge {
    name: String,
    extractor: RubyExtractor,
    analyzer: Box<dyn ExternalAnalyzer>,
}

impl AnalyzerBridge {
    /// Creates a bridge reporting under the rule `name`.
    ///
    /// # Errors
    ///
    /// Returns a [`SetupError`] when the extractor cannot be built from
    /// `options`.
    pub fn new(
        name: impl Into<String>,
        options: ParserOptions,
        analyzer: impl ExternalAnalyzer + 'static,
    ) -> Result<Self, SetupError> {
        Ok(Self {
            name: name.into(),
            extractor: RubyExtractor::new(options)?,
            analyzer: Box::new(analyzer),
        })
    }

    /// Returns the rule name findings are reported under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Extracts `document`, analyzes the result and maps the offenses
    /// back to template lines.
    ///
    /// A failing analyzer yields a single error-severity lint on line 1.
    #[must_use]
    pub fn lint(&self, document: &Document, config: &RuleConfig) -> Vec<Lint> {
        let extracted = match self.extractor.extract(document.source(), Some(document.file())) {
            Ok(extracted) => extracted,
            Err(error) => {
                warn!(
                    target: BRIDGE_TARGET,
                    rule = self.name.as_str(),
                    file = document.file(),
                    %error,
                    "extraction failed"
                );
                return Vec::new();
            }
        };
        let (source, line_map) = extracted.into_parts();
        if source.is_empty() {
            return Vec::new();
        }
        match self.analyzer.analyze(document.file(), &source) {
            Ok(offenses) => self.translate(document, config, &line_map, offenses),
            Err(error) => {
                warn!(
                    target: BRIDGE_TARGET,
                    rule = self.name.as_str(),
                    file = document.file(),
                    %error,
                    "external analyzer failed"
                );
                vec![Lint::new(
                    self.name.as_str(),
                    document.file(),
                    SourceLocation::from_line(1),
                    error.to_string(),
                    Severity::Error,
                )]
            }
        }
    }

    fn translate(
        &self,
        document: &Document,
        config: &RuleConfig,
        line_map: &LineMap,
        offenses: Vec<ExternalOffense>,
    ) -> Vec<Lint> {
        let reported = offenses.len();
        let lints: Vec<Lint> = offenses
            .into_iter()
            .filter_map(|offense| {
                let line = line_map.original_line(offense.line)?;
                Some(Lint::new(
                    self.name.as_str(),
                    document.file(),
                    SourceLocation::from_line(line),
                    format!("{}: {}", offense.cop, offense.message),
                    config.severity().unwrap_or(offense.severity),
                ))
            })
            .collect();
        debug!(
            target: BRIDGE_TARGET,
            rule = self.name.as_str(),
            file = document.file(),
            reported,
            dropped = reported.saturating_sub(lints.len()),
            "external offenses mapped"
        );
        lints
    }
}

impl std::fmt::Debug for AnalyzerBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyzerBridge")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
