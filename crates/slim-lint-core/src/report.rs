//! Aggregated results of a lint run.

use serde::{Deserialize, Serialize};

use crate::lint::{Lint, Severity};

/// The lints collected over one run, ordered by file and location.
///
/// The report is what the (external) rendering layer consumes: it never
/// reorders or filters lints on its own beyond the stable ordering applied
/// when lints are added.
///
/// # Example
///
/// ```
/// use slim_lint_core::{Lint, Report, Severity, SourceLocation};
///
/// let report = Report::new(vec![
///     Lint::new("B", "b.slim", SourceLocation::from_line(1), "later file", Severity::Warning),
///     Lint::new("A", "a.slim", SourceLocation::from_line(9), "earlier file", Severity::Error),
/// ]);
/// assert_eq!(report.lints()[0].filename(), "a.slim");
/// assert!(report.has_errors());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    lints: Vec<Lint>,
    files: usize,
}

impl Report {
    /// Creates a report from an unordered list of lints.
    #[must_use]
    pub fn new(lints: Vec<Lint>) -> Self {
        let mut report = Self { lints, files: 0 };
        report.sort();
        report
    }

    /// Adds the lints found for one inspected file.
    pub fn add_file(&mut self, lints: impl IntoIterator<Item = Lint>) {
        self.files = self.files.saturating_add(1);
        self.lints.extend(lints);
        self.sort();
    }

    fn sort(&mut self) {
        self.lints.sort_by(|left, right| {
            (left.filename(), left.location().start())
                .cmp(&(right.filename(), right.location().start()))
        });
    }

    /// Returns the lints in report order.
    #[must_use]
    pub fn lints(&self) -> &[Lint] {
        &self.lints
    }

    /// Consumes the report, returning its lints.
    #[must_use]
    pub fn into_lints(self) -> Vec<Lint> {
        self.lints
    }

    /// Returns the number of files added through [`Report::add_file`].
    #[must_use]
    pub const fn files_inspected(&self) -> usize {
        self.files
    }

    /// Returns `true` if the report holds no lints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lints.is_empty()
    }

    /// Returns the number of lints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lints.len()
    }

    /// Returns `true` if any lint has error severity.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.lints.iter().any(Lint::is_error)
    }

    /// Returns the number of lints with the given severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.lints
            .iter()
            .filter(|lint| lint.severity() == severity)
            .count()
    }
}
