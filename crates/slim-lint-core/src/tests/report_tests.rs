//! Tests for [`Report`].

use crate::{Lint, Position, Report, Severity, SourceLocation};

fn lint_at(file: &str, line: u32, column: u32, severity: Severity) -> Lint {
    Lint::new(
        "Rule",
        file,
        SourceLocation::at(Position::new(line, column)),
        "message",
        severity,
    )
}

#[test]
fn report_orders_by_file_then_position() {
    let report = Report::new(vec![
        lint_at("b.slim", 1, 1, Severity::Warning),
        lint_at("a.slim", 3, 5, Severity::Warning),
        lint_at("a.slim", 3, 2, Severity::Warning),
        lint_at("a.slim", 1, 9, Severity::Warning),
    ]);

    let order: Vec<(&str, u32, u32)> = report
        .lints()
        .iter()
        .map(|lint| (lint.filename(), lint.location().line(), lint.location().column()))
        .collect();
    assert_eq!(
        order,
        vec![("a.slim", 1, 9), ("a.slim", 3, 2), ("a.slim", 3, 5), ("b.slim", 1, 1)]
    );
}

#[test]
fn add_file_counts_inspected_files_even_without_lints() {
    let mut report = Report::default();
    report.add_file(Vec::new());
    report.add_file(vec![lint_at("x.slim", 2, 1, Severity::Error)]);

    assert_eq!(report.files_inspected(), 2);
    assert_eq!(report.len(), 1);
    assert!(report.has_errors());
}

#[test]
fn count_by_severity() {
    let report = Report::new(vec![
        lint_at("a.slim", 1, 1, Severity::Warning),
        lint_at("a.slim", 2, 1, Severity::Error),
        lint_at("a.slim", 3, 1, Severity::Warning),
    ]);
    assert_eq!(report.count(Severity::Warning), 2);
    assert_eq!(report.count(Severity::Error), 1);
}

#[test]
fn empty_report_has_no_errors() {
    let report = Report::default();
    assert!(report.is_empty());
    assert!(!report.has_errors());
}
