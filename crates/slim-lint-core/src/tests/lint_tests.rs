//! Tests for [`Lint`] and [`Severity`].

use rstest::rstest;

use crate::{Lint, Severity, SourceLocation};

fn sample_lint(severity: Severity) -> Lint {
    Lint::new(
        "LineLength",
        "app/views/show.html.slim",
        SourceLocation::from_line(12),
        "Line is too long. [94/80]",
        severity,
    )
}

#[rstest]
#[case("warning", Severity::Warning)]
#[case("WARNING", Severity::Warning)]
#[case("w", Severity::Warning)]
#[case("error", Severity::Error)]
#[case(" e ", Severity::Error)]
fn severity_parses_known_names(#[case] input: &str, #[case] expected: Severity) {
    assert_eq!(input.parse::<Severity>().expect("severity"), expected);
}

#[test]
fn severity_rejects_unknown_names() {
    let error = "fatal".parse::<Severity>().expect_err("should fail");
    assert_eq!(error.to_string(), "unknown severity: fatal");
}

#[test]
fn severity_serialises_in_snake_case() {
    let json = serde_json::to_string(&Severity::Error).expect("serialize");
    assert_eq!(json, "\"error\"");
}

#[test]
fn lint_accessors() {
    let lint = sample_lint(Severity::Error);
    assert_eq!(lint.linter(), "LineLength");
    assert_eq!(lint.filename(), "app/views/show.html.slim");
    assert_eq!(lint.location().line(), 12);
    assert_eq!(lint.message(), "Line is too long. [94/80]");
    assert!(lint.is_error());
}

#[test]
fn lint_display_includes_location_and_rule() {
    let lint = sample_lint(Severity::Warning);
    assert_eq!(
        lint.to_string(),
        "app/views/show.html.slim:12 [warning] LineLength: Line is too long. [94/80]"
    );
}

#[test]
fn lint_serde_round_trip() {
    let lint = sample_lint(Severity::Warning);
    let json = serde_json::to_string(&lint).expect("serialize");
    let deserialized: Lint = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(deserialized, lint);
}
