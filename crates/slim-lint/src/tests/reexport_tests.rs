//! Tests verifying that the stable types are reachable through the
//! `slim_lint` facade.
//!
//! These are primarily compile-time checks: if a re-export goes missing,
//! this module fails to compile.

use crate::{
    Atom, Engine, ErrorKind, LineMap, Lint, LinterConfig, ParserOptions, Pattern, Position,
    Report, RubyExtractor, RuleConfig, Severity, Sexp, SourceLocation, Value, pattern,
};

#[test]
fn position_types_are_accessible() {
    let location = SourceLocation::merge(Position::new(1, 2), Position::new(1, 6), None);
    assert_eq!(location.length(), Some(4));
}

#[test]
fn tree_types_are_accessible() {
    let at = Position::START;
    let code = Sexp::tagged(&["code"], at).with_string("x", at, at);
    assert!(code.matches(&pattern![:code, "x"]));
    assert!(!code.matches(&Pattern::nothing()));
    assert_eq!(Atom::new(Value::from("x"), at, at), Value::from("x"));
}

#[test]
fn pipeline_types_are_accessible() {
    let tree = Engine::new(ParserOptions::default())
        .expect("default options are valid")
        .call("p Hi", None)
        .expect("template normalizes");
    assert_eq!(tree.head(), Some("multi"));

    let extracted = RubyExtractor::new(ParserOptions::default())
        .expect("default options are valid")
        .extract("p Hi", None)
        .expect("template extracts");
    let pairs: Vec<(u32, u32)> = extracted.line_map().iter().collect();
    assert_eq!(pairs, vec![(1, 1), (2, 1)]);
    assert!(LineMap::default().is_empty());
}

#[test]
fn error_kinds_are_accessible() {
    assert_eq!(ErrorKind::ExplicitEnd.to_string(), "Explicit end statements are forbidden");
}

#[test]
fn report_types_are_accessible() {
    let report = Report::new(vec![Lint::new(
        "Rule",
        "a.slim",
        SourceLocation::from_line(1),
        "message",
        Severity::Warning,
    )]);
    assert_eq!(report.count(Severity::Warning), 1);
    assert!(LinterConfig::default().rule("Rule").enabled());
    assert!(RuleConfig::default().enabled());
}
