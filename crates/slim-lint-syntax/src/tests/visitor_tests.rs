//! Tests for pattern-driven traversal.

use slim_lint_core::Position;

use super::normalize;
use crate::{Flow, Pattern, RegistryError, Sexp, Visitor, VisitorBuilder, capture, pattern};

fn leaf(kind: &'static str, value: &str) -> Sexp {
    let at = Position::START;
    Sexp::tagged(&[kind], at).with_string(value, at, at)
}

fn statements(values: &[&str]) -> Sexp {
    values
        .iter()
        .fold(Sexp::tagged(&["multi"], Position::START), |multi, value| {
            multi.with(leaf("stmt", value))
        })
}

fn count_matches(visitor: &Visitor<usize>, tree: &Sexp) -> usize {
    let mut hits = 0;
    visitor.run(&mut hits, tree);
    hits
}

#[test]
fn tag_pattern_requires_the_class_attribute() {
    let visitor = VisitorBuilder::<usize>::new()
        .on(
            pattern![:html, :tag, "div", [:html, :attrs, [:html, :attr, "class"]]],
            |hits, _, _| {
                *hits += 1;
                Flow::Continue
            },
        )
        .build()
        .expect("visitor builds");
    assert_eq!(count_matches(&visitor, &normalize("div class=\"a\"")), 1);
    assert_eq!(count_matches(&visitor, &normalize("div id=\"b\"")), 0);
    assert_eq!(count_matches(&visitor, &normalize("span class=\"a\"")), 0);
}

#[test]
fn captures_are_fresh_for_every_node() {
    let visitor = VisitorBuilder::<Vec<String>>::new()
        .on(
            pattern![:stmt, {capture("body", Pattern::anything())}],
            |seen, _, visit| {
                let body = visit.capture("body").and_then(|node| node.as_str());
                seen.push(body.unwrap_or("<none>").to_owned());
                Flow::Continue
            },
        )
        .build()
        .expect("visitor builds");
    let mut seen = Vec::new();
    visitor.run(&mut seen, &statements(&["a", "b", "c"]));
    assert_eq!(seen, vec!["a", "b", "c"]);
}

#[test]
fn failed_patterns_leave_no_captures_behind() {
    let visitor = VisitorBuilder::<Vec<bool>>::new()
        .on(
            pattern![:stmt, {capture("body", Pattern::anything())}, "never"],
            |_, _, _| Flow::Continue,
        )
        .on(
            pattern![:stmt, {capture("other", Pattern::anything())}],
            |stale, _, visit| {
                stale.push(visit.captures().contains("body"));
                Flow::Continue
            },
        )
        .build()
        .expect("visitor builds");
    let mut stale = Vec::new();
    visitor.run(&mut stale, &statements(&["a", "b"]));
    assert_eq!(stale, vec![false, false]);
}

#[test]
fn first_matching_pattern_wins() {
    let visitor = VisitorBuilder::<Vec<&'static str>>::new()
        .on(pattern![:stmt], |fired, _, _| {
            fired.push("first");
            Flow::Continue
        })
        .on(pattern![:stmt, "a"], |fired, _, _| {
            fired.push("second");
            Flow::Continue
        })
        .build()
        .expect("visitor builds");
    let mut fired = Vec::new();
    visitor.run(&mut fired, &statements(&["a"]));
    assert_eq!(fired, vec!["first"]);
}

#[test]
fn stop_skips_children_but_not_siblings() {
    let tree = normalize("div\n  p inner\np outer");
    let visitor = VisitorBuilder::<Vec<String>>::new()
        .on(pattern![:html, :tag, "div"], |_, _, _| Flow::Stop)
        .on(pattern![:html, :tag, "p"], |seen, sexp, _| {
            seen.push(sexp.line().to_string());
            Flow::Continue
        })
        .build()
        .expect("visitor builds");
    let mut seen = Vec::new();
    visitor.run(&mut seen, &tree);
    assert_eq!(seen, vec!["3"]);
}

#[test]
fn descend_redirects_traversal() {
    let at = Position::START;
    let tree = Sexp::tagged(&["multi"], at).with(
        Sexp::tagged(&["wrap"], at)
            .with(leaf("leaf", "skipped"))
            .with(leaf("leaf", "kept")),
    );
    let visitor = VisitorBuilder::<Vec<String>>::new()
        .on(pattern![:wrap], |seen, sexp, visit| {
            if let Some(last) = sexp.sexp_at(2) {
                visit.descend(seen, last);
            }
            Flow::Continue
        })
        .on(
            pattern![:leaf, {capture("value", Pattern::anything())}],
            |seen, _, visit| {
                if let Some(value) = visit.capture("value").and_then(|node| node.as_str()) {
                    seen.push(value.to_owned());
                }
                Flow::Continue
            },
        )
        .build()
        .expect("visitor builds");
    let mut seen = Vec::new();
    visitor.run(&mut seen, &tree);
    assert_eq!(seen, vec!["kept"]);
}

#[derive(Default)]
struct Counts {
    starts: usize,
    statements: usize,
}

#[test]
fn start_callback_runs_once_per_document() {
    let visitor = VisitorBuilder::<Counts>::new()
        .on_start(|counts, _| counts.starts += 1)
        .on(pattern![:stmt], |counts, _, _| {
            counts.statements += 1;
            Flow::Continue
        })
        .build()
        .expect("visitor builds");
    let mut counts = Counts::default();
    visitor.run(&mut counts, &statements(&["a", "b"]));
    visitor.clone().run(&mut counts, &statements(&["c"]));
    assert_eq!((counts.starts, counts.statements), (2, 3));
}

#[test]
fn start_callback_alone_is_a_valid_visitor() {
    let visitor = VisitorBuilder::<usize>::new()
        .on_start(|seen, _| *seen += 1)
        .build()
        .expect("visitor builds");
    assert!(visitor.is_empty());
    assert_eq!(count_matches(&visitor, &statements(&["a"])), 1);
}

#[test]
fn empty_registry_is_rejected() {
    let error = Visitor::<()>::builder().build().expect_err("empty registry");
    assert_eq!(error, RegistryError::Empty);
}

#[test]
fn duplicate_capture_names_are_rejected() {
    let error = VisitorBuilder::<()>::new()
        .on(
            pattern![
                :stmt,
                {capture("x", Pattern::anything())},
                {capture("x", Pattern::anything())}
            ],
            |_, _, _| Flow::Continue,
        )
        .build()
        .expect_err("duplicate capture");
    assert_eq!(
        error,
        RegistryError::DuplicateCapture {
            name: "x".to_owned()
        }
    );
}

#[test]
fn nested_duplicate_captures_are_rejected() {
    let nested = capture("x", capture("x", Pattern::anything()));
    let result = VisitorBuilder::<()>::new()
        .on(pattern![:stmt, {nested}], |_, _, _| Flow::Continue)
        .build();
    assert!(matches!(result, Err(RegistryError::DuplicateCapture { .. })));
}
