//! Unit tests for `slim_lint_syntax`.

mod parser_tests;
mod visitor_tests;

mod behaviour;

use crate::{Engine, Parser, ParserOptions, Sexp, convert, inject_lines};

/// Parses `source` with default options, then converts and numbers it.
fn parse(source: &str) -> Sexp {
    let raw = Parser::new(ParserOptions::default())
        .expect("default options are valid")
        .parse(source)
        .expect("template parses");
    let mut tree = convert(&raw);
    inject_lines(&mut tree);
    tree
}

/// Runs the normalization pipeline with default options.
fn normalize(source: &str) -> Sexp {
    Engine::new(ParserOptions::default())
        .expect("default options are valid")
        .call(source, None)
        .expect("template normalizes")
}

/// Collects every list in `tree` satisfying `predicate`, in pre-order.
fn find_all<'t>(tree: &'t Sexp, predicate: &dyn Fn(&Sexp) -> bool) -> Vec<&'t Sexp> {
    let mut found = Vec::new();
    collect(tree, predicate, &mut found);
    found
}

fn collect<'t>(sexp: &'t Sexp, predicate: &dyn Fn(&Sexp) -> bool, found: &mut Vec<&'t Sexp>) {
    if predicate(sexp) {
        found.push(sexp);
    }
    for child in sexp {
        if let Some(nested) = child.as_sexp() {
            collect(nested, predicate, found);
        }
    }
}

/// Returns the first `[:html, :tag, name]` in `tree`.
fn tag<'t>(tree: &'t Sexp, name: &str) -> &'t Sexp {
    find_all(tree, &|sexp| sexp.is(&["html", "tag"]) && sexp.str_at(2) == Some(name))
        .into_iter()
        .next()
        .expect("tag should be present")
}
