//! Keyword rules shared by the block passes.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::sexp::{Node, Sexp};

macro_rules! static_regex {
    ($name:ident, $pattern:expr) => {
        #[expect(
            clippy::expect_used,
            reason = "constant expressions are exercised by the filter tests"
        )]
        pub(super) static $name: Lazy<Regex> =
            Lazy::new(|| Regex::new($pattern).expect("static expression compiles"));
    };
}

static_regex!(
    BLOCK_OPENER,
    r"^(?:if|unless|else|elsif|when|in|begin|rescue|ensure|case|while|until|for)\b|\bdo\s*(?:\|[^|]*\|)?\s*$"
);
static_regex!(CONTINUATION, r"^(?:else|elsif|when|in|rescue|ensure)\b");
static_regex!(EXPLICIT_END, r"^end\b");

/// Index of the code string in a control or output statement.
pub(super) fn code_index(statement: &Sexp) -> Option<usize> {
    if statement.is(&["slim", "control"]) {
        Some(2)
    } else if statement.is(&["slim", "output"]) {
        Some(3)
    } else {
        None
    }
}

/// Returns the trimmed code of a control or output statement.
pub(super) fn statement_code(statement: &Sexp) -> Option<&str> {
    code_index(statement)
        .and_then(|index| statement.str_at(index))
        .map(str::trim)
}

/// Returns the body of a control or output statement.
pub(super) fn statement_body(statement: &Sexp) -> Option<&Sexp> {
    code_index(statement).and_then(|index| statement.sexp_at(index + 1))
}

/// Returns `true` if `code` reads as the start of a block.
pub(super) fn is_block_opener(code: &str) -> bool {
    BLOCK_OPENER.is_match(code.trim())
}

/// Returns `true` for a list that holds nothing but grouping wrappers and
/// line markers.
///
/// ```
/// use slim_lint_core::Position;
/// use slim_lint_syntax::Sexp;
/// use slim_lint_syntax::filters::is_empty_exp;
///
/// let at = Position::START;
/// let body = Sexp::tagged(&["multi"], at).with(Sexp::tagged(&["newline"], at));
/// assert!(is_empty_exp(&body));
/// assert!(!is_empty_exp(&body.with(Sexp::tagged(&["static"], at).with_string("x", at, at))));
/// ```
#[must_use]
pub fn is_empty_exp(sexp: &Sexp) -> bool {
    match sexp.head() {
        Some("multi") => sexp
            .iter()
            .skip(1)
            .all(|child| child.as_sexp().is_some_and(is_empty_exp)),
        Some("newline" | "indent" | "outdent") => sexp.len() == 1,
        _ => false,
    }
}

/// Returns `true` if a control or output statement opens a block: its
/// code reads as an opener or its body holds content.
#[must_use]
pub fn opens_block(statement: &Sexp) -> bool {
    let Some(code) = statement_code(statement) else {
        return false;
    };
    is_block_opener(code) || statement_body(statement).is_some_and(|body| !is_empty_exp(body))
}

/// Returns the statement behind `node` if it is a control or output
/// statement.
pub(super) fn as_statement(node: &Node) -> Option<&Sexp> {
    node.as_sexp().filter(|sexp| code_index(sexp).is_some())
}
