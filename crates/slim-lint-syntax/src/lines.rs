//! Line number injection.
//!
//! The parser emits one `[:newline]` marker per physical line, so the line
//! of any node is one plus the number of markers that precede it in a
//! depth-first, left-to-right walk. Newline characters inside text are
//! not counted; their lines already have markers of their own.

use crate::sexp::{Node, Sexp};

/// Records a line number on every node of `root`.
///
/// Line numbers never decrease along a left-to-right scan of siblings,
/// and a marker carries the line it terminates.
///
/// # Example
///
/// ```
/// use slim_lint_syntax::{Parser, ParserOptions, convert, inject_lines};
///
/// let raw = Parser::new(ParserOptions::default())?.parse("p\n\nspan")?;
/// let mut tree = convert(&raw);
/// inject_lines(&mut tree);
/// let span = tree
///     .iter()
///     .filter_map(|node| node.as_sexp())
///     .find(|sexp| sexp.is(&["html", "tag"]) && sexp.str_at(2) == Some("span"));
/// assert_eq!(span.map(|sexp| sexp.line()), Some(3));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn inject_lines(root: &mut Sexp) {
    let mut line = 1;
    visit(root, &mut line);
}

fn visit(sexp: &mut Sexp, line: &mut u32) {
    sexp.set_line(*line);
    if sexp.is_newline() {
        for child in sexp.children_mut() {
            if let Node::Atom(atom) = child {
                atom.set_line(*line);
            }
        }
        *line = line.saturating_add(1);
        return;
    }
    for child in sexp.children_mut() {
        match child {
            Node::Atom(atom) => atom.set_line(*line),
            Node::Sexp(nested) => visit(nested, line),
        }
    }
}
