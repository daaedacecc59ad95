//! Conversion from the parser's arena into owned located trees.

use crate::parser::{ListId, RawNode, RawTree};
use crate::sexp::{Atom, Node, Sexp};

/// Converts a parsed [`RawTree`] into a [`Sexp`].
///
/// Atoms keep their recorded spans. A list finishes at the later of its
/// own recorded finish and the finish of its last child, so containers
/// always cover their contents.
///
/// # Example
///
/// ```
/// use slim_lint_syntax::{Parser, ParserOptions, convert};
///
/// let raw = Parser::new(ParserOptions::default())?.parse("p\n  | Hi")?;
/// let tree = convert(&raw);
/// assert_eq!(tree.finish().line, 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
pub fn convert(tree: &RawTree) -> Sexp {
    convert_list(tree, tree.root())
}

fn convert_list(tree: &RawTree, id: ListId) -> Sexp {
    let Some(list) = tree.list(id) else {
        return Sexp::default();
    };
    let children: Vec<Node> = list
        .items()
        .iter()
        .map(|item| match item {
            RawNode::Atom(atom) => Node::Atom(Atom::new(
                atom.value().clone(),
                atom.start(),
                atom.finish(),
            )),
            RawNode::List(child) => Node::Sexp(convert_list(tree, *child)),
        })
        .collect();
    let finish = children
        .last()
        .map(Node::finish)
        .into_iter()
        .chain(list.finish())
        .fold(list.start(), Ord::max);
    Sexp::from_children(children, list.start(), finish)
}
