//! The located nested-list tree that represents a template.
//!
//! A template is a [`Sexp`] whose children are [`Node`]s: either located
//! [`Atom`]s or further lists. The first child of a list is normally a
//! symbol naming its kind, and some kinds are namespaced by a second
//! symbol (`[:html, :tag, ...]`, `[:slim, :control, ...]`).
//!
//! Lists compare equal by structure alone. Their [`fmt::Display`] form
//! mirrors the literal list notation used throughout the documentation,
//! for example `[:html, :tag, "p", [:html, :attrs]]`.

mod atom;

use std::fmt;

use slim_lint_core::{Position, SourceLocation};

pub use self::atom::{Atom, Value};
use crate::matcher::CaptureMap;
use crate::pattern::Pattern;

/// A located list node.
///
/// # Example
///
/// ```
/// use slim_lint_core::Position;
/// use slim_lint_syntax::Sexp;
///
/// let at = Position::new(2, 3);
/// let code = Sexp::tagged(&["code"], at).with_string("end", at, at);
/// assert_eq!(code.head(), Some("code"));
/// assert_eq!(code.to_string(), r#"[:code, "end"]"#);
/// assert_eq!(code.line(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Sexp {
    children: Vec<Node>,
    start: Position,
    finish: Position,
    line: Option<u32>,
}

impl Sexp {
    /// Creates an empty list spanning `start` to `finish`.
    #[must_use]
    pub const fn new(start: Position, finish: Position) -> Self {
        Self {
            children: Vec::new(),
            start,
            finish,
            line: None,
        }
    }

    /// Creates a list from existing children.
    #[must_use]
    pub const fn from_children(children: Vec<Node>, start: Position, finish: Position) -> Self {
        Self {
            children,
            start,
            finish,
            line: None,
        }
    }

    /// Creates a zero-width list whose leading children are the given
    /// symbols, all located at `at`.
    #[must_use]
    pub fn tagged(symbols: &[&'static str], at: Position) -> Self {
        let children = symbols
            .iter()
            .map(|name| Node::Atom(Atom::symbol(*name, at)))
            .collect();
        Self::from_children(children, at, at)
    }

    /// Returns a copy with `node` appended.
    #[must_use]
    pub fn with(mut self, node: impl Into<Node>) -> Self {
        self.push(node);
        self
    }

    /// Returns a copy with a string atom appended.
    #[must_use]
    pub fn with_string(self, text: impl Into<String>, start: Position, finish: Position) -> Self {
        self.with(Atom::new(Value::String(text.into()), start, finish))
    }

    /// Returns a copy with a boolean atom appended.
    #[must_use]
    pub fn with_bool(self, flag: bool, at: Position) -> Self {
        self.with(Atom::new(Value::Bool(flag), at, at))
    }

    /// Appends a child.
    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    /// Returns the children.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Returns the children for in-place rewriting.
    pub fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }

    /// Consumes the list, returning its children.
    #[must_use]
    pub fn into_children(self) -> Vec<Node> {
        self.children
    }

    /// Replaces the children, keeping the span and line.
    #[must_use]
    pub fn replace_children(self, children: Vec<Node>) -> Self {
        Self { children, ..self }
    }

    /// Returns the child at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    /// Returns the child at `index` for in-place rewriting.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.children.get_mut(index)
    }

    /// Iterates over the children.
    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.children.iter()
    }

    /// Returns the number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if the list has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns the leading symbol, if any.
    #[must_use]
    pub fn head(&self) -> Option<&'static str> {
        self.symbol_at(0)
    }

    /// Returns the symbol at `index`, if that child is a symbol atom.
    #[must_use]
    pub fn symbol_at(&self, index: usize) -> Option<&'static str> {
        self.atom_at(index).and_then(|atom| atom.as_symbol())
    }

    /// Returns the string at `index`, if that child is a string atom.
    #[must_use]
    pub fn str_at(&self, index: usize) -> Option<&str> {
        self.atom_at(index).and_then(|atom| atom.as_string())
    }

    /// Returns the flag at `index`, if that child is a boolean atom.
    #[must_use]
    pub fn bool_at(&self, index: usize) -> Option<bool> {
        self.atom_at(index).and_then(|atom| atom.as_bool())
    }

    /// Returns the atom at `index`.
    #[must_use]
    pub fn atom_at(&self, index: usize) -> Option<&Atom> {
        self.children.get(index).and_then(Node::as_atom)
    }

    /// Returns the list at `index`.
    #[must_use]
    pub fn sexp_at(&self, index: usize) -> Option<&Sexp> {
        self.children.get(index).and_then(Node::as_sexp)
    }

    /// Returns `true` if the leading children are exactly the symbols in
    /// `kind`.
    ///
    /// ```
    /// use slim_lint_core::Position;
    /// use slim_lint_syntax::Sexp;
    ///
    /// let tag = Sexp::tagged(&["html", "tag"], Position::START);
    /// assert!(tag.is(&["html", "tag"]));
    /// assert!(tag.is(&["html"]));
    /// assert!(!tag.is(&["html", "attrs"]));
    /// ```
    #[must_use]
    pub fn is(&self, kind: &[&str]) -> bool {
        kind.len() <= self.children.len()
            && kind
                .iter()
                .enumerate()
                .all(|(index, name)| self.symbol_at(index) == Some(*name))
    }

    /// Returns `true` for the `[:newline]` line-break marker.
    #[must_use]
    pub fn is_newline(&self) -> bool {
        self.children.len() == 1 && self.is(&["newline"])
    }

    /// Returns `true` for a `[:static, text]` node.
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.children.len() == 2 && self.is(&["static"]) && self.str_at(1).is_some()
    }

    /// Returns `true` if this list matches `pattern`.
    #[must_use]
    pub fn matches(&self, pattern: &Pattern) -> bool {
        let mut captures = CaptureMap::new();
        self.matches_with(pattern, &mut captures)
    }

    /// Matches `pattern`, recording named captures in `captures`.
    pub fn matches_with<'t>(&'t self, pattern: &Pattern, captures: &mut CaptureMap<'t>) -> bool {
        pattern.matches_node(NodeRef::Sexp(self), captures)
    }

    /// Returns the start position.
    #[must_use]
    pub const fn start(&self) -> Position {
        self.start
    }

    /// Returns the finish position.
    #[must_use]
    pub const fn finish(&self) -> Position {
        self.finish
    }

    /// Updates the span.
    pub const fn set_span(&mut self, start: Position, finish: Position) {
        self.start = start;
        self.finish = finish;
    }

    /// Returns the span as a reportable location.
    #[must_use]
    pub fn location(&self) -> SourceLocation {
        SourceLocation::merge(self.start, self.finish, None)
    }

    /// Returns the template line, falling back to the start line.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line.unwrap_or(self.start.line)
    }

    /// Records the template line.
    pub const fn set_line(&mut self, line: u32) {
        self.line = Some(line);
    }

    /// Returns the recorded line without the start-line fallback.
    #[must_use]
    pub const fn recorded_line(&self) -> Option<u32> {
        self.line
    }
}

impl PartialEq for Sexp {
    fn eq(&self, other: &Self) -> bool {
        self.children == other.children
    }
}

impl Eq for Sexp {}

impl fmt::Display for Sexp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (index, child) in self.children.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            child.fmt(f)?;
        }
        f.write_str("]")
    }
}

impl<'a> IntoIterator for &'a Sexp {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

/// A child of a [`Sexp`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A leaf value.
    Atom(Atom),
    /// A nested list.
    Sexp(Sexp),
}

impl Node {
    /// Borrows the node as a copyable reference.
    #[must_use]
    pub const fn as_node_ref(&self) -> NodeRef<'_> {
        match self {
            Self::Atom(atom) => NodeRef::Atom(atom),
            Self::Sexp(sexp) => NodeRef::Sexp(sexp),
        }
    }

    /// Returns the atom, if this is a leaf.
    #[must_use]
    pub const fn as_atom(&self) -> Option<&Atom> {
        match self {
            Self::Atom(atom) => Some(atom),
            Self::Sexp(_) => None,
        }
    }

    /// Returns the list, if this is not a leaf.
    #[must_use]
    pub const fn as_sexp(&self) -> Option<&Sexp> {
        match self {
            Self::Sexp(sexp) => Some(sexp),
            Self::Atom(_) => None,
        }
    }

    /// Returns the list mutably, if this is not a leaf.
    pub const fn as_sexp_mut(&mut self) -> Option<&mut Sexp> {
        match self {
            Self::Sexp(sexp) => Some(sexp),
            Self::Atom(_) => None,
        }
    }

    /// Consumes the node, returning the list if it is one.
    #[must_use]
    pub fn into_sexp(self) -> Option<Sexp> {
        match self {
            Self::Sexp(sexp) => Some(sexp),
            Self::Atom(_) => None,
        }
    }

    /// Returns the start position.
    #[must_use]
    pub const fn start(&self) -> Position {
        self.as_node_ref().start()
    }

    /// Returns the finish position.
    #[must_use]
    pub const fn finish(&self) -> Position {
        self.as_node_ref().finish()
    }

    /// Returns the template line.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.as_node_ref().line()
    }

    /// Returns `true` if this node matches `pattern`.
    #[must_use]
    pub fn matches(&self, pattern: &Pattern) -> bool {
        let mut captures = CaptureMap::new();
        pattern.matches_node(self.as_node_ref(), &mut captures)
    }
}

impl From<Atom> for Node {
    fn from(atom: Atom) -> Self {
        Self::Atom(atom)
    }
}

impl From<Sexp> for Node {
    fn from(sexp: Sexp) -> Self {
        Self::Sexp(sexp)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atom(atom) => atom.fmt(f),
            Self::Sexp(sexp) => sexp.fmt(f),
        }
    }
}

/// A borrowed view of a node, used by pattern matching and captures.
///
/// Unlike `&Node`, a `NodeRef` can also point at a root [`Sexp`] that is
/// not stored inside a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRef<'t> {
    /// A borrowed leaf.
    Atom(&'t Atom),
    /// A borrowed list.
    Sexp(&'t Sexp),
}

impl<'t> NodeRef<'t> {
    /// Returns the atom, if this is a leaf.
    #[must_use]
    pub const fn as_atom(self) -> Option<&'t Atom> {
        match self {
            Self::Atom(atom) => Some(atom),
            Self::Sexp(_) => None,
        }
    }

    /// Returns the list, if this is not a leaf.
    #[must_use]
    pub const fn as_sexp(self) -> Option<&'t Sexp> {
        match self {
            Self::Sexp(sexp) => Some(sexp),
            Self::Atom(_) => None,
        }
    }

    /// Returns the string value, if this is a string atom.
    #[must_use]
    pub fn as_str(self) -> Option<&'t str> {
        self.as_atom().and_then(|atom| atom.value().as_string())
    }

    /// Returns the start position.
    #[must_use]
    pub const fn start(self) -> Position {
        match self {
            Self::Atom(atom) => atom.start(),
            Self::Sexp(sexp) => sexp.start(),
        }
    }

    /// Returns the finish position.
    #[must_use]
    pub const fn finish(self) -> Position {
        match self {
            Self::Atom(atom) => atom.finish(),
            Self::Sexp(sexp) => sexp.finish(),
        }
    }

    /// Returns the template line.
    #[must_use]
    pub fn line(self) -> u32 {
        match self {
            Self::Atom(atom) => atom.line(),
            Self::Sexp(sexp) => sexp.line(),
        }
    }

    /// Returns the span as a reportable location.
    #[must_use]
    pub fn location(self) -> SourceLocation {
        SourceLocation::merge(self.start(), self.finish(), None)
    }

    /// Clones the referenced node.
    #[must_use]
    pub fn to_node(self) -> Node {
        match self {
            Self::Atom(atom) => Node::Atom(atom.clone()),
            Self::Sexp(sexp) => Node::Sexp(sexp.clone()),
        }
    }
}

impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Atom(atom) => atom.fmt(f),
            Self::Sexp(sexp) => sexp.fmt(f),
        }
    }
}
