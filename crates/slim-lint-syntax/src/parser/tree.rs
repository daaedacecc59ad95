//! Arena-backed tree built while parsing.
//!
//! The parser appends to lists that are still open further up its stack
//! while also holding handles to them, so lists live in a flat arena and
//! refer to each other through [`ListId`] handles. Conversion into the
//! owned [`Sexp`](crate::Sexp) form happens once parsing is complete.

use slim_lint_core::Position;

use crate::sexp::Value;

/// Handle to a list stored in a [`RawTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListId(usize);

/// A located leaf in a [`RawTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawAtom {
    value: Value,
    start: Position,
    finish: Position,
}

impl RawAtom {
    /// Returns the value.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
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
}

/// An entry in a raw list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawNode {
    /// A leaf value.
    Atom(RawAtom),
    /// A reference to another list in the same arena.
    List(ListId),
}

impl RawNode {
    /// Creates a leaf spanning `start` to `finish`.
    #[must_use]
    pub const fn atom(value: Value, start: Position, finish: Position) -> Self {
        Self::Atom(RawAtom {
            value,
            start,
            finish,
        })
    }

    /// Creates a zero-width symbol leaf.
    #[must_use]
    pub const fn symbol(name: &'static str, at: Position) -> Self {
        Self::atom(Value::Symbol(name), at, at)
    }

    /// Creates a string leaf.
    #[must_use]
    pub fn string(text: impl Into<String>, start: Position, finish: Position) -> Self {
        Self::atom(Value::String(text.into()), start, finish)
    }
}

/// A list under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawList {
    items: Vec<RawNode>,
    start: Position,
    finish: Option<Position>,
}

impl RawList {
    /// Returns the entries.
    #[must_use]
    pub fn items(&self) -> &[RawNode] {
        &self.items
    }

    /// Returns the start position.
    #[must_use]
    pub const fn start(&self) -> Position {
        self.start
    }

    /// Returns the explicitly recorded finish, if any.
    #[must_use]
    pub const fn finish(&self) -> Option<Position> {
        self.finish
    }
}

/// The flat list arena produced by the parser.
///
/// The root list always exists and has the handle returned by
/// [`RawTree::root`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTree {
    lists: Vec<RawList>,
}

impl RawTree {
    /// Creates a tree whose root is an empty `[:multi]` at `start`.
    #[must_use]
    pub fn new(start: Position) -> Self {
        Self {
            lists: vec![RawList {
                items: vec![RawNode::symbol("multi", start)],
                start,
                finish: None,
            }],
        }
    }

    /// Returns the root handle.
    #[must_use]
    pub const fn root(&self) -> ListId {
        ListId(0)
    }

    /// Returns the list behind `id`.
    #[must_use]
    pub fn list(&self, id: ListId) -> Option<&RawList> {
        self.lists.get(id.0)
    }

    /// Returns the number of lists in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lists.len()
    }

    /// Returns `true` if only the root exists and it holds nothing but its
    /// head symbol.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lists.len() == 1 && self.lists.first().is_some_and(|root| root.items.len() <= 1)
    }

    /// Allocates a detached list starting at `start`.
    pub(crate) fn open(&mut self, start: Position, items: Vec<RawNode>) -> ListId {
        self.lists.push(RawList {
            items,
            start,
            finish: None,
        });
        ListId(self.lists.len() - 1)
    }

    /// Allocates a list whose leading items are the symbols in `kind`.
    pub(crate) fn open_tagged(&mut self, kind: &[&'static str], start: Position) -> ListId {
        let items = kind
            .iter()
            .map(|name| RawNode::symbol(*name, start))
            .collect();
        self.open(start, items)
    }

    /// Appends `node` to the list behind `id`.
    pub(crate) fn push(&mut self, id: ListId, node: RawNode) {
        if let Some(list) = self.lists.get_mut(id.0) {
            list.items.push(node);
        }
    }

    /// Appends a reference to `child` to the list behind `parent`.
    pub(crate) fn push_list(&mut self, parent: ListId, child: ListId) {
        self.push(parent, RawNode::List(child));
    }

    /// Records the finish position of the list behind `id`.
    pub(crate) fn close(&mut self, id: ListId, finish: Position) {
        if let Some(list) = self.lists.get_mut(id.0) {
            list.finish = Some(finish);
        }
    }
}
