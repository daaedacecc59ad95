//! Capture maps for pattern matching.
//!
//! Captures bind names to the subtrees that named matchers accepted.

use std::collections::HashMap;
use std::ops::Index;

use crate::sexp::NodeRef;

/// Named subtrees bound while matching one pattern against one node.
///
/// A fresh map is used for every pattern test, so bindings never leak
/// between patterns or nodes.
#[derive(Debug, Clone, Default)]
pub struct CaptureMap<'t> {
    captures: HashMap<String, NodeRef<'t>>,
}

impl<'t> CaptureMap<'t> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `node`, replacing any earlier binding.
    pub fn insert(&mut self, name: impl Into<String>, node: NodeRef<'t>) {
        self.captures.insert(name.into(), node);
    }

    /// Returns the node bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<NodeRef<'t>> {
        self.captures.get(name).copied()
    }

    /// Returns `true` if `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.captures.contains_key(name)
    }

    /// Returns the bound names in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.captures.keys().map(String::as_str)
    }

    /// Returns the number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.captures.len()
    }

    /// Returns `true` if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }

    /// Drops every binding.
    pub fn clear(&mut self) {
        self.captures.clear();
    }
}

impl<'t> Index<&str> for CaptureMap<'t> {
    type Output = NodeRef<'t>;

    /// Returns the node bound to `name`.
    ///
    /// # Panics
    ///
    /// Panics if `name` is not bound. Use [`CaptureMap::get`] when a
    /// binding is optional.
    fn index(&self, name: &str) -> &NodeRef<'t> {
        match self.captures.get(name) {
            Some(node) => node,
            None => panic!("unknown capture `{name}`"),
        }
    }
}
