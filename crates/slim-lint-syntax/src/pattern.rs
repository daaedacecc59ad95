//! Structural patterns over template trees.
//!
//! A [`Pattern`] is a literal value, a positional list of sub-patterns, or
//! an embedded [`Matcher`]. List patterns match by prefix: each pattern
//! element must match the child at the same index, and any children past
//! the end of the pattern are ignored.
//!
//! The [`pattern!`](crate::pattern!) macro spells list patterns the way
//! trees print:
//!
//! ```
//! use slim_lint_syntax::{Pattern, pattern};
//!
//! let tag = pattern![:html, :tag, "div", [:html, :attrs, [:html, :attr, "class"]]];
//! let any_code = pattern![:code, {Pattern::anything()}];
//! # let _ = (tag, any_code);
//! ```

use std::sync::Arc;

use crate::matcher::{Anything, CaptureMap, Matcher, Nothing};
use crate::sexp::{NodeRef, Value};

/// A structural pattern.
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Matches an atom whose value equals this one.
    Value(Value),
    /// Matches a list whose leading children match these patterns in order.
    List(Vec<Pattern>),
    /// Defers to a programmable matcher.
    Matcher(Arc<dyn Matcher>),
}

impl Pattern {
    /// Creates a pattern matching the symbol `name`.
    #[must_use]
    pub const fn symbol(name: &'static str) -> Self {
        Self::Value(Value::Symbol(name))
    }

    /// Creates a pattern matching the string `text`.
    #[must_use]
    pub fn string(text: impl Into<String>) -> Self {
        Self::Value(Value::String(text.into()))
    }

    /// Creates a list pattern.
    #[must_use]
    pub fn list(items: impl IntoIterator<Item = Self>) -> Self {
        Self::List(items.into_iter().collect())
    }

    /// Wraps a matcher.
    #[must_use]
    pub fn matcher(matcher: impl Matcher + 'static) -> Self {
        Self::Matcher(Arc::new(matcher))
    }

    /// Creates a pattern matching any node.
    #[must_use]
    pub fn anything() -> Self {
        Self::matcher(Anything)
    }

    /// Creates a pattern matching no node.
    #[must_use]
    pub fn nothing() -> Self {
        Self::matcher(Nothing)
    }

    /// Returns every capture name bound anywhere in the pattern, in
    /// pattern order and including repeats.
    #[must_use]
    pub fn capture_names(&self) -> Vec<&str> {
        match self {
            Self::Value(_) => Vec::new(),
            Self::List(items) => items.iter().flat_map(Self::capture_names).collect(),
            Self::Matcher(matcher) => matcher.capture_names(),
        }
    }

    /// Matches `node`, recording captures as named matchers accept nodes.
    ///
    /// Captures bound by a partially successful list match are left in
    /// `captures`; callers discard the map when the overall match fails.
    pub fn matches_node<'t>(&self, node: NodeRef<'t>, captures: &mut CaptureMap<'t>) -> bool {
        match self {
            Self::Matcher(matcher) => matcher.matches(node, captures),
            Self::Value(value) => node.as_atom().is_some_and(|atom| atom.value() == value),
            Self::List(items) => node.as_sexp().is_some_and(|sexp| {
                items.len() <= sexp.len()
                    && items
                        .iter()
                        .zip(sexp.iter())
                        .all(|(item, child)| item.matches_node(child.as_node_ref(), captures))
            }),
        }
    }
}

impl From<Value> for Pattern {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<&str> for Pattern {
    fn from(text: &str) -> Self {
        Self::string(text)
    }
}

impl From<String> for Pattern {
    fn from(text: String) -> Self {
        Self::string(text)
    }
}

impl From<bool> for Pattern {
    fn from(flag: bool) -> Self {
        Self::Value(Value::Bool(flag))
    }
}

impl From<Vec<Self>> for Pattern {
    fn from(items: Vec<Self>) -> Self {
        Self::List(items)
    }
}

/// Builds a list [`Pattern`] from tree notation.
///
/// - `:name` matches the symbol `name`
/// - a string or boolean literal matches that value
/// - `[...]` nests a list pattern
/// - `{expr}` embeds any expression convertible into a [`Pattern`], such
///   as a capture or [`Pattern::anything`]
///
/// # Example
///
/// ```
/// use slim_lint_core::Position;
/// use slim_lint_syntax::{Sexp, pattern};
///
/// let at = Position::START;
/// let output = Sexp::tagged(&["slim", "output"], at)
///     .with_bool(true, at)
///     .with_string("name", at, at);
/// assert!(output.matches(&pattern![:slim, :output, true]));
/// assert!(!output.matches(&pattern![:slim, :output, false]));
/// assert!(!output.matches(&pattern![:slim, :control]));
/// ```
#[macro_export]
macro_rules! pattern {
    ($($items:tt)*) => {
        $crate::Pattern::list($crate::__pattern_items!([] $($items)*))
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __pattern_items {
    ([$($done:expr),*]) => {
        ::std::vec![$($done),*]
    };
    ([$($done:expr),*] : $name:ident $(, $($rest:tt)*)?) => {
        $crate::__pattern_items!(
            [$($done,)* $crate::Pattern::symbol(::core::stringify!($name))] $($($rest)*)?
        )
    };
    ([$($done:expr),*] [$($inner:tt)*] $(, $($rest:tt)*)?) => {
        $crate::__pattern_items!([$($done,)* $crate::pattern!($($inner)*)] $($($rest)*)?)
    };
    ([$($done:expr),*] { $inner:expr } $(, $($rest:tt)*)?) => {
        $crate::__pattern_items!(
            [$($done,)* ::core::convert::Into::<$crate::Pattern>::into($inner)] $($($rest)*)?
        )
    };
    ([$($done:expr),*] $literal:literal $(, $($rest:tt)*)?) => {
        $crate::__pattern_items!(
            [$($done,)* ::core::convert::Into::<$crate::Pattern>::into($literal)] $($($rest)*)?
        )
    };
}
