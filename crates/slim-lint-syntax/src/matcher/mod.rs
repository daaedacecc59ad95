//! Programmable matchers embedded in patterns.
//!
//! A [`Matcher`] decides whether a single node satisfies some condition.
//! Matchers sit wherever a pattern needs more than literal comparison:
//! wildcards, vetoes, and named captures. Custom matchers only need to
//! override [`Matcher::matches`]; the default rejects every node.

mod capture;

use std::fmt;

pub use self::capture::CaptureMap;
use crate::pattern::Pattern;
use crate::sexp::NodeRef;

/// A predicate over a single node.
pub trait Matcher: fmt::Debug + Send + Sync {
    /// Returns `true` if `node` satisfies the matcher, recording any named
    /// bindings in `captures`.
    ///
    /// The default implementation matches nothing.
    fn matches<'t>(&self, node: NodeRef<'t>, captures: &mut CaptureMap<'t>) -> bool {
        let _ = (node, captures);
        false
    }

    /// Returns the capture names this matcher can bind.
    fn capture_names(&self) -> Vec<&str> {
        Vec::new()
    }
}

/// Matches any node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Anything;

impl Matcher for Anything {
    fn matches<'t>(&self, _node: NodeRef<'t>, _captures: &mut CaptureMap<'t>) -> bool {
        true
    }
}

/// Matches no node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Nothing;

impl Matcher for Nothing {}

/// Binds a name to the node its inner pattern accepts.
///
/// # Example
///
/// ```
/// use slim_lint_core::Position;
/// use slim_lint_syntax::{CaptureMap, Pattern, Sexp, capture, pattern};
///
/// let at = Position::START;
/// let code = Sexp::tagged(&["code"], at).with_string("x = 1", at, at);
/// let pattern = pattern![:code, {capture("ruby", Pattern::anything())}];
///
/// let mut captures = CaptureMap::new();
/// assert!(code.matches_with(&pattern, &mut captures));
/// assert_eq!(captures["ruby"].as_str(), Some("x = 1"));
/// ```
#[derive(Debug, Clone)]
pub struct Capture {
    name: String,
    inner: Pattern,
}

impl Capture {
    /// Creates a capture of whatever `inner` accepts.
    #[must_use]
    pub fn new(name: impl Into<String>, inner: Pattern) -> Self {
        Self {
            name: name.into(),
            inner,
        }
    }

    /// Returns the capture name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Matcher for Capture {
    fn matches<'t>(&self, node: NodeRef<'t>, captures: &mut CaptureMap<'t>) -> bool {
        if self.inner.matches_node(node, captures) {
            captures.insert(self.name.clone(), node);
            true
        } else {
            false
        }
    }

    fn capture_names(&self) -> Vec<&str> {
        let mut names = vec![self.name.as_str()];
        names.extend(self.inner.capture_names());
        names
    }
}

/// Creates a capture pattern binding `name` to whatever `inner` accepts.
#[must_use]
pub fn capture(name: impl Into<String>, inner: impl Into<Pattern>) -> Pattern {
    Pattern::matcher(Capture::new(name, inner.into()))
}
