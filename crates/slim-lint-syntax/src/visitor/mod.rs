//! Pattern-driven traversal of normalized trees.
//!
//! A [`Visitor`] holds `(pattern, callback)` entries and an optional start
//! callback, registered once through a [`VisitorBuilder`] and reused for
//! every document. Traversal is depth-first and pre-order. At each list
//! the first matching pattern fires its callback; its captures are fresh
//! for that match. Afterwards the children are visited unless the
//! callback returned [`Flow::Stop`] or redirected traversal through
//! [`Visit::descend`].

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::error::RegistryError;
use crate::matcher::CaptureMap;
use crate::pattern::Pattern;
use crate::sexp::{NodeRef, Sexp};

/// What traversal does after a callback returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    /// Visit the matched node's children.
    #[default]
    Continue,
    /// Skip the matched node's children; siblings are still visited.
    Stop,
}

type Callback<S> =
    Arc<dyn for<'v, 't> Fn(&mut S, &'t Sexp, &mut Visit<'v, 't, S>) -> Flow + Send + Sync>;
type StartCallback<S> = Arc<dyn Fn(&mut S, &Sexp) + Send + Sync>;

struct Entry<S> {
    pattern: Pattern,
    callback: Callback<S>,
}

impl<S> Clone for Entry<S> {
    fn clone(&self) -> Self {
        Self {
            pattern: self.pattern.clone(),
            callback: Arc::clone(&self.callback),
        }
    }
}

/// The per-match context handed to a callback.
pub struct Visit<'v, 't, S> {
    visitor: &'v Visitor<S>,
    captures: CaptureMap<'t>,
    redirected: bool,
}

impl<'t, S> Visit<'_, 't, S> {
    /// Returns the captures recorded by the matching pattern.
    #[must_use]
    pub const fn captures(&self) -> &CaptureMap<'t> {
        &self.captures
    }

    /// Returns the node captured under `name`.
    #[must_use]
    pub fn capture(&self, name: &str) -> Option<NodeRef<'t>> {
        self.captures.get(name)
    }

    /// Visits `sexp` in place of the matched node's children.
    ///
    /// Once called, the matched node's children are not visited
    /// automatically.
    pub fn descend(&mut self, state: &mut S, sexp: &'t Sexp) {
        self.redirected = true;
        self.visitor.visit(state, sexp);
    }
}

impl<S> fmt::Debug for Visit<'_, '_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Visit")
            .field("captures", &self.captures)
            .field("redirected", &self.redirected)
            .finish_non_exhaustive()
    }
}

/// Collects callbacks for a [`Visitor`].
pub struct VisitorBuilder<S> {
    entries: Vec<Entry<S>>,
    on_start: Option<StartCallback<S>>,
}

impl<S> Default for VisitorBuilder<S> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            on_start: None,
        }
    }
}

impl<S> VisitorBuilder<S> {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for lists matching `pattern`. Patterns are
    /// tried in registration order.
    #[must_use]
    pub fn on<F>(mut self, pattern: impl Into<Pattern>, callback: F) -> Self
    where
        F: for<'v, 't> Fn(&mut S, &'t Sexp, &mut Visit<'v, 't, S>) -> Flow + Send + Sync + 'static,
    {
        self.entries.push(Entry {
            pattern: pattern.into(),
            callback: Arc::new(callback),
        });
        self
    }

    /// Registers a callback that receives the whole tree before traversal.
    #[must_use]
    pub fn on_start<F>(mut self, callback: F) -> Self
    where
        F: Fn(&mut S, &Sexp) + Send + Sync + 'static,
    {
        self.on_start = Some(Arc::new(callback));
        self
    }

    /// Validates the registrations.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Empty`] when nothing was registered and
    /// [`RegistryError::DuplicateCapture`] when a pattern binds a capture
    /// name twice.
    pub fn build(self) -> Result<Visitor<S>, RegistryError> {
        if self.entries.is_empty() && self.on_start.is_none() {
            return Err(RegistryError::Empty);
        }
        for entry in &self.entries {
            let mut seen = HashSet::new();
            if let Some(name) = entry
                .pattern
                .capture_names()
                .into_iter()
                .find(|name| !seen.insert(*name))
            {
                return Err(RegistryError::DuplicateCapture {
                    name: name.to_owned(),
                });
            }
        }
        Ok(Visitor {
            entries: self.entries,
            on_start: self.on_start,
        })
    }
}

impl<S> fmt::Debug for VisitorBuilder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisitorBuilder")
            .field("patterns", &self.entries.len())
            .field("on_start", &self.on_start.is_some())
            .finish()
    }
}

/// A validated set of traversal callbacks over state `S`.
///
/// # Example
///
/// ```
/// use slim_lint_syntax::{Engine, Flow, ParserOptions, VisitorBuilder, pattern};
///
/// let tree = Engine::new(ParserOptions::default())?.call("div\n  p\n  p", None)?;
/// let visitor = VisitorBuilder::<Vec<u32>>::new()
///     .on(pattern![:html, :tag, "p"], |lines, sexp, _| {
///         lines.push(sexp.line());
///         Flow::Continue
///     })
///     .build()?;
/// let mut lines = Vec::new();
/// visitor.run(&mut lines, &tree);
/// assert_eq!(lines, vec![2, 3]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Visitor<S> {
    entries: Vec<Entry<S>>,
    on_start: Option<StartCallback<S>>,
}

impl<S> Clone for Visitor<S> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            on_start: self.on_start.clone(),
        }
    }
}

impl<S> Visitor<S> {
    /// Returns a builder.
    #[must_use]
    pub fn builder() -> VisitorBuilder<S> {
        VisitorBuilder::new()
    }

    /// Returns the number of registered patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if only a start callback is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs the start callback on `root`, then traverses it.
    pub fn run(&self, state: &mut S, root: &Sexp) {
        if let Some(on_start) = &self.on_start {
            on_start(state, root);
        }
        self.visit(state, root);
    }

    /// Traverses `sexp` without running the start callback.
    pub fn visit<'t>(&self, state: &mut S, sexp: &'t Sexp) {
        for entry in &self.entries {
            let mut captures = CaptureMap::new();
            if !sexp.matches_with(&entry.pattern, &mut captures) {
                continue;
            }
            let mut visit = Visit {
                visitor: self,
                captures,
                redirected: false,
            };
            let flow = (entry.callback)(state, sexp, &mut visit);
            if flow == Flow::Stop || visit.redirected {
                return;
            }
            break;
        }
        for child in sexp {
            if let Some(nested) = child.as_sexp() {
                self.visit(state, nested);
            }
        }
    }
}

impl<S> fmt::Debug for Visitor<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Visitor")
            .field("patterns", &self.entries.len())
            .field("on_start", &self.on_start.is_some())
            .finish()
    }
}
