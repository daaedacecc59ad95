//! Tree-to-tree normalization passes.
//!
//! Each pass implements [`Filter`]. Dispatch goes through a static table
//! keyed by a node's leading symbols ([`Handler::for_sexp`]); the table
//! also records which children hold nested expressions, so a pass only
//! overrides the node kinds it rewrites and [`descend`] handles the rest.

mod attributes;
mod blocks;
mod control;
mod do_inserter;
mod embedded;
mod end_inserter;
mod flattener;
mod indentation;
mod interpolation;
mod static_merger;
mod unwrapper;

use std::collections::HashMap;

use once_cell::sync::Lazy;
use slim_lint_core::Position;

pub use self::attributes::AttributeNormalizer;
pub use self::blocks::{is_empty_exp, opens_block};
pub use self::control::ControlProcessor;
pub use self::do_inserter::DoInserter;
pub use self::embedded::EmbeddedProcessor;
pub use self::end_inserter::EndInserter;
pub use self::flattener::MultiFlattener;
pub use self::indentation::IndentationAnnotator;
pub use self::interpolation::Interpolation;
pub use self::static_merger::StaticMerger;
pub use self::unwrapper::Unwrapper;
use crate::error::SyntaxError;
use crate::sexp::{Node, Sexp};

/// Node kinds recognised by the filter dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Handler {
    /// `[:multi, ...]`
    Multi,
    /// `[:newline]`
    Newline,
    /// `[:static, text]`
    Static,
    /// `[:dynamic, code]`
    Dynamic,
    /// `[:code, code]`
    Code,
    /// `[:escape, bool, exp]`
    Escape,
    /// `[:indent]`
    Indent,
    /// `[:outdent]`
    Outdent,
    /// `[:html, :doctype, type]`
    HtmlDoctype,
    /// `[:html, :comment, exp]`
    HtmlComment,
    /// `[:html, :condcomment, condition, exp]`
    HtmlCondcomment,
    /// `[:html, :tag, name, attrs, content?]`
    HtmlTag,
    /// `[:html, :attrs, ...]`
    HtmlAttrs,
    /// `[:html, :attr, name, value]`
    HtmlAttr,
    /// `[:slim, :control, code, content]`
    SlimControl,
    /// `[:slim, :output, escape, code, content]`
    SlimOutput,
    /// `[:slim, :text, type, content]`
    SlimText,
    /// `[:slim, :interpolate, text]`
    SlimInterpolate,
    /// `[:slim, :embedded, engine, content, attrs]`
    SlimEmbedded,
    /// `[:slim, :attrvalue, escape, code]`
    SlimAttrvalue,
    /// `[:slim, :splat, code]`
    SlimSplat,
}

/// Children of a node kind that hold nested expressions.
#[derive(Debug, Clone, Copy)]
enum Slots {
    None,
    From(usize),
    At(&'static [usize]),
}

impl Slots {
    fn contains(self, index: usize) -> bool {
        match self {
            Self::None => false,
            Self::From(first) => index >= first,
            Self::At(indices) => indices.contains(&index),
        }
    }
}

type DispatchKey = (&'static str, Option<&'static str>);

static DISPATCH: Lazy<HashMap<DispatchKey, (Handler, Slots)>> = Lazy::new(|| {
    HashMap::from([
        (("multi", None), (Handler::Multi, Slots::From(1))),
        (("newline", None), (Handler::Newline, Slots::None)),
        (("static", None), (Handler::Static, Slots::None)),
        (("dynamic", None), (Handler::Dynamic, Slots::None)),
        (("code", None), (Handler::Code, Slots::None)),
        (("escape", None), (Handler::Escape, Slots::At(&[2]))),
        (("indent", None), (Handler::Indent, Slots::None)),
        (("outdent", None), (Handler::Outdent, Slots::None)),
        (("html", Some("doctype")), (Handler::HtmlDoctype, Slots::None)),
        (("html", Some("comment")), (Handler::HtmlComment, Slots::At(&[2]))),
        (
            ("html", Some("condcomment")),
            (Handler::HtmlCondcomment, Slots::At(&[3])),
        ),
        (("html", Some("tag")), (Handler::HtmlTag, Slots::At(&[3, 4]))),
        (("html", Some("attrs")), (Handler::HtmlAttrs, Slots::From(2))),
        (("html", Some("attr")), (Handler::HtmlAttr, Slots::At(&[3]))),
        (("slim", Some("control")), (Handler::SlimControl, Slots::At(&[3]))),
        (("slim", Some("output")), (Handler::SlimOutput, Slots::At(&[4]))),
        (("slim", Some("text")), (Handler::SlimText, Slots::At(&[3]))),
        (
            ("slim", Some("interpolate")),
            (Handler::SlimInterpolate, Slots::None),
        ),
        (
            ("slim", Some("embedded")),
            (Handler::SlimEmbedded, Slots::At(&[3, 4])),
        ),
        (("slim", Some("attrvalue")), (Handler::SlimAttrvalue, Slots::None)),
        (("slim", Some("splat")), (Handler::SlimSplat, Slots::None)),
    ])
});

fn lookup(sexp: &Sexp) -> Option<(Handler, Slots)> {
    let head = sexp.head()?;
    let entry = match head {
        "html" | "slim" => DISPATCH.get(&(head, Some(sexp.symbol_at(1)?))),
        _ => DISPATCH.get(&(head, None)),
    };
    entry.copied()
}

impl Handler {
    /// Returns the handler for `sexp`, or `None` for node kinds the
    /// pipeline does not know.
    ///
    /// ```
    /// use slim_lint_core::Position;
    /// use slim_lint_syntax::{Handler, Sexp};
    ///
    /// let tag = Sexp::tagged(&["html", "tag"], Position::START);
    /// assert_eq!(Handler::for_sexp(&tag), Some(Handler::HtmlTag));
    /// ```
    #[must_use]
    pub fn for_sexp(sexp: &Sexp) -> Option<Self> {
        lookup(sexp).map(|(handler, _)| handler)
    }
}

/// A single normalization pass.
///
/// Implementors override [`Filter::on`] for the node kinds they rewrite
/// and delegate everything else to [`descend`].
pub trait Filter {
    /// Returns the pass name used in log events.
    fn name(&self) -> &'static str;

    /// Runs the pass over a whole tree.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] when the tree contains a construct the
    /// pass rejects.
    fn call(&mut self, tree: Sexp) -> Result<Sexp, SyntaxError> {
        compile(self, tree)
    }

    /// Rewrites one node of a known kind.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] when the node is rejected.
    fn on(&mut self, handler: Handler, sexp: Sexp) -> Result<Sexp, SyntaxError> {
        descend(self, handler, sexp)
    }
}

/// Dispatches `sexp` to `filter`, leaving unknown node kinds untouched.
///
/// # Errors
///
/// Propagates errors raised by the filter.
pub fn compile<F: Filter + ?Sized>(filter: &mut F, sexp: Sexp) -> Result<Sexp, SyntaxError> {
    match Handler::for_sexp(&sexp) {
        Some(handler) => filter.on(handler, sexp),
        None => Ok(sexp),
    }
}

/// Compiles every nested expression of a `handler` node with `filter`.
///
/// # Errors
///
/// Propagates errors raised by the filter.
pub fn descend<F: Filter + ?Sized>(
    filter: &mut F,
    handler: Handler,
    sexp: Sexp,
) -> Result<Sexp, SyntaxError> {
    let slots = lookup(&sexp).map_or(Slots::None, |(found, slots)| {
        if found == handler { slots } else { Slots::None }
    });
    if matches!(slots, Slots::None) {
        return Ok(sexp);
    }
    let (start, finish, line) = (sexp.start(), sexp.finish(), sexp.recorded_line());
    let children = sexp
        .into_children()
        .into_iter()
        .enumerate()
        .map(|(index, child)| match child {
            Node::Sexp(nested) if slots.contains(index) => compile(filter, nested).map(Node::Sexp),
            other => Ok(other),
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rebuild(children, start, finish, line))
}

/// Builds a list with the span and line of the node it replaces.
pub(crate) fn rebuild(
    children: Vec<Node>,
    start: Position,
    finish: Position,
    line: Option<u32>,
) -> Sexp {
    let mut sexp = Sexp::from_children(children, start, finish);
    if let Some(recorded) = line {
        sexp.set_line(recorded);
    }
    sexp
}

/// Replaces the list at `index` of `sexp` with the result of `rewrite`.
pub(crate) fn map_child(sexp: &mut Sexp, index: usize, rewrite: impl FnOnce(Sexp) -> Sexp) {
    if let Some(Node::Sexp(child)) = sexp.get_mut(index) {
        let taken = std::mem::take(child);
        *child = rewrite(taken);
    }
}

/// Returns `true` for a `[:multi]` holding exactly one expression.
pub(crate) fn is_single(multi: &Sexp) -> bool {
    multi.head() == Some("multi") && matches!(multi.children(), [_, Node::Sexp(_)])
}

/// Replaces a `[:multi]` holding exactly one expression by that
/// expression.
pub(crate) fn collapse(multi: Sexp) -> Sexp {
    if !is_single(&multi) {
        return multi;
    }
    let mut children = multi.into_children();
    match children.pop() {
        Some(Node::Sexp(only)) => only,
        _ => Sexp::default(),
    }
}

/// Returns the passes run by [`crate::Engine`], in order.
#[must_use]
pub fn main_filters() -> Vec<Box<dyn Filter>> {
    vec![
        Box::new(IndentationAnnotator),
        Box::new(Interpolation),
        Box::new(EndInserter),
        Box::new(DoInserter),
        Box::new(MultiFlattener),
        Box::new(StaticMerger),
        Box::new(AttributeNormalizer),
    ]
}

/// Returns the passes run by [`crate::ExtractEngine`], in order.
#[must_use]
pub fn extract_filters() -> Vec<Box<dyn Filter>> {
    let mut filters = main_filters();
    filters.extend([
        Box::new(ControlProcessor) as Box<dyn Filter>,
        Box::new(EmbeddedProcessor),
        Box::new(Unwrapper),
        Box::new(MultiFlattener),
        Box::new(StaticMerger),
    ]);
    filters
}
