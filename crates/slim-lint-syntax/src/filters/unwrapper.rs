use super::{Filter, Handler, compile, descend};
use crate::error::SyntaxError;
use crate::sexp::{Node, Sexp};

/// Drops wrappers whose only purpose is markup output: `[:escape, flag,
/// exp]`, `[:slim, :text, type, exp]`, `[:html, :comment, exp]` and
/// `[:html, :condcomment, condition, exp]` are replaced by `exp`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unwrapper;

impl Filter for Unwrapper {
    fn name(&self) -> &'static str {
        "unwrapper"
    }

    fn on(&mut self, handler: Handler, sexp: Sexp) -> Result<Sexp, SyntaxError> {
        let index = match handler {
            Handler::Escape | Handler::HtmlComment => 2,
            Handler::SlimText | Handler::HtmlCondcomment => 3,
            _ => return descend(self, handler, sexp),
        };
        let start = sexp.start();
        match sexp.into_children().into_iter().nth(index) {
            Some(Node::Sexp(inner)) => compile(self, inner),
            _ => Ok(Sexp::tagged(&["multi"], start)),
        }
    }
}
