use super::blocks::{code_index, is_block_opener, is_empty_exp};
use super::{Filter, Handler, descend, map_child};
use crate::error::SyntaxError;
use crate::sexp::Sexp;

/// Wraps the body of block statements in `[:indent]` / `[:outdent]`
/// markers.
///
/// A body is wrapped when the statement's code opens a block or the body
/// holds content. The markers only steer indentation of extracted code.
#[derive(Debug, Default, Clone, Copy)]
pub struct IndentationAnnotator;

impl Filter for IndentationAnnotator {
    fn name(&self) -> &'static str {
        "indentation"
    }

    fn on(&mut self, handler: Handler, sexp: Sexp) -> Result<Sexp, SyntaxError> {
        let mut compiled = descend(self, handler, sexp)?;
        if !matches!(handler, Handler::SlimControl | Handler::SlimOutput) {
            return Ok(compiled);
        }
        let Some(index) = code_index(&compiled) else {
            return Ok(compiled);
        };
        let opener = compiled.str_at(index).is_some_and(is_block_opener);
        let filled = compiled
            .sexp_at(index + 1)
            .is_some_and(|body| !is_empty_exp(body));
        if opener || filled {
            map_child(&mut compiled, index + 1, wrap);
        }
        Ok(compiled)
    }
}

fn wrap(body: Sexp) -> Sexp {
    let (start, finish) = (body.start(), body.finish());
    let mut indent = Sexp::tagged(&["indent"], start);
    let mut outdent = Sexp::tagged(&["outdent"], finish);
    let mut wrapper = Sexp::tagged(&["multi"], start);
    if let Some(line) = body.recorded_line() {
        indent.set_line(line);
        wrapper.set_line(line);
    }
    outdent.set_line(last_line(&body));
    wrapper = wrapper.with(indent).with(body).with(outdent);
    wrapper.set_span(start, finish);
    wrapper
}

fn last_line(sexp: &Sexp) -> u32 {
    sexp.iter()
        .last()
        .map_or_else(|| sexp.line(), |node| match node.as_sexp() {
            Some(nested) => last_line(nested),
            None => node.line(),
        })
}
