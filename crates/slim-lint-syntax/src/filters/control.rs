use super::blocks::code_index;
use super::{Filter, Handler, descend, rebuild};
use crate::error::SyntaxError;
use crate::sexp::{Atom, Node, Sexp};

/// Lowers statements for extraction.
///
/// `[:slim, :control, code, content]` becomes
/// `[:multi, [:code, code], content]` and
/// `[:slim, :output, escape, code, content]` becomes
/// `[:multi, [:dynamic, code], content]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ControlProcessor;

impl Filter for ControlProcessor {
    fn name(&self) -> &'static str {
        "control_processor"
    }

    fn on(&mut self, handler: Handler, sexp: Sexp) -> Result<Sexp, SyntaxError> {
        let kind = match handler {
            Handler::SlimControl => "code",
            Handler::SlimOutput => "dynamic",
            _ => return descend(self, handler, sexp),
        };
        let compiled = descend(self, handler, sexp)?;
        let Some(index) = code_index(&compiled) else {
            return Ok(compiled);
        };
        let (start, finish, line) = (compiled.start(), compiled.finish(), compiled.line());
        let mut children = compiled.into_children().into_iter().skip(index);
        let mut statement = Sexp::tagged(&[kind], start);
        if let Some(Node::Atom(code)) = children.next() {
            statement.set_span(start, code.finish());
            statement.push(code);
        }
        statement.set_line(line);
        let mut lowered = vec![Node::Atom(Atom::symbol("multi", start))];
        lowered.push(Node::Sexp(statement));
        lowered.extend(children);
        Ok(rebuild(lowered, start, finish, Some(line)))
    }
}
