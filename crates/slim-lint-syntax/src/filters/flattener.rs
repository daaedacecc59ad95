use super::{Filter, Handler, collapse, compile, descend, is_single, rebuild};
use crate::error::SyntaxError;
use crate::sexp::{Node, Sexp};

/// Splices nested `[:multi]` children into their parent and replaces a
/// `[:multi]` holding a single expression by that expression.
#[derive(Debug, Default, Clone, Copy)]
pub struct MultiFlattener;

impl Filter for MultiFlattener {
    fn name(&self) -> &'static str {
        "multi_flattener"
    }

    fn on(&mut self, handler: Handler, sexp: Sexp) -> Result<Sexp, SyntaxError> {
        if handler != Handler::Multi {
            return descend(self, handler, sexp);
        }
        if is_single(&sexp) {
            return compile(self, collapse(sexp));
        }

        let (start, finish, line) = (sexp.start(), sexp.finish(), sexp.recorded_line());
        let mut children = sexp.into_children().into_iter();
        let mut result = Vec::with_capacity(children.len());
        result.extend(children.next());
        for child in children {
            match child {
                Node::Sexp(nested) => {
                    let compiled = compile(self, nested)?;
                    if compiled.head() == Some("multi") {
                        result.extend(compiled.into_children().into_iter().skip(1));
                    } else {
                        result.push(Node::Sexp(compiled));
                    }
                }
                atom @ Node::Atom(_) => result.push(atom),
            }
        }
        let flattened = rebuild(result, start, finish, line);
        Ok(collapse(flattened))
    }
}
