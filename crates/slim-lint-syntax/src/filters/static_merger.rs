use super::{Filter, Handler, collapse, compile, descend, rebuild};
use crate::error::SyntaxError;
use crate::sexp::{Atom, Node, Sexp, Value};

/// Merges consecutive `[:static]` siblings.
///
/// Newline markers inside a run do not interrupt it; they move after the
/// merged node. The merged node finishes at the latest finish of its
/// parts. A `[:multi]` left with a single expression is replaced by it.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticMerger;

impl Filter for StaticMerger {
    fn name(&self) -> &'static str {
        "static_merger"
    }

    fn on(&mut self, handler: Handler, sexp: Sexp) -> Result<Sexp, SyntaxError> {
        if handler != Handler::Multi {
            return descend(self, handler, sexp);
        }
        let (start, finish, line) = (sexp.start(), sexp.finish(), sexp.recorded_line());
        let mut children = sexp.into_children().into_iter();
        let mut result: Vec<Node> = Vec::with_capacity(children.len());
        result.extend(children.next());

        let mut run: Option<usize> = None;
        for child in children {
            let Node::Sexp(nested) = child else {
                result.push(child);
                run = None;
                continue;
            };
            if nested.is_static() {
                let merged = run
                    .and_then(|index| result.get_mut(index))
                    .and_then(Node::as_sexp_mut)
                    .is_some_and(|target| append_static(target, &nested));
                if !merged {
                    run = Some(result.len());
                    result.push(Node::Sexp(nested));
                }
                continue;
            }
            if !nested.is_newline() {
                run = None;
            }
            result.push(Node::Sexp(compile(self, nested)?));
        }

        let merged = rebuild(result, start, finish, line);
        Ok(collapse(merged))
    }
}

fn append_static(target: &mut Sexp, next: &Sexp) -> bool {
    let (Some(head), Some(tail)) = (target.atom_at(1), next.atom_at(1)) else {
        return false;
    };
    let (Some(first), Some(second)) = (head.as_string(), tail.as_string()) else {
        return false;
    };
    let text = format!("{first}{second}");
    let atom_start = head.start();
    let atom_finish = head.finish().max(tail.finish());
    let line = head.line();
    let mut atom = Atom::new(Value::String(text), atom_start, atom_finish);
    atom.set_line(line);
    if let Some(slot) = target.get_mut(1) {
        *slot = Node::Atom(atom);
    }
    target.set_span(target.start(), target.finish().max(next.finish()));
    true
}
