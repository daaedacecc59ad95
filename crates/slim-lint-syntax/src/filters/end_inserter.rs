use slim_lint_core::Position;

use super::blocks::{CONTINUATION, EXPLICIT_END, as_statement, code_index, opens_block};
use super::{Filter, Handler, compile, descend, rebuild};
use crate::error::{ErrorKind, SyntaxError};
use crate::sexp::{Node, Sexp};

/// Inserts `[:code, "end"]` after every chain of block statements.
///
/// A chain is an opening statement followed by continuation clauses
/// (`else`, `elsif`, `when`, `in`, `rescue`, `ensure`). The terminator
/// goes before the next sibling that is neither a continuation nor a
/// newline marker, or at the end of the list, and is located at the start
/// of the last statement of the chain. A literal `end` statement is
/// rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct EndInserter;

impl Filter for EndInserter {
    fn name(&self) -> &'static str {
        "end_inserter"
    }

    fn on(&mut self, handler: Handler, sexp: Sexp) -> Result<Sexp, SyntaxError> {
        if handler != Handler::Multi {
            return descend(self, handler, sexp);
        }
        let (start, finish, line) = (sexp.start(), sexp.finish(), sexp.recorded_line());
        let mut children = sexp.into_children().into_iter();
        let mut result = Vec::with_capacity(children.len());
        result.extend(children.next());

        let mut open: Option<(Position, u32)> = None;
        for child in children {
            let node = match child {
                Node::Sexp(nested) => Node::Sexp(compile(self, nested)?),
                atom @ Node::Atom(_) => atom,
            };
            if let Some(statement) = as_statement(&node) {
                let code = statement_code(statement);
                if EXPLICIT_END.is_match(&code) {
                    return Err(explicit_end(statement, code));
                }
                let continues = CONTINUATION.is_match(&code);
                if let Some(opener) = open.take().filter(|_| !continues) {
                    result.push(Node::Sexp(terminator(opener)));
                }
                open = opens_block(statement).then(|| (statement.start(), statement.line()));
            } else {
                let newline = node.as_sexp().is_some_and(Sexp::is_newline);
                if let Some(opener) = open.take_if(|_| !newline) {
                    result.push(Node::Sexp(terminator(opener)));
                }
            }
            result.push(node);
        }
        if let Some(opener) = open {
            result.push(Node::Sexp(terminator(opener)));
        }
        Ok(rebuild(result, start, finish, line))
    }
}

fn statement_code(statement: &Sexp) -> String {
    code_index(statement)
        .and_then(|index| statement.str_at(index))
        .map(str::trim)
        .unwrap_or_default()
        .to_owned()
}

fn explicit_end(statement: &Sexp, code: String) -> SyntaxError {
    let position = code_index(statement)
        .and_then(|index| statement.atom_at(index))
        .map_or_else(|| statement.start(), |atom| atom.start());
    SyntaxError::new(
        ErrorKind::ExplicitEnd,
        Position::new(statement.line(), position.column),
        code,
    )
}

fn terminator((at, line): (Position, u32)) -> Sexp {
    let mut end = Sexp::tagged(&["code"], at).with_string("end", at, at);
    end.set_line(line);
    end
}
