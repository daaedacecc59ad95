use super::blocks::{code_index, is_block_opener, is_empty_exp};
use super::{Filter, Handler, descend};
use crate::error::SyntaxError;
use crate::sexp::{Node, Sexp, Value};

/// Appends `" do"` to statements that have a body but whose code does not
/// open a block by itself, as in `= form_for @user` followed by nested
/// markup.
#[derive(Debug, Default, Clone, Copy)]
pub struct DoInserter;

impl Filter for DoInserter {
    fn name(&self) -> &'static str {
        "do_inserter"
    }

    fn on(&mut self, handler: Handler, sexp: Sexp) -> Result<Sexp, SyntaxError> {
        let mut compiled = descend(self, handler, sexp)?;
        let Some(index) = code_index(&compiled) else {
            return Ok(compiled);
        };
        let code = compiled.str_at(index).unwrap_or_default();
        let has_body = compiled
            .sexp_at(index + 1)
            .is_some_and(|body| !is_empty_exp(body));
        if has_body && !is_block_opener(code) {
            let extended = format!("{code} do");
            if let Some(Node::Atom(atom)) = compiled.get_mut(index) {
                atom.set_value(Value::String(extended));
            }
        }
        Ok(compiled)
    }
}
