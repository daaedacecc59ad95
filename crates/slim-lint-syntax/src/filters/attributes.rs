use super::{Filter, Handler, descend};
use crate::error::SyntaxError;
use crate::sexp::{Atom, Sexp, Value};

/// Rewrites `[:slim, :attrvalue, escape, code]` and `[:slim, :splat, code]`
/// into plain `[:code, code]`.
///
/// An attribute value wrapped entirely in one pair of parentheses loses
/// them. No helper variables are introduced, so extracted code only ever
/// contains identifiers written in the template.
#[derive(Debug, Default, Clone, Copy)]
pub struct AttributeNormalizer;

impl Filter for AttributeNormalizer {
    fn name(&self) -> &'static str {
        "attribute_normalizer"
    }

    fn on(&mut self, handler: Handler, sexp: Sexp) -> Result<Sexp, SyntaxError> {
        match handler {
            Handler::SlimAttrvalue => Ok(code_node(&sexp, 3, true)),
            Handler::SlimSplat => Ok(code_node(&sexp, 2, false)),
            _ => descend(self, handler, sexp),
        }
    }
}

fn code_node(sexp: &Sexp, index: usize, strip: bool) -> Sexp {
    let mut node = Sexp::tagged(&["code"], sexp.start());
    node.set_span(sexp.start(), sexp.finish());
    node.set_line(sexp.line());
    let Some(atom) = sexp.atom_at(index) else {
        return node;
    };
    let code = atom.as_string().unwrap_or_default();
    let (text, start) = strip
        .then(|| strip_parens(code))
        .flatten()
        .map_or((code, atom.start()), |inner| (inner, atom.start().shift(1)));
    let mut value = Atom::new(Value::String(text.to_owned()), start, start.advance(text));
    value.set_line(atom.line());
    node.with(value)
}

/// Returns the code inside a pair of parentheses that wraps all of `code`.
///
/// `(a)` and `((a) + (b))` are wrapped; `(a) + (b)` is not.
pub(crate) fn strip_parens(code: &str) -> Option<&str> {
    let inner = code.strip_prefix('(')?.strip_suffix(')')?;
    let mut depth = 0_usize;
    for ch in inner.chars() {
        match ch {
            '(' => depth = depth.saturating_add(1),
            ')' => {
                if depth == 0 {
                    return None;
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    (depth == 0).then_some(inner)
}
