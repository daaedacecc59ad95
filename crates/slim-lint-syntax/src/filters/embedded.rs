use super::{Filter, Handler, descend, rebuild};
use crate::error::SyntaxError;
use crate::sexp::{Atom, Node, Sexp};

/// Lowers `[:slim, :embedded, engine, content, attrs]` for extraction.
///
/// Each line of a `ruby` block becomes a `[:code, line]` on its own
/// template line. Other engines keep their interpolated text and
/// attributes inside a `[:multi]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct EmbeddedProcessor;

impl Filter for EmbeddedProcessor {
    fn name(&self) -> &'static str {
        "embedded_processor"
    }

    fn on(&mut self, handler: Handler, sexp: Sexp) -> Result<Sexp, SyntaxError> {
        if handler != Handler::SlimEmbedded {
            return descend(self, handler, sexp);
        }
        let ruby = sexp.str_at(2) == Some("ruby");
        let compiled = descend(self, handler, sexp)?;
        let (start, finish, line) = (compiled.start(), compiled.finish(), compiled.line());
        let mut lowered = vec![Node::Atom(Atom::symbol("multi", start))];
        let mut children = compiled.into_children().into_iter().skip(3);
        let content = children.next();
        let attrs = children.next();
        if ruby {
            if let Some(Node::Sexp(body)) = content {
                collect_ruby(body, &mut lowered);
            }
        } else {
            lowered.extend(attrs);
            lowered.extend(content);
        }
        Ok(rebuild(lowered, start, finish, Some(line)))
    }
}

fn collect_ruby(sexp: Sexp, out: &mut Vec<Node>) {
    if sexp.is(&["slim", "interpolate"]) {
        let Some(text) = sexp.str_at(2) else {
            return;
        };
        if text.chars().all(|ch| ch == '\n') {
            return;
        }
        let mut code = Sexp::tagged(&["code"], sexp.start());
        code.set_span(sexp.start(), sexp.finish());
        code.set_line(sexp.line());
        let mut atom = Atom::new(text.into(), sexp.start(), sexp.finish());
        atom.set_line(sexp.line());
        code.push(Node::Atom(atom));
        out.push(Node::Sexp(code));
    } else if sexp.is_newline() {
        out.push(Node::Sexp(sexp));
    } else {
        for child in sexp.into_children() {
            if let Node::Sexp(nested) = child {
                collect_ruby(nested, out);
            }
        }
    }
}
