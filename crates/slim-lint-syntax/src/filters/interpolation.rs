use slim_lint_core::Position;

use super::{Filter, Handler, descend};
use crate::error::SyntaxError;
use crate::sexp::{Atom, Sexp, Value};

/// Expands `#{...}` interpolation inside `[:slim, :interpolate, text]`.
///
/// The result is a `[:multi]` of `[:static, text]` and
/// `[:slim, :output, escape, code, [:multi]]` pieces. `\#{` yields a
/// literal `#{`, `#{{code}}` is unescaped output, braces nest, and an
/// unclosed `#{` stays literal text. Ruby blocks are left alone since their
/// text is code rather than markup.
#[derive(Debug, Default, Clone, Copy)]
pub struct Interpolation;

impl Filter for Interpolation {
    fn name(&self) -> &'static str {
        "interpolation"
    }

    fn on(&mut self, handler: Handler, sexp: Sexp) -> Result<Sexp, SyntaxError> {
        match handler {
            Handler::SlimInterpolate => Ok(expand(&sexp)),
            Handler::SlimEmbedded if sexp.str_at(2) == Some("ruby") => Ok(sexp),
            _ => descend(self, handler, sexp),
        }
    }
}

fn expand(sexp: &Sexp) -> Sexp {
    let mut multi = Sexp::tagged(&["multi"], sexp.start());
    multi.set_span(sexp.start(), sexp.finish());
    multi.set_line(sexp.line());
    let Some(atom) = sexp.atom_at(2) else {
        return multi;
    };
    let Some(text) = atom.as_string() else {
        return multi;
    };
    let base_line = sexp.line();
    let first_line = atom.start().line;
    let located = |mut node: Sexp| {
        let line = base_line.saturating_add(node.start().line.saturating_sub(first_line));
        node.set_line(line);
        node
    };
    for piece in scan(text, atom.start()) {
        multi.push(located(piece.into_sexp()));
    }
    multi
}

/// A slice of interpolated text.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Static {
        text: String,
        start: Position,
        finish: Position,
    },
    Output {
        escape: bool,
        code: String,
        code_start: Position,
        start: Position,
        finish: Position,
    },
}

impl Piece {
    fn into_sexp(self) -> Sexp {
        match self {
            Self::Static {
                text,
                start,
                finish,
            } => {
                let mut node = Sexp::tagged(&["static"], start).with_string(text, start, finish);
                node.set_span(start, finish);
                node
            }
            Self::Output {
                escape,
                code,
                code_start,
                start,
                finish,
            } => {
                let code_finish = code_start.advance(&code);
                let mut node = Sexp::tagged(&["slim", "output"], start)
                    .with(Atom::new(Value::Bool(escape), start, start))
                    .with_string(code, code_start, code_finish)
                    .with(Sexp::tagged(&["multi"], finish));
                node.set_span(start, finish);
                node
            }
        }
    }
}

/// Splits `text`, which begins at `start`, into static and output pieces.
fn scan(text: &str, start: Position) -> Vec<Piece> {
    let mut scanner = Scanner {
        rest: text,
        pos: start,
        literal: String::new(),
        literal_start: start,
        pieces: Vec::new(),
    };
    while !scanner.rest.is_empty() {
        if !(scanner.escaped() || scanner.output()) {
            scanner.literal_char();
        }
    }
    scanner.flush();
    scanner.pieces
}

struct Scanner<'s> {
    rest: &'s str,
    pos: Position,
    literal: String,
    literal_start: Position,
    pieces: Vec<Piece>,
}

impl<'s> Scanner<'s> {
    fn push_literal(&mut self, text: &str, spelling: &str, rest: &'s str) {
        if self.literal.is_empty() {
            self.literal_start = self.pos;
        }
        self.literal.push_str(text);
        self.pos = self.pos.advance(spelling);
        self.rest = rest;
    }

    fn escaped(&mut self) -> bool {
        let Some(after) = self.rest.strip_prefix("\\#{") else {
            return false;
        };
        self.push_literal("#{", "\\#{", after);
        true
    }

    fn output(&mut self) -> bool {
        if !self.rest.starts_with("#{") {
            return false;
        }
        let Some(close) = closing_brace(self.rest) else {
            return false;
        };
        self.flush();
        let (spelling, after) = self.rest.split_at(close + 1);
        let inner = spelling
            .strip_prefix("#{")
            .and_then(|body| body.strip_suffix('}'))
            .unwrap_or_default();
        let (escape, code, prefix) = inner
            .strip_prefix('{')
            .and_then(|body| body.strip_suffix('}'))
            .map_or((true, inner, "#{"), |raw| (false, raw, "#{{"));
        let finish = self.pos.advance(spelling);
        self.pieces.push(Piece::Output {
            escape,
            code: code.to_owned(),
            code_start: self.pos.advance(prefix),
            start: self.pos,
            finish,
        });
        self.pos = finish;
        self.rest = after;
        true
    }

    fn literal_char(&mut self) {
        let mut chars = self.rest.chars();
        if let Some(ch) = chars.next() {
            let mut buffer = [0; 4];
            let text = ch.encode_utf8(&mut buffer);
            self.push_literal(text, text, chars.as_str());
        }
    }

    fn flush(&mut self) {
        if !self.literal.is_empty() {
            self.pieces.push(Piece::Static {
                text: std::mem::take(&mut self.literal),
                start: self.literal_start,
                finish: self.pos,
            });
        }
    }
}

/// Byte index of the brace closing the `#{` at the start of `text`.
fn closing_brace(text: &str) -> Option<usize> {
    let mut depth = 0_usize;
    for (index, ch) in text.char_indices().skip(1) {
        match ch {
            '{' => depth = depth.saturating_add(1),
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}
