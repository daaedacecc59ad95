//! Indentation-sensitive template parser.
//!
//! The parser reads a template line by line, tracking an indentation stack
//! and a matching stack of open container lists. Each line is classified
//! by its leading indicator (tag, text, control code, output, comment,
//! embedded engine, doctype) and appended to the innermost open container.
//! Every physical line contributes exactly one `[:newline]` marker so that
//! line numbers can be recovered by counting markers.
//!
//! The result is a [`RawTree`], an arena of lists addressed by handle,
//! which [`convert`](crate::convert) turns into an owned [`Sexp`](crate::Sexp).

mod grammar;
mod options;
mod tag;
mod text;
mod tree;

use regex::Regex;
use slim_lint_core::Position;
use tracing::debug;

use self::grammar::{
    CONDITIONAL_COMMENT, DOCTYPE, Grammar, HTML_COMMENT, OUTPUT, TEXT_BLOCK,
};
pub use self::options::{DEFAULT_ENGINES, ParserOptions, Shortcut};
pub use self::tree::{ListId, RawAtom, RawList, RawNode, RawTree};
use crate::error::{ErrorKind, OptionsError, SyntaxError};

const PARSER_TARGET: &str = "slim_lint_syntax::parser";

/// Parses template source into a [`RawTree`].
///
/// A parser can be reused for any number of templates; each call to
/// [`Parser::parse`] runs with fresh state.
///
/// # Example
///
/// ```
/// use slim_lint_syntax::{Parser, ParserOptions, convert};
///
/// let parser = Parser::new(ParserOptions::default())?;
/// let raw = parser.parse("p Hello")?;
/// let tree = convert(&raw);
/// assert_eq!(tree.head(), Some("multi"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Parser {
    options: ParserOptions,
    grammar: Grammar,
}

impl Parser {
    /// Creates a parser for the given options.
    ///
    /// # Errors
    ///
    /// Returns an [`OptionsError`] if the options cannot be compiled into a
    /// grammar.
    pub fn new(options: ParserOptions) -> Result<Self, OptionsError> {
        options.validate()?;
        let grammar = Grammar::new(&options)?;
        Ok(Self { options, grammar })
    }

    /// Returns the options the parser was built with.
    #[must_use]
    pub const fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parses `source`.
    ///
    /// A leading byte-order mark is ignored and both `\n` and `\r\n` line
    /// endings are accepted.
    ///
    /// # Errors
    ///
    /// Returns a [`SyntaxError`] pointing at the first line that cannot be
    /// read.
    pub fn parse(&self, source: &str) -> Result<RawTree, SyntaxError> {
        let text = source.strip_prefix('\u{feff}').unwrap_or(source);
        let session = Session::new(&self.options, &self.grammar, text);
        let tree = session.run()?;
        debug!(target: PARSER_TARGET, lists = tree.len(), "parsed template");
        Ok(tree)
    }
}

/// A piece of template text together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Fragment {
    text: String,
    start: Position,
    finish: Position,
}

/// Owned capture groups of a line-level match.
struct Matched {
    end: usize,
    groups: Vec<Option<String>>,
}

impl Matched {
    fn group(&self, index: usize) -> &str {
        self.groups
            .get(index)
            .and_then(Option::as_deref)
            .unwrap_or_default()
    }
}

fn capture(regex: &Regex, text: &str) -> Option<Matched> {
    regex.captures(text).map(|caps| Matched {
        end: caps.get(0).map_or(0, |whole| whole.end()),
        groups: caps
            .iter()
            .map(|group| group.map(|m| m.as_str().to_owned()))
            .collect(),
    })
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

fn char_count(text: &str) -> u32 {
    to_u32(text.chars().count())
}

/// Width of the leading whitespace of `line`, with tabs advancing to the
/// next multiple of `tabsize`.
fn indent_width(line: &str, tabsize: usize) -> usize {
    let mut width = 0_usize;
    for ch in line.chars() {
        match ch {
            ' ' => width += 1,
            '\t' => width = (width + 1).next_multiple_of(tabsize),
            _ => break,
        }
    }
    width
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Mutable state for one parse.
struct Session<'p> {
    options: &'p ParserOptions,
    grammar: &'p Grammar,
    lines: Vec<&'p str>,
    next: usize,
    lineno: u32,
    orig_line: String,
    line: String,
    consumed: usize,
    indents: Vec<usize>,
    stacks: Vec<ListId>,
    tree: RawTree,
    pending_newlines: u32,
}

impl<'p> Session<'p> {
    fn new(options: &'p ParserOptions, grammar: &'p Grammar, source: &'p str) -> Self {
        let tree = RawTree::new(Position::START);
        let root = tree.root();
        Self {
            options,
            grammar,
            lines: source.lines().collect(),
            next: 0,
            lineno: 0,
            orig_line: String::new(),
            line: String::new(),
            consumed: 0,
            indents: Vec::new(),
            stacks: vec![root],
            tree,
            pending_newlines: 0,
        }
    }

    fn run(mut self) -> Result<RawTree, SyntaxError> {
        while self.next_line() {
            self.parse_line()?;
        }
        Ok(self.tree)
    }

    // Cursor management.

    fn next_line(&mut self) -> bool {
        let Some(line) = self.lines.get(self.next).copied() else {
            return false;
        };
        self.next += 1;
        self.lineno = self.lineno.saturating_add(1);
        line.clone_into(&mut self.orig_line);
        line.clone_into(&mut self.line);
        self.consumed = 0;
        true
    }

    fn peek_line(&self) -> Option<&'p str> {
        self.lines.get(self.next).copied()
    }

    /// Moves to the next line, stripped of surrounding whitespace, or fails
    /// with `kind` at the end of input.
    fn expect_next_line(&mut self, kind: ErrorKind) -> Result<(), SyntaxError> {
        if !self.next_line() {
            return Err(self.error(kind));
        }
        self.pending_newlines = self.pending_newlines.saturating_add(1);
        self.strip();
        Ok(())
    }

    fn pos(&self) -> Position {
        Position::new(self.lineno, to_u32(self.consumed).saturating_add(1))
    }

    /// Position of the first non-whitespace character of the rest of the
    /// line.
    fn lead_pos(&self) -> Position {
        let lead = self.line.chars().take_while(|ch| ch.is_whitespace()).count();
        self.pos().shift(to_u32(lead))
    }

    /// Position just after the last non-whitespace character of the
    /// current line.
    fn line_end(&self) -> Position {
        Position::new(
            self.lineno,
            char_count(self.orig_line.trim_end()).saturating_add(1),
        )
    }

    fn advance(&mut self, bytes: usize) -> String {
        let at = if self.line.is_char_boundary(bytes) {
            bytes
        } else {
            self.line.len()
        };
        let rest = self.line.split_off(at);
        let taken = std::mem::replace(&mut self.line, rest);
        self.consumed += taken.chars().count();
        taken
    }

    fn take_char(&mut self) -> Option<char> {
        let ch = self.line.chars().next()?;
        self.advance(ch.len_utf8());
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        let lead = self.line.len() - self.line.trim_start().len();
        self.advance(lead);
    }

    fn strip(&mut self) {
        self.skip_whitespace();
        let keep = self.line.trim_end().len();
        self.line.truncate(keep);
    }

    /// Consumes the rest of the line as a fragment without trailing
    /// whitespace.
    fn take_rest(&mut self) -> Fragment {
        let start = self.pos();
        let text = self.line.trim_end().to_owned();
        let finish = start.shift(char_count(&text));
        let all = self.line.len();
        self.advance(all);
        Fragment {
            text,
            start,
            finish,
        }
    }

    fn error(&self, kind: ErrorKind) -> SyntaxError {
        SyntaxError::new(kind, self.pos(), self.orig_line.clone())
    }

    fn current_indent(&self) -> usize {
        self.indents.last().copied().unwrap_or(0)
    }

    // Tree building.

    fn top(&self) -> ListId {
        self.stacks.last().copied().unwrap_or_else(|| self.tree.root())
    }

    fn open(&mut self, kind: &[&'static str], at: Position) -> ListId {
        self.tree.open_tagged(kind, at)
    }

    fn emit(&mut self, list: ListId) {
        let top = self.top();
        self.tree.push_list(top, list);
    }

    fn newline_marker(&mut self) -> ListId {
        let at = self.line_end();
        self.open(&["newline"], at)
    }

    fn push_newline_to(&mut self, list: ListId) {
        let marker = self.newline_marker();
        self.tree.push_list(list, marker);
    }

    /// Emits the marker for the current line plus one for every
    /// continuation line consumed while reading it.
    fn flush_newlines(&mut self) {
        let count = std::mem::take(&mut self.pending_newlines).saturating_add(1);
        let top = self.top();
        for _ in 0..count {
            self.push_newline_to(top);
        }
    }

    fn string(&mut self, list: ListId, fragment: &Fragment) {
        self.tree.push(
            list,
            RawNode::string(fragment.text.clone(), fragment.start, fragment.finish),
        );
    }

    /// Builds `[:slim, :interpolate, text]`.
    fn interpolate(&mut self, fragment: &Fragment) -> ListId {
        let node = self.open(&["slim", "interpolate"], fragment.start);
        self.string(node, fragment);
        self.tree.close(node, fragment.finish);
        node
    }

    /// Builds `[:static, " "]` for a whitespace modifier.
    fn static_space(&mut self, at: Position) -> ListId {
        let node = self.open(&["static"], at);
        self.tree.push(node, RawNode::string(" ", at, at));
        node
    }

    // Lines.

    fn parse_line(&mut self) -> Result<(), SyntaxError> {
        if is_blank(&self.line) {
            let top = self.top();
            self.push_newline_to(top);
            return Ok(());
        }

        let indent = indent_width(&self.line, self.options.tabsize());
        self.skip_whitespace();

        if self.indents.is_empty() {
            self.indents.push(indent);
        }
        let expecting_indentation = self.stacks.len() > self.indents.len();

        if indent > self.current_indent() {
            if !expecting_indentation {
                return Err(self.error(ErrorKind::UnexpectedIndentation));
            }
            self.indents.push(indent);
        } else {
            if expecting_indentation {
                self.stacks.pop();
            }
            while indent < self.current_indent() && self.indents.len() > 1 {
                self.indents.pop();
                self.stacks.pop();
            }
            if indent != self.current_indent() {
                return Err(self.error(ErrorKind::MalformedIndentation));
            }
        }

        self.parse_line_indicators()?;
        self.flush_newlines();
        Ok(())
    }

    fn parse_line_indicators(&mut self) -> Result<(), SyntaxError> {
        let start = self.pos();

        if let Some(found) = capture(&HTML_COMMENT, &self.line) {
            let text_indent = self.current_indent() + found.group(1).len() + 2;
            self.advance(found.end);
            let comment = self.open(&["html", "comment"], start);
            let text = self.open(&["slim", "text", "verbatim"], start);
            let first = self.take_rest();
            let block = self.parse_text_block(Some(first), Some(text_indent));
            self.tree.push_list(text, block);
            self.tree.push_list(comment, text);
            self.emit(comment);
        } else if let Some(found) = capture(&CONDITIONAL_COMMENT, &self.line) {
            let condition = found.group(1).to_owned();
            let node = self.open(&["html", "condcomment"], start);
            self.tree
                .push(node, RawNode::string(condition, start.shift(2), self.line_end()));
            self.advance(found.end);
            let block = self.open(&["multi"], self.line_end());
            self.tree.push_list(node, block);
            self.emit(node);
            self.stacks.push(block);
        } else if self.line.starts_with('/') {
            self.parse_comment_block();
        } else if let Some(found) = capture(&TEXT_BLOCK, &self.line) {
            let trailing_space = found.group(1) == "'";
            let text_indent = self.current_indent() + found.group(2).len() + 1;
            self.advance(found.end);
            let text = self.open(&["slim", "text", "verbatim"], start);
            let first = self.take_rest();
            let block = self.parse_text_block(Some(first), Some(text_indent));
            self.tree.push_list(text, block);
            self.emit(text);
            if trailing_space {
                let space = self.static_space(self.line_end());
                self.emit(space);
            }
        } else if self.line.starts_with('<') {
            let node = self.open(&["multi"], start);
            let html = self.take_rest();
            let interpolated = self.interpolate(&html);
            self.tree.push_list(node, interpolated);
            let block = self.open(&["multi"], self.line_end());
            self.tree.push_list(node, block);
            self.emit(node);
            self.stacks.push(block);
        } else if self.line.starts_with('-') {
            self.advance(1);
            let node = self.open(&["slim", "control"], start);
            let code = self.parse_broken_line()?;
            self.string(node, &code);
            let block = self.open(&["multi"], code.finish);
            self.tree.push_list(node, block);
            self.tree.close(node, code.finish);
            self.emit(node);
            self.stacks.push(block);
        } else if let Some(found) = capture(&OUTPUT, &self.line) {
            let escape = found.group(1).is_empty();
            let modifiers = found.group(2).to_owned();
            self.advance(found.end);
            if modifiers.contains('<') {
                let space = self.static_space(start);
                self.emit(space);
            }
            let node = self.output(escape, start)?;
            self.emit(node.output);
            if modifiers.contains('>') || modifiers.contains('\'') {
                let space = self.static_space(self.line_end());
                self.emit(space);
            }
            self.stacks.push(node.block);
        } else if let Some(embedded) = self.parse_embedded()? {
            self.emit(embedded);
        } else if DOCTYPE.is_match(&self.line) {
            self.advance("doctype".len());
            self.skip_whitespace();
            let node = self.open(&["html", "doctype"], start);
            let value = self.take_rest();
            self.string(node, &value);
            self.tree.close(node, value.finish);
            self.emit(node);
        } else if !self.parse_tag_at_cursor()? {
            return Err(self.error(ErrorKind::UnknownLineIndicator));
        }
        Ok(())
    }

    /// Reads `code` after an output indicator and builds
    /// `[:slim, :output, escape, code, block]`.
    fn output(&mut self, escape: bool, start: Position) -> Result<OpenStatement, SyntaxError> {
        let node = self.open(&["slim", "output"], start);
        self.tree.push(node, RawNode::atom(escape.into(), start, start));
        let code = self.parse_broken_line()?;
        self.string(node, &code);
        let block = self.open(&["multi"], code.finish);
        self.tree.push_list(node, block);
        self.tree.close(node, code.finish);
        Ok(OpenStatement {
            output: node,
            block,
        })
    }

    /// Parses `engine(attrs):` followed by an indented text block, if the
    /// line starts with a known engine.
    fn parse_embedded(&mut self) -> Result<Option<ListId>, SyntaxError> {
        let Some(regex) = self.grammar.embedded.as_ref() else {
            return Ok(None);
        };
        let Some(found) = capture(regex, &self.line) else {
            return Ok(None);
        };
        let start = self.pos();
        let engine = found.group(1).to_owned();
        let attrs_source = found.group(2).to_owned();
        let separator = found.end - engine.len() - attrs_source.len();

        self.advance(engine.len());
        let node = self.open(&["slim", "embedded"], start);
        self.tree
            .push(node, RawNode::string(engine.clone(), start, self.pos()));

        // Attributes are read from the text between the engine name and the
        // colon, then the cursor resumes after the colon.
        let attrs_start = self.pos();
        let attrs_consumed = self.consumed;
        let tail = self.line.split_off(attrs_source.len());
        let attrs = self.open(&["html", "attrs"], attrs_start);
        self.parse_attributes(attrs)?;
        self.tree.close(attrs, self.pos());
        self.line = tail;
        self.consumed = attrs_consumed + attrs_source.chars().count();
        self.advance(separator);

        let text_indent = self.consumed;
        let first = self.take_rest();
        let block = self.parse_text_block(Some(first), Some(text_indent));
        self.tree.push_list(node, block);
        self.tree.push_list(node, attrs);
        Ok(Some(node))
    }
}

/// Handles to an output statement and its nested block.
struct OpenStatement {
    output: ListId,
    block: ListId,
}
