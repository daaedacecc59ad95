//! Multi-line constructs: text blocks, code comments, and broken lines.

use slim_lint_core::Position;

use super::{Fragment, ListId, Session, char_count, indent_width, is_blank, to_u32};
use crate::error::{ErrorKind, SyntaxError};

impl Session<'_> {
    /// Reads a text block whose first line is `first` and whose nested
    /// lines are indented deeper than the current line.
    ///
    /// `first_indent` is the column (zero-based) where the first line's text
    /// starts. Deeper continuation lines keep their extra indentation as
    /// leading spaces. Each continuation line is preceded by a separate
    /// `"\n"` interpolation located at the end of the previous text line,
    /// which also absorbs any blank lines in between.
    pub(super) fn parse_text_block(
        &mut self,
        first: Option<Fragment>,
        first_indent: Option<usize>,
    ) -> ListId {
        let start = first.as_ref().map_or_else(|| self.line_end(), |line| line.start);
        let block = self.open(&["multi"], start);
        let mut text_indent = first_indent;

        match first {
            Some(line) if !line.text.is_empty() => {
                let node = self.interpolate(&line);
                self.tree.push_list(block, node);
            }
            _ => text_indent = None,
        }

        let mut last_end = self.line_end();
        let mut empty_lines = 0_usize;
        while let Some(next) = self.peek_line() {
            if is_blank(next) {
                self.push_newline_to(block);
                self.next_line();
                if text_indent.is_some() {
                    empty_lines += 1;
                }
                continue;
            }

            let indent = indent_width(next, self.options.tabsize());
            if indent <= self.current_indent() {
                break;
            }

            if text_indent.is_some() {
                let separator = "\n".repeat(empty_lines + 1);
                let fragment = Fragment {
                    finish: last_end.advance(&separator),
                    text: separator,
                    start: last_end,
                };
                let node = self.interpolate(&fragment);
                self.tree.push_list(block, node);
            }
            empty_lines = 0;

            self.push_newline_to(block);
            self.next_line();
            self.skip_whitespace();

            let offset = match text_indent {
                Some(expected) if indent >= expected => indent - expected,
                Some(_) => {
                    text_indent = Some(indent);
                    0
                }
                None => 0,
            };
            let lead = self.pos();
            let body = self.take_rest();
            let content = Fragment {
                text: format!("{}{}", " ".repeat(offset), body.text),
                start: Position::new(
                    lead.line,
                    lead.column.saturating_sub(to_u32(offset)).max(1),
                ),
                finish: body.finish,
            };
            let node = self.interpolate(&content);
            self.tree.push_list(block, node);

            text_indent.get_or_insert(indent);
            last_end = self.line_end();
        }
        block
    }

    /// Skips the nested block of a `/` code comment, keeping one newline
    /// marker per swallowed line.
    pub(super) fn parse_comment_block(&mut self) {
        while let Some(next) = self.peek_line() {
            if !is_blank(next) && indent_width(next, self.options.tabsize()) <= self.current_indent()
            {
                break;
            }
            let top = self.top();
            self.push_newline_to(top);
            self.next_line();
        }
    }

    /// Reads code that may continue onto following lines when a line ends
    /// with `,` or `\`.
    ///
    /// Continuation lines keep their indentation relative to the least
    /// indented of them. One pending newline is recorded per continuation
    /// line.
    pub(super) fn parse_broken_line(&mut self) -> Result<Fragment, SyntaxError> {
        self.skip_whitespace();
        let start = self.pos();
        let first = self.line.trim_end().to_owned();
        let mut finish = start.shift(char_count(&first));
        let mut continued: Vec<String> = Vec::new();

        let mut last = first.clone();
        while last.ends_with(',') || last.ends_with('\\') {
            if !self.next_line() {
                return Err(self.error(ErrorKind::UnexpectedEof));
            }
            self.pending_newlines = self.pending_newlines.saturating_add(1);
            last = self.line.trim_end().to_owned();
            finish = self.line_end();
            continued.push(last.clone());
        }

        let min_indent = continued
            .iter()
            .filter(|line| !is_blank(line))
            .map(|line| leading_whitespace(line))
            .min()
            .unwrap_or(0);
        let mut code = first;
        for line in &continued {
            code.push('\n');
            code.extend(line.chars().skip(min_indent));
        }

        let rest = self.line.len();
        self.advance(rest);
        Ok(Fragment {
            text: code,
            start,
            finish,
        })
    }
}

fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|ch| ch.is_whitespace()).count()
}
