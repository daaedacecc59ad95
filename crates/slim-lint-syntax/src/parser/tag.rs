//! Tags, shortcuts, and attribute lists.

use slim_lint_core::Position;

use super::grammar::{
    BLOCK_EXPANSION, CLOSED_TAG, SPLAT, TAG_OUTPUT, WHITESPACE_MODIFIERS,
};
use super::{Fragment, ListId, RawNode, Session, capture, char_count, is_blank};
use crate::error::{ErrorKind, SyntaxError};

/// How a tag line started.
enum TagStart {
    /// A tag name such as `div` or `svg:path`.
    Word(String),
    /// A configured shortcut key.
    Shortcut(String),
    /// `*` followed by a splat attribute.
    Splat,
}

impl Session<'_> {
    /// Parses a tag if the cursor is at one. Returns `false` when the line
    /// does not start with a tag.
    pub(super) fn parse_tag_at_cursor(&mut self) -> Result<bool, SyntaxError> {
        let Some(start) = self.tag_start() else {
            return Ok(false);
        };
        self.parse_tag(start)?;
        Ok(true)
    }

    fn tag_start(&self) -> Option<TagStart> {
        let caps = self.grammar.tag.captures(&self.line)?;
        if let Some(word) = caps.name("tag") {
            Some(TagStart::Word(word.as_str().to_owned()))
        } else if let Some(key) = caps.name("shortcut") {
            Some(TagStart::Shortcut(key.as_str().to_owned()))
        } else {
            caps.name("star").map(|_| TagStart::Splat)
        }
    }

    fn parse_tag(&mut self, start: TagStart) -> Result<(), SyntaxError> {
        let tag_start = self.pos();
        let name = match start {
            TagStart::Word(word) => {
                self.advance(word.len());
                Fragment {
                    finish: tag_start.shift(char_count(&word)),
                    text: word,
                    start: tag_start,
                }
            }
            TagStart::Shortcut(key) => {
                let shortcut = self.options.shortcut(&key);
                let sets_attrs = shortcut.is_some_and(|found| !found.attrs().is_empty());
                let text = shortcut
                    .and_then(|found| found.tag_name())
                    .unwrap_or_else(|| self.options.default_tag())
                    .to_owned();
                if !sets_attrs {
                    self.advance(key.len());
                }
                Fragment {
                    text,
                    start: tag_start,
                    finish: self.pos(),
                }
            }
            TagStart::Splat => Fragment {
                text: "*".to_owned(),
                start: tag_start,
                finish: tag_start,
            },
        };

        let attrs = self.open(&["html", "attrs"], self.pos());
        self.parse_shortcut_attributes(attrs)?;

        let modifiers = capture(&WHITESPACE_MODIFIERS, &self.line)
            .map(|found| found.group(0).to_owned())
            .unwrap_or_default();
        self.advance(modifiers.len());
        let leading_space = modifiers.contains('<');
        let trailing_space = modifiers.contains('>') || modifiers.contains('\'');

        self.parse_attributes(attrs)?;
        self.tree.close(attrs, self.pos());

        let tag = self.open(&["html", "tag"], tag_start);
        self.string(tag, &name);
        self.tree.push_list(tag, attrs);
        if leading_space {
            let space = self.static_space(tag_start);
            self.emit(space);
        }
        self.emit(tag);
        if trailing_space {
            let space = self.static_space(self.line_end());
            self.emit(space);
        }

        self.parse_tag_content(tag, leading_space, trailing_space)
    }

    fn parse_tag_content(
        &mut self,
        tag: ListId,
        leading_space: bool,
        trailing_space: bool,
    ) -> Result<(), SyntaxError> {
        if let Some(found) = capture(&BLOCK_EXPANSION, &self.line) {
            self.advance(found.end);
            if let Some(embedded) = self.parse_embedded()? {
                self.tree.push_list(tag, embedded);
                return Ok(());
            }
            let Some(nested) = self.tag_start() else {
                return Err(self.error(ErrorKind::ExpectedTag));
            };
            let content = self.open(&["multi"], self.pos());
            self.tree.push_list(tag, content);
            let depth = self.stacks.len();
            self.stacks.push(content);
            self.parse_tag(nested)?;
            if depth < self.stacks.len() {
                self.stacks.remove(depth);
            }
        } else if let Some(found) = capture(&TAG_OUTPUT, &self.line) {
            let escape = found.group(1).is_empty();
            let modifiers = found.group(2).to_owned();
            let start = self.lead_pos();
            self.advance(found.end);
            if !leading_space && modifiers.contains('<') {
                let space = self.static_space(start);
                self.emit(space);
            }
            let statement = self.output(escape, start)?;
            self.tree.push_list(tag, statement.output);
            if !trailing_space && (modifiers.contains('>') || modifiers.contains('\'')) {
                let space = self.static_space(self.line_end());
                self.emit(space);
            }
            self.stacks.push(statement.block);
        } else if let Some(found) = capture(&CLOSED_TAG, &self.line) {
            self.advance(found.end);
            if !is_blank(&self.line) {
                return Err(self.error(ErrorKind::TextAfterClosedTag));
            }
        } else if is_blank(&self.line) {
            let content = self.open(&["multi"], self.line_end());
            self.tree.push_list(tag, content);
            self.stacks.push(content);
        } else {
            if self.line.starts_with(' ') {
                self.advance(1);
            }
            let start = self.pos();
            let text_indent = self.consumed;
            let text = self.open(&["slim", "text", "inline"], start);
            let first = self.take_rest();
            let block = self.parse_text_block(Some(first), Some(text_indent));
            self.tree.push_list(text, block);
            self.tree.push_list(tag, text);
        }
        Ok(())
    }

    /// Expands `.class` and `#id` style shortcuts into static attributes.
    fn parse_shortcut_attributes(&mut self, attrs: ListId) -> Result<(), SyntaxError> {
        loop {
            let Some(regex) = self.grammar.attr_shortcut.as_ref() else {
                return Ok(());
            };
            let Some(found) = capture(regex, &self.line) else {
                return Ok(());
            };
            let key = found.group(1).to_owned();
            let value = found.group(2).to_owned();
            let names: Vec<String> = match self.options.shortcut(&key) {
                Some(shortcut) if !shortcut.attrs().is_empty() => shortcut.attrs().to_vec(),
                _ => return Err(self.error(ErrorKind::IllegalShortcut)),
            };

            let start = self.pos();
            let value_start = start.shift(char_count(&key));
            let finish = value_start.shift(char_count(&value));
            for name in names {
                let attr = self.open(&["html", "attr"], start);
                self.tree.push(attr, RawNode::string(name, start, value_start));
                let literal = self.open(&["static"], value_start);
                self.tree
                    .push(literal, RawNode::string(value.clone(), value_start, finish));
                self.tree.close(literal, finish);
                self.tree.push_list(attr, literal);
                self.tree.push_list(attrs, attr);
            }
            self.advance(found.end);
        }
    }

    /// Parses an optionally delimited attribute list into `attrs`.
    ///
    /// Without delimiters, parsing stops at the first thing that is not an
    /// attribute. Within delimiters, boolean attributes are allowed and
    /// the list may continue over several lines.
    pub(super) fn parse_attributes(&mut self, attrs: ListId) -> Result<(), SyntaxError> {
        let mut delimiter = None;
        if let Some(found) = capture(&self.grammar.attr_list_open, &self.line) {
            delimiter = found
                .group(1)
                .chars()
                .next()
                .and_then(|open| self.options.attr_list_close(open));
            self.advance(found.end);
        }

        loop {
            if self.at_splat() {
                let found_end = capture(&SPLAT, &self.line).map_or(0, |found| found.end);
                let start = self.lead_pos();
                self.advance(found_end);
                let splat = self.open(&["slim", "splat"], start);
                let code = self.parse_ruby_code(delimiter)?;
                self.string(splat, &code);
                self.tree.close(splat, code.finish);
                self.tree.push_list(attrs, splat);
            } else if let Some(found) = capture(&self.grammar.quoted_attr, &self.line) {
                let name = found.group(1).to_owned();
                let escape = found.group(2).is_empty();
                let quote = found.group(3).chars().next().unwrap_or('"');
                let start = self.lead_pos();
                self.advance(found.end);
                let value = self.parse_quoted_attribute(quote)?;

                let attr = self.attr_head(&name, start);
                let escaped = self.open(&["escape"], value.start);
                self.tree
                    .push(escaped, RawNode::atom(escape.into(), value.start, value.start));
                let interpolated = self.interpolate(&value);
                self.tree.push_list(escaped, interpolated);
                self.tree.push_list(attr, escaped);
                self.tree.close(attr, value.finish);
                self.tree.push_list(attrs, attr);
            } else if let Some(found) = capture(&self.grammar.code_attr, &self.line) {
                let name = found.group(1).to_owned();
                let escape = found.group(2).is_empty();
                let start = self.lead_pos();
                self.advance(found.end);
                let value = self.parse_ruby_code(delimiter)?;
                if value.text.is_empty() {
                    return Err(self.error(ErrorKind::EmptyAttribute));
                }

                let attr = self.attr_head(&name, start);
                let code = self.open(&["slim", "attrvalue"], value.start);
                self.tree
                    .push(code, RawNode::atom(escape.into(), value.start, value.start));
                self.string(code, &value);
                self.tree.close(code, value.finish);
                self.tree.push_list(attr, code);
                self.tree.push_list(attrs, attr);
            } else {
                let Some(close) = delimiter else {
                    return Ok(());
                };
                if let Some(name) = self.boolean_attribute(close) {
                    let start = self.lead_pos();
                    let lead = self.line.len() - self.line.trim_start().len();
                    self.advance(lead + name.len());
                    let attr = self.attr_head(&name, start);
                    let empty = self.open(&["multi"], self.pos());
                    self.tree.push_list(attr, empty);
                    self.tree.push_list(attrs, attr);
                } else if self.line.trim_start().starts_with(close) {
                    let lead = self.line.len() - self.line.trim_start().len();
                    self.advance(lead + close.len_utf8());
                    return Ok(());
                } else {
                    self.skip_whitespace();
                    if !self.line.is_empty() {
                        return Err(self.error(ErrorKind::ExpectedAttribute));
                    }
                    if !self.next_line() {
                        return Err(self.error(ErrorKind::ExpectedClosingDelimiter(close)));
                    }
                    self.pending_newlines = self.pending_newlines.saturating_add(1);
                }
            }
        }
    }

    fn at_splat(&self) -> bool {
        capture(&SPLAT, &self.line).is_some_and(|found| {
            self.line
                .get(found.end..)
                .and_then(|rest| rest.chars().next())
                .is_some_and(|next| !next.is_whitespace())
        })
    }

    /// Returns the attribute name if the rest of the line starts with a
    /// boolean attribute inside a list closed by `close`.
    fn boolean_attribute(&self, close: char) -> Option<String> {
        let found = capture(&self.grammar.attr_name, &self.line)?;
        let follows = self.line.get(found.end..).and_then(|rest| rest.chars().next());
        match follows {
            None => Some(found.group(1).to_owned()),
            Some(next) if next.is_whitespace() || next == close => {
                Some(found.group(1).to_owned())
            }
            Some(_) => None,
        }
    }

    /// Opens `[:html, :attr, name]`.
    fn attr_head(&mut self, name: &str, start: Position) -> ListId {
        let attr = self.open(&["html", "attr"], start);
        let finish = start.shift(char_count(name));
        self.tree.push(attr, RawNode::string(name, start, finish));
        attr
    }

    /// Reads a code attribute value.
    ///
    /// The value ends at whitespace or the list delimiter unless they are
    /// nested inside brackets. A value consisting of a trailing `,` or `\`
    /// continues on the next line.
    fn parse_ruby_code(&mut self, outer: Option<char>) -> Result<Fragment, SyntaxError> {
        let start = self.pos();
        let mut code = String::new();
        let mut depth = 0_usize;
        let mut open = None;
        let mut close = None;

        while let Some(first) = self.line.chars().next() {
            if depth == 0 && (first.is_whitespace() || Some(first) == outer) {
                break;
            }
            let rest = self.line.trim_end();
            if rest == "," || rest == "\\" {
                code.push_str(rest);
                code.push('\n');
                self.expect_next_line(ErrorKind::UnexpectedEof)?;
                continue;
            }
            if depth > 0 {
                if Some(first) == open {
                    depth += 1;
                } else if Some(first) == close {
                    depth -= 1;
                }
            } else if self.grammar.code_attr_open.is_match(&self.line) {
                depth = 1;
                open = Some(first);
                close = self.options.code_attr_close(first);
            }
            code.push(first);
            self.take_char();
        }

        if depth != 0 {
            return Err(self.error(ErrorKind::ExpectedClosingDelimiter(close.unwrap_or(')'))));
        }
        Ok(Fragment {
            text: code,
            start,
            finish: self.pos(),
        })
    }

    /// Reads a quoted attribute value up to the matching `quote`, allowing
    /// the quote character inside `{...}` interpolation braces.
    fn parse_quoted_attribute(&mut self, quote: char) -> Result<Fragment, SyntaxError> {
        let start = self.pos();
        let mut value = String::new();
        let mut depth = 0_usize;

        loop {
            let first = self.line.chars().next();
            if depth == 0 && first == Some(quote) {
                break;
            }
            match first {
                None => {
                    value.push('\n');
                    self.expect_next_line(ErrorKind::ExpectedClosingQuote(quote))?;
                }
                Some('\\') if self.line.len() == 1 => {
                    value.push(' ');
                    self.expect_next_line(ErrorKind::ExpectedClosingQuote(quote))?;
                }
                Some(ch) => {
                    if ch == '{' {
                        depth += 1;
                    } else if ch == '}' {
                        depth = depth.saturating_sub(1);
                    }
                    value.push(ch);
                    self.take_char();
                }
            }
        }

        let finish = self.pos();
        self.take_char();
        Ok(Fragment {
            text: value,
            start,
            finish,
        })
    }
}
