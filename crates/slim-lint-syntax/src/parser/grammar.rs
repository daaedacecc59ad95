//! Line-level expressions, some of which depend on parser options.

use once_cell::sync::Lazy;
use regex::Regex;

use super::options::ParserOptions;
use crate::error::OptionsError;

macro_rules! static_regex {
    ($name:ident, $pattern:expr) => {
        #[expect(
            clippy::expect_used,
            reason = "constant expressions are exercised by the parser tests"
        )]
        pub(super) static $name: Lazy<Regex> =
            Lazy::new(|| Regex::new($pattern).expect("static expression compiles"));
    };
}

static_regex!(HTML_COMMENT, r"^/!( ?)");
static_regex!(CONDITIONAL_COMMENT, r"^/\[\s*(.*?)\s*\]\s*$");
static_regex!(TEXT_BLOCK, r"^([|'])( ?)");
static_regex!(OUTPUT, r"^=(=?)(['<>]*)");
static_regex!(DOCTYPE, r"^doctype\b");
static_regex!(WHITESPACE_MODIFIERS, r"^[<>']*");
static_regex!(BLOCK_EXPANSION, r"^\s*:\s*");
static_regex!(TAG_OUTPUT, r"^\s*=(=?)(['<>]*)");
static_regex!(CLOSED_TAG, r"^\s*/\s*");
static_regex!(SPLAT, r"^\s*\*");

/// Expressions compiled from a particular set of [`ParserOptions`].
#[derive(Debug, Clone)]
pub(super) struct Grammar {
    pub(super) tag: Regex,
    pub(super) attr_shortcut: Option<Regex>,
    pub(super) attr_list_open: Regex,
    pub(super) code_attr_open: Regex,
    pub(super) attr_name: Regex,
    pub(super) quoted_attr: Regex,
    pub(super) code_attr: Regex,
    pub(super) embedded: Option<Regex>,
}

impl Grammar {
    pub(super) fn new(options: &ParserOptions) -> Result<Self, OptionsError> {
        let mut keys: Vec<&str> = options.shortcuts().iter().map(|(key, _)| key.as_str()).collect();
        keys.sort_by_key(|key| std::cmp::Reverse(key.len()));
        let attr_keys: Vec<&str> = keys
            .iter()
            .copied()
            .filter(|key| {
                options
                    .shortcut(key)
                    .is_some_and(|shortcut| !shortcut.attrs().is_empty())
            })
            .collect();

        let word_tag = r"(?P<tag>\w(?:[\w:-]*\w)?)";
        let tag = if keys.is_empty() {
            format!(r"^(?:(?P<star>\*)\S|{word_tag})")
        } else {
            format!(
                r"^(?:(?P<shortcut>{})|(?P<star>\*)\S|{word_tag})",
                alternation(&keys)
            )
        };

        let attr_shortcut = if attr_keys.is_empty() {
            None
        } else {
            Some(Regex::new(&format!(
                r"^((?:{})+)((?:\w|-|/\d+|:[\w-]+)*)",
                alternation(&attr_keys)
            ))?)
        };

        let list_opens: String = options
            .attr_list_delims()
            .iter()
            .map(|(open, _)| class_char(*open))
            .collect();
        let code_opens: String = options
            .code_attr_delims()
            .iter()
            .map(|(open, _)| class_char(*open))
            .collect();
        let mut reserved_chars: Vec<char> = "\"'></=".chars().collect();
        for (open, close) in options
            .attr_list_delims()
            .iter()
            .chain(options.code_attr_delims())
        {
            reserved_chars.push(*open);
            reserved_chars.push(*close);
        }
        reserved_chars.sort_unstable();
        reserved_chars.dedup();
        let reserved: String = reserved_chars.into_iter().map(class_char).collect();
        let attr_name = format!(r"^\s*([^\x00\s{reserved}]+)");

        let embedded = if options.engines().is_empty() {
            None
        } else {
            let engines: Vec<&str> = options.engines().iter().map(String::as_str).collect();
            Some(Regex::new(&format!(
                r"^({})\b([^:]*):([ \t]*)",
                alternation(&engines)
            ))?)
        };

        Ok(Self {
            tag: Regex::new(&tag)?,
            attr_shortcut,
            attr_list_open: Regex::new(&format!(r"^\s*([{list_opens}])"))?,
            code_attr_open: Regex::new(&format!(r"^[{code_opens}]"))?,
            quoted_attr: Regex::new(&format!(r#"{attr_name}\s*=(=?)\s*("|')"#))?,
            code_attr: Regex::new(&format!(r"{attr_name}\s*=(=?)\s*"))?,
            attr_name: Regex::new(&attr_name)?,
            embedded,
        })
    }
}

fn alternation(items: &[&str]) -> String {
    items
        .iter()
        .map(|item| regex::escape(item))
        .collect::<Vec<_>>()
        .join("|")
}

fn class_char(ch: char) -> String {
    regex::escape(ch.encode_utf8(&mut [0; 4]))
}
