//! Parser configuration.

use crate::error::OptionsError;

/// Engines recognised after an `engine:` line indicator.
pub const DEFAULT_ENGINES: &[&str] = &[
    "ruby",
    "javascript",
    "css",
    "sass",
    "scss",
    "less",
    "coffee",
    "markdown",
    "textile",
    "rdoc",
    "creole",
    "wiki",
    "mediawiki",
    "org",
    "builder",
    "erb",
];

/// What a shortcut character expands to.
///
/// `#` and `.` are attribute shortcuts for `id` and `class`. A shortcut
/// may also name a tag, in which case it can start a line on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shortcut {
    tag: Option<String>,
    attrs: Vec<String>,
}

impl Shortcut {
    /// Creates a shortcut that sets the attribute `name`.
    #[must_use]
    pub fn attr(name: impl Into<String>) -> Self {
        Self {
            tag: None,
            attrs: vec![name.into()],
        }
    }

    /// Creates a shortcut that expands to the tag `name`.
    #[must_use]
    pub fn tag(name: impl Into<String>) -> Self {
        Self {
            tag: Some(name.into()),
            attrs: Vec::new(),
        }
    }

    /// Returns a copy that also sets the attribute `name`.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>) -> Self {
        self.attrs.push(name.into());
        self
    }

    /// Returns the tag name, if the shortcut names one.
    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Returns the attributes the shortcut sets.
    #[must_use]
    pub fn attrs(&self) -> &[String] {
        &self.attrs
    }
}

/// Options controlling how templates are read.
///
/// # Defaults
///
/// - `tabsize`: 4
/// - `default_tag`: `div`
/// - shortcuts: `#` for `id`, `.` for `class`
/// - attribute list delimiters: `()`, `[]`, `{}`
/// - code attribute delimiters: `()`, `[]`, `{}`
/// - embedded engines: [`DEFAULT_ENGINES`]
///
/// # Example
///
/// ```
/// use slim_lint_syntax::{ParserOptions, Shortcut};
///
/// let options = ParserOptions::default()
///     .with_tabsize(2)
///     .with_shortcut("@", Shortcut::attr("role"));
/// assert_eq!(options.tabsize(), 2);
/// assert!(options.shortcut("@").is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserOptions {
    tabsize: usize,
    default_tag: String,
    shortcuts: Vec<(String, Shortcut)>,
    attr_list_delims: Vec<(char, char)>,
    code_attr_delims: Vec<(char, char)>,
    engines: Vec<String>,
}

const BRACKETS: [(char, char); 3] = [('(', ')'), ('[', ']'), ('{', '}')];

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            tabsize: 4,
            default_tag: "div".to_owned(),
            shortcuts: vec![
                ("#".to_owned(), Shortcut::attr("id")),
                (".".to_owned(), Shortcut::attr("class")),
            ],
            attr_list_delims: BRACKETS.to_vec(),
            code_attr_delims: BRACKETS.to_vec(),
            engines: DEFAULT_ENGINES.iter().map(|name| (*name).to_owned()).collect(),
        }
    }
}

impl ParserOptions {
    /// Returns a copy with the tab width set. Zero is treated as one.
    #[must_use]
    pub fn with_tabsize(mut self, tabsize: usize) -> Self {
        self.tabsize = tabsize.max(1);
        self
    }

    /// Returns a copy with the tag used by attribute-only shortcuts.
    #[must_use]
    pub fn with_default_tag(mut self, tag: impl Into<String>) -> Self {
        self.default_tag = tag.into();
        self
    }

    /// Returns a copy with `key` bound to `shortcut`, replacing any
    /// existing binding for the same key.
    #[must_use]
    pub fn with_shortcut(mut self, key: impl Into<String>, shortcut: Shortcut) -> Self {
        let bound = key.into();
        self.shortcuts.retain(|(existing, _)| *existing != bound);
        self.shortcuts.push((bound, shortcut));
        self
    }

    /// Returns a copy with the attribute list delimiters replaced.
    #[must_use]
    pub fn with_attr_list_delims(mut self, delims: Vec<(char, char)>) -> Self {
        self.attr_list_delims = delims;
        self
    }

    /// Returns a copy with the code attribute delimiters replaced.
    #[must_use]
    pub fn with_code_attr_delims(mut self, delims: Vec<(char, char)>) -> Self {
        self.code_attr_delims = delims;
        self
    }

    /// Returns a copy with an additional embedded engine name.
    #[must_use]
    pub fn with_engine(mut self, name: impl Into<String>) -> Self {
        self.engines.push(name.into());
        self
    }

    /// Returns the tab width.
    #[must_use]
    pub const fn tabsize(&self) -> usize {
        self.tabsize
    }

    /// Returns the tag used by attribute-only shortcuts.
    #[must_use]
    pub fn default_tag(&self) -> &str {
        &self.default_tag
    }

    /// Returns the shortcut bound to `key`.
    #[must_use]
    pub fn shortcut(&self, key: &str) -> Option<&Shortcut> {
        self.shortcuts
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, shortcut)| shortcut)
    }

    /// Returns every shortcut binding.
    #[must_use]
    pub fn shortcuts(&self) -> &[(String, Shortcut)] {
        &self.shortcuts
    }

    /// Returns the attribute list delimiters.
    #[must_use]
    pub fn attr_list_delims(&self) -> &[(char, char)] {
        &self.attr_list_delims
    }

    /// Returns the code attribute delimiters.
    #[must_use]
    pub fn code_attr_delims(&self) -> &[(char, char)] {
        &self.code_attr_delims
    }

    /// Returns the embedded engine names.
    #[must_use]
    pub fn engines(&self) -> &[String] {
        &self.engines
    }

    /// Returns the closing delimiter for an attribute list opened by `open`.
    #[must_use]
    pub fn attr_list_close(&self, open: char) -> Option<char> {
        find_close(&self.attr_list_delims, open)
    }

    /// Returns the closing delimiter for a code attribute opened by `open`.
    #[must_use]
    pub fn code_attr_close(&self, open: char) -> Option<char> {
        find_close(&self.code_attr_delims, open)
    }

    /// Checks that every shortcut key can be recognised.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsError::InvalidShortcut`] for an empty key, a key
    /// containing word characters, or a shortcut that neither names a tag
    /// nor sets an attribute.
    pub fn validate(&self) -> Result<(), OptionsError> {
        for (key, shortcut) in &self.shortcuts {
            if key.is_empty() {
                return Err(OptionsError::invalid_shortcut(key, "key is empty"));
            }
            if key.chars().any(|ch| ch.is_alphanumeric() || ch == '_') {
                return Err(OptionsError::invalid_shortcut(
                    key,
                    "key must not contain word characters",
                ));
            }
            if shortcut.tag.is_none() && shortcut.attrs.is_empty() {
                return Err(OptionsError::invalid_shortcut(
                    key,
                    "shortcut sets neither a tag nor an attribute",
                ));
            }
        }
        Ok(())
    }
}

fn find_close(delims: &[(char, char)], open: char) -> Option<char> {
    delims
        .iter()
        .find(|(candidate, _)| *candidate == open)
        .map(|(_, close)| *close)
}
