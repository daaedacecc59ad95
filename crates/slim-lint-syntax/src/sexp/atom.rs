//! Leaf values of the template tree.

use std::fmt;
use std::ops::Deref;

use slim_lint_core::Position;

/// A scalar carried by an [`Atom`].
///
/// Symbols name node kinds (`:html`, `:tag`, `:newline`, ...) and are
/// always drawn from a fixed vocabulary, so they are stored as static
/// strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// A node-kind symbol.
    Symbol(&'static str),
    /// Template text or embedded code.
    String(String),
    /// A flag such as the escape marker on output statements.
    Bool(bool),
}

impl Value {
    /// Returns the symbol name, if this is a symbol.
    #[must_use]
    pub const fn as_symbol(&self) -> Option<&'static str> {
        match self {
            Self::Symbol(name) => Some(*name),
            _ => None,
        }
    }

    /// Returns the text, if this is a string.
    #[must_use]
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Self::String(text) => Some(text),
            _ => None,
        }
    }

    /// Returns the flag, if this is a boolean.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Returns `true` if this is the symbol `name`.
    #[must_use]
    pub fn is_symbol(&self, name: &str) -> bool {
        self.as_symbol() == Some(name)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symbol(name) => write!(f, ":{name}"),
            Self::String(text) => write!(f, "{text:?}"),
            Self::Bool(flag) => write!(f, "{flag}"),
        }
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::String(text.to_owned())
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::String(text)
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

/// A located leaf of the tree.
///
/// Atoms compare equal when their values are equal; positions and line
/// numbers are ignored so that trees built from differently laid out
/// templates can be compared structurally.
///
/// # Example
///
/// ```
/// use slim_lint_core::Position;
/// use slim_lint_syntax::{Atom, Value};
///
/// let atom = Atom::new(Value::from("div"), Position::new(1, 1), Position::new(1, 4));
/// assert_eq!(atom, Value::from("div"));
/// assert_eq!(atom.as_string(), Some("div"));
/// ```
#[derive(Debug, Clone)]
pub struct Atom {
    value: Value,
    start: Position,
    finish: Position,
    line: Option<u32>,
}

impl Atom {
    /// Creates an atom spanning `start` to `finish`.
    #[must_use]
    pub const fn new(value: Value, start: Position, finish: Position) -> Self {
        Self {
            value,
            start,
            finish,
            line: None,
        }
    }

    /// Creates a zero-width symbol atom.
    #[must_use]
    pub const fn symbol(name: &'static str, at: Position) -> Self {
        Self::new(Value::Symbol(name), at, at)
    }

    /// Returns the wrapped value.
    #[must_use]
    pub const fn value(&self) -> &Value {
        &self.value
    }

    /// Consumes the atom, returning its value.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Replaces the wrapped value, keeping the span.
    pub fn set_value(&mut self, value: Value) {
        self.value = value;
    }

    /// Returns the start position.
    #[must_use]
    pub const fn start(&self) -> Position {
        self.start
    }

    /// Returns the finish position.
    #[must_use]
    pub const fn finish(&self) -> Position {
        self.finish
    }

    /// Returns the template line, falling back to the start line.
    #[must_use]
    pub fn line(&self) -> u32 {
        self.line.unwrap_or(self.start.line)
    }

    /// Records the template line.
    pub const fn set_line(&mut self, line: u32) {
        self.line = Some(line);
    }
}

impl Deref for Atom {
    type Target = Value;

    fn deref(&self) -> &Value {
        &self.value
    }
}

impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Atom {}

impl PartialEq<Value> for Atom {
    fn eq(&self, other: &Value) -> bool {
        &self.value == other
    }
}

impl PartialEq<str> for Atom {
    fn eq(&self, other: &str) -> bool {
        self.value.as_string() == Some(other)
    }
}

impl PartialEq<bool> for Atom {
    fn eq(&self, other: &bool) -> bool {
        self.value.as_bool() == Some(*other)
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt(f)
    }
}
