//! Source position and location types for pointing at template regions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A line and column position within a template.
///
/// Both fields are one-indexed. Columns count Unicode scalar values, not
/// bytes, so a position can be displayed to users without conversion.
///
/// # Example
///
/// ```
/// use slim_lint_core::Position;
///
/// let pos = Position::new(10, 4);
/// assert_eq!(pos.line(), 10);
/// assert_eq!(pos.column(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// One-indexed line number.
    pub line: u32,
    /// One-indexed column number.
    pub column: u32,
}

impl Position {
    /// The first column of the first line.
    pub const START: Self = Self::new(1, 1);

    /// Creates a new line/column position.
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Returns the one-indexed line number.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Returns the one-indexed column number.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Returns the position reached after consuming `text` from here.
    ///
    /// A newline moves to the first column of the following line; every
    /// other character moves one column to the right.
    ///
    /// # Example
    ///
    /// ```
    /// use slim_lint_core::Position;
    ///
    /// let pos = Position::new(1, 3).advance("ab\ncd");
    /// assert_eq!(pos, Position::new(2, 3));
    /// ```
    #[must_use]
    pub fn advance(self, text: &str) -> Self {
        text.chars().fold(self, |pos, ch| {
            if ch == '\n' {
                Self::new(pos.line.saturating_add(1), 1)
            } else {
                Self::new(pos.line, pos.column.saturating_add(1))
            }
        })
    }

    /// Returns the position `columns` characters to the right.
    #[must_use]
    pub const fn shift(self, columns: u32) -> Self {
        Self::new(self.line, self.column.saturating_add(columns))
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A located region of a template, used when reporting findings.
///
/// A location always has a start; the last line and column default to the
/// start when a finding only knows a single point. The optional length is
/// the number of characters the finding covers on its first line.
///
/// # Example
///
/// ```
/// use slim_lint_core::SourceLocation;
///
/// let location = SourceLocation::from_line(7);
/// assert_eq!(location.line(), 7);
/// assert_eq!(location.column(), 1);
/// assert_eq!(location.last_line(), 7);
/// assert!(location.length().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    start_line: u32,
    start_column: u32,
    last_line: u32,
    last_column: u32,
    length: Option<u32>,
}

impl SourceLocation {
    /// Creates a location covering a single point.
    #[must_use]
    pub const fn at(position: Position) -> Self {
        Self {
            start_line: position.line,
            start_column: position.column,
            last_line: position.line,
            last_column: position.column,
            length: None,
        }
    }

    /// Creates a location at the first column of `line`.
    #[must_use]
    pub const fn from_line(line: u32) -> Self {
        Self::at(Position::new(line, 1))
    }

    /// Creates a location spanning `start` to `finish`.
    ///
    /// When `length` is `None` and both positions sit on the same line, the
    /// length is derived from the column distance.
    #[must_use]
    pub fn merge(start: Position, finish: Position, length: Option<u32>) -> Self {
        let derived = length.or_else(|| {
            (start.line == finish.line).then(|| finish.column.saturating_sub(start.column))
        });
        Self {
            start_line: start.line,
            start_column: start.column,
            last_line: finish.line,
            last_column: finish.column,
            length: derived,
        }
    }

    /// Returns the first line of the location.
    #[must_use]
    pub const fn line(&self) -> u32 {
        self.start_line
    }

    /// Returns the first column of the location.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.start_column
    }

    /// Returns the last line of the location.
    #[must_use]
    pub const fn last_line(&self) -> u32 {
        self.last_line
    }

    /// Returns the last column of the location.
    #[must_use]
    pub const fn last_column(&self) -> u32 {
        self.last_column
    }

    /// Returns the length of the located region, if known.
    #[must_use]
    pub const fn length(&self) -> Option<u32> {
        self.length
    }

    /// Returns the start as a [`Position`].
    #[must_use]
    pub const fn start(&self) -> Position {
        Position::new(self.start_line, self.start_column)
    }

    /// Returns the end as a [`Position`].
    #[must_use]
    pub const fn finish(&self) -> Position {
        Position::new(self.last_line, self.last_column)
    }

    /// Returns a copy moved by `lines` and `columns`.
    ///
    /// Used when a location computed against a fragment of the template
    /// must be re-anchored to the whole document.
    #[must_use]
    pub const fn adjust(self, lines: u32, columns: u32) -> Self {
        Self {
            start_line: self.start_line.saturating_add(lines),
            start_column: self.start_column.saturating_add(columns),
            last_line: self.last_line.saturating_add(lines),
            last_column: self.last_column.saturating_add(columns),
            length: self.length,
        }
    }
}

impl From<Position> for SourceLocation {
    fn from(position: Position) -> Self {
        Self::at(position)
    }
}
