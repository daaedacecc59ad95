//! Shared value types for the Slim lint toolchain.
//!
//! This crate holds the types that every other layer agrees on without
//! needing to know anything about template trees: source positions, the
//! finding record emitted by rules, the report aggregating findings, and the
//! per-rule configuration contract consumed from the configuration loader.
//!
//! # Core types
//!
//! - [`Position`] and [`SourceLocation`]: one-based source coordinates
//! - [`Severity`] and [`Lint`]: the finding record handed to reporters
//! - [`Report`]: an ordered collection of lints
//! - [`RuleConfig`] and [`LinterConfig`]: per-rule option bags
//!
//! # Example
//!
//! ```
//! use slim_lint_core::{Position, SourceLocation};
//!
//! let location = SourceLocation::merge(Position::new(2, 3), Position::new(2, 9), None);
//! assert_eq!(location.line(), 2);
//! assert_eq!(location.last_column(), 9);
//! ```

mod config;
mod lint;
mod position;
mod report;

pub use config::{LinterConfig, RuleConfig};
pub use lint::{Lint, ParseSeverityError, Severity};
pub use position::{Position, SourceLocation};
pub use report::Report;

#[cfg(test)]
mod tests;
