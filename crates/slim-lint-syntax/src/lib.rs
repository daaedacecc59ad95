//! Parsing, normalization and matching of Slim templates.
//!
//! A template goes through four stages:
//!
//! 1. [`Parser`] reads the indentation-sensitive source into a [`RawTree`]
//!    whose nodes carry line and column spans, with one `[:newline]`
//!    marker per physical line.
//! 2. [`convert`] turns the raw tree into an owned [`Sexp`] and
//!    [`inject_lines`] records a line number on every node.
//! 3. The [`filters`] normalize the tree: implicit `end` and `do`
//!    insertion, interpolation, flattening and static merging.
//!    [`Engine`] runs stages 1 to 3 in one call.
//! 4. Rules traverse the normalized tree with a [`Visitor`], or a
//!    [`RubyExtractor`] flattens it into Ruby source and a [`LineMap`] for
//!    an external analyzer.
//!
//! # Example
//!
//! ```
//! use slim_lint_syntax::{Engine, Flow, ParserOptions, VisitorBuilder, capture, pattern, Pattern};
//!
//! let tree = Engine::new(ParserOptions::default())?.call("- if admin?\n  p Hi", None)?;
//! let visitor = VisitorBuilder::<Vec<String>>::new()
//!     .on(
//!         pattern![:slim, :control, {capture("code", Pattern::anything())}],
//!         |found, _, visit| {
//!             if let Some(code) = visit.capture("code").and_then(|node| node.as_str()) {
//!                 found.push(code.to_owned());
//!             }
//!             Flow::Continue
//!         },
//!     )
//!     .build()?;
//! let mut found = Vec::new();
//! visitor.run(&mut found, &tree);
//! assert_eq!(found, vec!["if admin?".to_owned()]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod convert;
mod engine;
mod error;
mod extractor;
pub mod filters;
mod lines;
mod matcher;
mod parser;
mod pattern;
mod sexp;
mod visitor;

pub use convert::convert;
pub use engine::{Engine, ExtractEngine};
pub use error::{ErrorKind, ExtractorError, OptionsError, RegistryError, SyntaxError};
pub use extractor::{ExtractedSource, LineMap, RubyExtractor};
pub use filters::{Filter, Handler};
pub use lines::inject_lines;
pub use matcher::{Anything, Capture, CaptureMap, Matcher, Nothing, capture};
pub use parser::{
    DEFAULT_ENGINES, ListId, Parser, ParserOptions, RawAtom, RawList, RawNode, RawTree, Shortcut,
};
pub use pattern::Pattern;
pub use sexp::{Atom, Node, NodeRef, Sexp, Value};
pub use visitor::{Flow, Visit, Visitor, VisitorBuilder};

#[cfg(test)]
mod tests;
