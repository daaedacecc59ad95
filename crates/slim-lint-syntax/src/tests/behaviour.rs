//! Behaviour-driven tests for parsing, normalization and extraction.

use std::str::FromStr;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use super::find_all;
use crate::{Engine, ExtractedSource, ParserOptions, RubyExtractor, Sexp, SyntaxError};

// ---------------------------------------------------------------------------
// Typed wrappers for Gherkin step parameters
// ---------------------------------------------------------------------------

/// A quoted string value from a Gherkin feature file, with `\n` escapes
/// turned into line breaks.
#[derive(Debug, Clone, PartialEq, Eq)]
struct QuotedString(String);

impl FromStr for QuotedString {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim_matches('"').replace("\\n", "\n")))
    }
}

impl QuotedString {
    fn as_str(&self) -> &str {
        &self.0
    }

    fn number(&self) -> u32 {
        self.0.parse().expect("numeric step parameter")
    }

    fn count(&self) -> usize {
        self.0.parse().expect("numeric step parameter")
    }
}

// ---------------------------------------------------------------------------
// Test world
// ---------------------------------------------------------------------------

#[derive(Default)]
struct TestWorld {
    template: String,
    tree: Option<Result<Sexp, SyntaxError>>,
    extracted: Option<ExtractedSource>,
}

impl TestWorld {
    fn tree(&self) -> &Sexp {
        self.tree
            .as_ref()
            .expect("template should be normalized")
            .as_ref()
            .expect("normalization should succeed")
    }

    fn ends(&self) -> Vec<&Sexp> {
        find_all(self.tree(), &|sexp| {
            sexp.is(&["code"]) && sexp.str_at(1) == Some("end")
        })
    }
}

#[fixture]
fn world() -> TestWorld {
    TestWorld::default()
}

// ---------------------------------------------------------------------------
// Given steps
// ---------------------------------------------------------------------------

#[given("the template {source}")]
fn given_template(world: &mut TestWorld, source: QuotedString) {
    world.template = source.as_str().to_owned();
}

// ---------------------------------------------------------------------------
// When steps
// ---------------------------------------------------------------------------

#[when("the template is normalized")]
fn when_normalized(world: &mut TestWorld) {
    let engine = Engine::new(ParserOptions::default()).expect("default options are valid");
    world.tree = Some(engine.call(&world.template, Some("behaviour.slim")));
}

#[when("the template is extracted")]
fn when_extracted(world: &mut TestWorld) {
    let extractor =
        RubyExtractor::new(ParserOptions::default()).expect("default options are valid");
    world.extracted = Some(
        extractor
            .extract(&world.template, None)
            .expect("template extracts"),
    );
}

// ---------------------------------------------------------------------------
// Then steps
// ---------------------------------------------------------------------------

#[then("the tree holds {count} control statements")]
fn then_controls(world: &mut TestWorld, count: QuotedString) {
    let controls = find_all(world.tree(), &|sexp| sexp.is(&["slim", "control"]));
    assert_eq!(controls.len(), count.count());
}

#[then("the tree holds {count} implicit ends")]
fn then_ends(world: &mut TestWorld, count: QuotedString) {
    assert_eq!(world.ends().len(), count.count());
}

#[then("the first implicit end starts at {position}")]
fn then_first_end(world: &mut TestWorld, position: QuotedString) {
    let ends = world.ends();
    let end = ends.first().expect("an implicit end");
    assert_eq!(end.start().to_string(), position.as_str());
}

#[then("normalization fails with {message} on line {line}")]
fn then_fails(world: &mut TestWorld, message: QuotedString, line: QuotedString) {
    let result = world.tree.as_ref().expect("template should be normalized");
    let error = result.as_ref().expect_err("normalization should fail");
    assert_eq!(error.kind().to_string(), message.as_str());
    assert_eq!(error.line(), line.number());
    assert_eq!(error.file(), Some("behaviour.slim"));
}

#[then("the extracted source is {expected}")]
fn then_extracted_source(world: &mut TestWorld, expected: QuotedString) {
    let extracted = world.extracted.as_ref().expect("template should be extracted");
    assert_eq!(extracted.source(), expected.as_str());
}

#[then("generated line {generated} maps to template line {original}")]
fn then_line_maps(world: &mut TestWorld, generated: QuotedString, original: QuotedString) {
    let extracted = world.extracted.as_ref().expect("template should be extracted");
    assert_eq!(
        extracted.line_map().original_line(generated.number()),
        Some(original.number())
    );
}

// ---------------------------------------------------------------------------
// Scenario registration
// ---------------------------------------------------------------------------

#[scenario(path = "tests/features/slim_lint_syntax.feature")]
fn slim_lint_syntax_behaviour(world: TestWorld) {
    let _ = world;
}
