//! Behaviour-driven tests for `slim_lint_core` types.

use std::path::Path;
use std::str::FromStr;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use crate::{Position, RuleConfig, Severity, SourceLocation};

// ---------------------------------------------------------------------------
// Typed wrappers for Gherkin step parameters
// ---------------------------------------------------------------------------

/// A quoted string value from a Gherkin feature file.
#[derive(Debug, Clone, PartialEq, Eq)]
struct QuotedString(String);

impl FromStr for QuotedString {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim_matches('"').to_owned()))
    }
}

impl QuotedString {
    fn as_str(&self) -> &str {
        &self.0
    }
}

fn parse_position(text: &str) -> Position {
    let (line, column) = text.split_once(':').expect("line:column");
    Position::new(
        line.parse().expect("valid line"),
        column.parse().expect("valid column"),
    )
}

// ---------------------------------------------------------------------------
// Test world
// ---------------------------------------------------------------------------

#[derive(Default)]
struct TestWorld {
    location: Option<SourceLocation>,
    severity: Option<Severity>,
    rule: Option<RuleConfig>,
    json_output: Option<String>,
}

#[fixture]
fn world() -> TestWorld {
    TestWorld::default()
}

// ---------------------------------------------------------------------------
// Given steps
// ---------------------------------------------------------------------------

#[given("a location from {start} to {finish}")]
fn given_location(world: &mut TestWorld, start: QuotedString, finish: QuotedString) {
    world.location = Some(SourceLocation::merge(
        parse_position(start.as_str()),
        parse_position(finish.as_str()),
        None,
    ));
}

#[given("severity {name}")]
fn given_severity(world: &mut TestWorld, name: QuotedString) {
    world.severity = Some(name.as_str().parse().expect("known severity"));
}

#[given("a rule including {include} and excluding {exclude}")]
fn given_rule(world: &mut TestWorld, include: QuotedString, exclude: QuotedString) {
    world.rule = Some(
        RuleConfig::default()
            .with_include(include.as_str())
            .with_exclude(exclude.as_str()),
    );
}

// ---------------------------------------------------------------------------
// When steps
// ---------------------------------------------------------------------------

#[when("the severity is serialized to JSON")]
fn when_serialize_severity(world: &mut TestWorld) {
    let severity = world.severity.expect("severity should be set");
    world.json_output = Some(serde_json::to_string(&severity).expect("serialize severity"));
}

// ---------------------------------------------------------------------------
// Then steps
// ---------------------------------------------------------------------------

#[then("the location length is {length}")]
fn then_location_length(world: &mut TestWorld, length: QuotedString) {
    let location = world.location.expect("location should be set");
    let expected: u32 = length.as_str().parse().expect("numeric length");
    assert_eq!(location.length(), Some(expected));
}

#[then("the JSON holds the string {expected}")]
fn then_json_holds_string(world: &mut TestWorld, expected: QuotedString) {
    let json = world.json_output.as_ref().expect("JSON should be set");
    assert_eq!(json, &format!("\"{}\"", expected.as_str()));
}

#[then("the rule applies to {path}")]
fn then_rule_applies(world: &mut TestWorld, path: QuotedString) {
    let rule = world.rule.as_ref().expect("rule should be set");
    assert!(rule.applies_to(Path::new(path.as_str())));
}

#[then("the rule does not apply to {path}")]
fn then_rule_does_not_apply(world: &mut TestWorld, path: QuotedString) {
    let rule = world.rule.as_ref().expect("rule should be set");
    assert!(!rule.applies_to(Path::new(path.as_str())));
}

// ---------------------------------------------------------------------------
// Scenario registration
// ---------------------------------------------------------------------------

#[scenario(
    path = "tests/features/slim_lint_core.feature",
    name = "Location spanning a single line derives its length"
)]
fn location_length_behaviour(world: TestWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/slim_lint_core.feature",
    name = "Severity names round-trip through JSON"
)]
fn severity_json_behaviour(world: TestWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/slim_lint_core.feature",
    name = "Rule exclusions win over inclusions"
)]
fn rule_globs_behaviour(world: TestWorld) {
    let _ = world;
}
