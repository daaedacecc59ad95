//! Behaviour-driven tests for the `slim_lint` runner.

use std::str::FromStr;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use super::{ForbiddenCode, NoBreakTags};
use crate::{LinterConfig, ParserOptions, Report, RuleConfig, Runner};

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
    config: LinterConfig,
    templates: Vec<(String, String)>,
    report: Option<Report>,
}

impl TestWorld {
    fn report(&self) -> &Report {
        self.report.as_ref().expect("templates should be linted")
    }
}

#[fixture]
fn world() -> TestWorld {
    TestWorld::default()
}

// ---------------------------------------------------------------------------
// Given steps
// ---------------------------------------------------------------------------

#[given("the template {source} in {file}")]
fn given_template(world: &mut TestWorld, source: QuotedString, file: QuotedString) {
    world
        .templates
        .push((file.as_str().to_owned(), source.as_str().to_owned()));
}

#[given("the rule {rule} excludes {glob}")]
fn given_exclusion(world: &mut TestWorld, rule: QuotedString, glob: QuotedString) {
    let config = std::mem::take(&mut world.config);
    world.config = config.with_rule(
        rule.as_str(),
        RuleConfig::default().with_exclude(glob.as_str()),
    );
}

#[given("front matter is skipped")]
fn given_front_matter(world: &mut TestWorld) {
    let config = std::mem::take(&mut world.config);
    world.config = config.with_skip_frontmatter(true);
}

// ---------------------------------------------------------------------------
// When steps
// ---------------------------------------------------------------------------

#[when("the templates are linted")]
fn when_linted(world: &mut TestWorld) {
    let runner = Runner::new(world.config.clone(), ParserOptions::default())
        .expect("default options are valid")
        .with_linter(NoBreakTags)
        .expect("unique linter")
        .with_linter(ForbiddenCode)
        .expect("unique linter");
    world.report = Some(runner.run(
        world
            .templates
            .iter()
            .map(|(file, source)| (file.as_str(), source.as_str())),
    ));
}

// ---------------------------------------------------------------------------
// Then steps
// ---------------------------------------------------------------------------

#[then("the report holds {count} lints")]
fn then_count(world: &mut TestWorld, count: QuotedString) {
    assert_eq!(world.report().len(), count.count());
}

#[then("the report inspected {count} files")]
fn then_files(world: &mut TestWorld, count: QuotedString) {
    assert_eq!(world.report().files_inspected(), count.count());
}

#[then("the linter {linter} reports {message} in {file} on line {line}")]
fn then_lint(
    world: &mut TestWorld,
    linter: QuotedString,
    message: QuotedString,
    file: QuotedString,
    line: QuotedString,
) {
    let found = world.report().lints().iter().any(|lint| {
        lint.linter() == linter.as_str()
            && lint.message() == message.as_str()
            && lint.filename() == file.as_str()
            && lint.location().line() == line.number()
    });
    assert!(found, "no matching lint in {:?}", world.report().lints());
}

#[then("the report has errors")]
fn then_errors(world: &mut TestWorld) {
    assert!(world.report().has_errors());
}

// ---------------------------------------------------------------------------
// Scenario registration
// ---------------------------------------------------------------------------

#[scenario(path = "tests/features/slim_lint.feature")]
fn slim_lint_behaviour(world: TestWorld) {
    let _ = world;
}
