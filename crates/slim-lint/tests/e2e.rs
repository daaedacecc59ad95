//! End-to-end tests for slim_lint using insta for snapshot testing.
//!
//! These tests build a runner from JSON configuration, register rules and
//! an external analyzer through the public API, and snapshot the rendered
//! report.

use insta::assert_snapshot;
use rstest::{fixture, rstest};

use slim_lint::{
    AnalyzerBridge, AnalyzerError, ExternalAnalyzer, ExternalOffense, Flow, LintContext, Linter,
    LinterConfig, ParserOptions, Pattern, RegistryError, Report, Runner, SetupError, Visitor,
    VisitorBuilder, capture, pattern,
};

const ADMIN: &str = "\
---
title: Admin
---
doctype html
html
  body style=\"margin: 0\"
    - binding.pry
    - if params[:debug]
      p = params[:debug]
";

const NAV: &str = "nav\n  a href=root_path style=\"color: red\" Home\n";

const CONFIG: &str = r#"{
    "skip_frontmatter": true,
    "linters": {
        "NoInlineStyles": {"exclude": ["partials/**"]},
        "NoDebugger": {"severity": "error", "calls": ["binding.pry", "byebug"]}
    }
}"#;

struct NoInlineStyles;

impl Linter for NoInlineStyles {
    fn name(&self) -> &'static str {
        "NoInlineStyles"
    }

    fn visitor(&self) -> Result<Visitor<LintContext>, RegistryError> {
        VisitorBuilder::new()
            .on(pattern![:html, :attr, "style"], |context: &mut LintContext, sexp, _| {
                context.report(sexp, "Move inline styles into a stylesheet");
                Flow::Continue
            })
            .build()
    }
}

struct NoDebugger;

impl Linter for NoDebugger {
    fn name(&self) -> &'static str {
        "NoDebugger"
    }

    fn visitor(&self) -> Result<Visitor<LintContext>, RegistryError> {
        VisitorBuilder::new()
            .on(
                pattern![:slim, :control, {capture("code", Pattern::anything())}],
                |context: &mut LintContext, _, visit| {
                    let code = visit
                        .capture("code")
                        .and_then(|node| node.as_str())
                        .unwrap_or_default()
                        .to_owned();
                    let calls: Vec<String> = context
                        .config()
                        .option_strings("calls")
                        .into_iter()
                        .map(str::to_owned)
                        .collect();
                    if let Some(call) = calls.iter().find(|call| code.contains(call.as_str())) {
                        let message = format!("Remove `{call}`");
                        if let Some(node) = visit.capture("code") {
                            context.report_node(node, message);
                        }
                    }
                    Flow::Continue
                },
            )
            .build()
    }
}

/// Flags every extracted line that reads request parameters.
struct ParamsAnalyzer;

impl ExternalAnalyzer for ParamsAnalyzer {
    fn analyze(&self, _file: &str, source: &str) -> Result<Vec<ExternalOffense>, AnalyzerError> {
        Ok((1_u32..)
            .zip(source.lines())
            .filter(|(_, text)| text.contains("params"))
            .map(|(line, _)| ExternalOffense::new(line, 1, "Security/Params", "unfiltered params"))
            .collect())
    }
}

fn build_runner(config: LinterConfig) -> Result<Runner, SetupError> {
    let bridge = AnalyzerBridge::new("RuboCop", ParserOptions::default(), ParamsAnalyzer)?;
    Runner::new(config, ParserOptions::default())?
        .with_linter(NoInlineStyles)?
        .with_linter(NoDebugger)?
        .with_analyzer(bridge)
}

#[fixture]
fn runner() -> Runner {
    let config: LinterConfig =
        serde_json::from_str(CONFIG).unwrap_or_else(|err| panic!("config: {err}"));
    build_runner(config).unwrap_or_else(|err| panic!("runner: {err}"))
}

fn render(report: &Report) -> String {
    report
        .lints()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Happy Path: Full runs
// =============================================================================

#[rstest]
fn report_covers_rules_bridge_and_syntax_errors(runner: Runner) {
    let report = runner.run([
        ("partials/_nav.slim", NAV),
        ("broken.slim", "div\n?oops\n"),
        ("admin.slim", ADMIN),
    ]);
    assert_eq!(report.files_inspected(), 3);
    assert_snapshot!(render(&report), @r"
    admin.slim:6 [warning] NoInlineStyles: Move inline styles into a stylesheet
    admin.slim:7 [error] NoDebugger: Remove `binding.pry`
    admin.slim:8 [warning] RuboCop: Security/Params: unfiltered params
    admin.slim:9 [warning] RuboCop: Security/Params: unfiltered params
    broken.slim:2 [error] Syntax: Unknown line indicator
    ");
}

#[rstest]
fn rule_names_list_rules_then_bridges(runner: Runner) {
    let names: Vec<&str> = runner.rule_names().collect();
    assert_eq!(names, vec!["NoInlineStyles", "NoDebugger", "RuboCop"]);
}

#[rstest]
fn clean_templates_produce_an_empty_report(runner: Runner) {
    let report = runner.run([("clean.slim", "ul\n  li = item.name\n")]);
    assert!(report.is_empty());
    assert!(!report.has_errors());
    assert_eq!(report.files_inspected(), 1);
}

// =============================================================================
// Unhappy Path: Setup errors
// =============================================================================

#[test]
fn duplicate_bridge_names_are_rejected() {
    let bridge = AnalyzerBridge::new("NoDebugger", ParserOptions::default(), ParamsAnalyzer)
        .unwrap_or_else(|err| panic!("bridge: {err}"));
    let result = Runner::new(LinterConfig::default(), ParserOptions::default())
        .and_then(|runner| runner.with_linter(NoDebugger))
        .and_then(|runner| runner.with_analyzer(bridge));
    let error = result.expect_err("duplicate name");
    assert_snapshot!(error.to_string(), @"linter NoDebugger is registered twice");
}

#[test]
fn invalid_configuration_is_a_deserialization_error() {
    let result = serde_json::from_str::<LinterConfig>(
        r#"{"linters": {"NoDebugger": {"severity": "fatal"}}}"#,
    );
    assert!(result.is_err());
}
