//! Unit tests for `slim_lint`.

mod document_tests;
mod reexport_tests;

mod behaviour;

use crate::{
    Flow, LintContext, Linter, Pattern, RegistryError, Visitor, VisitorBuilder, capture,
    pattern,
};

/// Reports every `br` tag.
struct NoBreakTags;

impl Linter for NoBreakTags {
    fn name(&self) -> &'static str {
        "NoBreakTags"
    }

    fn visitor(&self) -> Result<Visitor<LintContext>, RegistryError> {
        VisitorBuilder::new()
            .on(pattern![:html, :tag, "br"], |context: &mut LintContext, sexp, _| {
                context.report(sexp, "Avoid `br` tags");
                Flow::Continue
            })
            .build()
    }
}

/// Reports control code containing the configured `forbidden` word.
struct ForbiddenCode;

impl Linter for ForbiddenCode {
    fn name(&self) -> &'static str {
        "ForbiddenCode"
    }

    fn visitor(&self) -> Result<Visitor<LintContext>, RegistryError> {
        VisitorBuilder::new()
            .on(
                pattern![:slim, :control, {capture("code", Pattern::anything())}],
                |context: &mut LintContext, _, visit| {
                    let word = context
                        .config()
                        .option_str("forbidden")
                        .unwrap_or("debugger")
                        .to_owned();
                    if let Some(code) = visit.capture("code")
                        && code.as_str().is_some_and(|text| text.contains(&word))
                    {
                        context.report_node(code, format!("Remove `{word}`"));
                    }
                    Flow::Continue
                },
            )
            .build()
    }
}

/// Declares no callbacks at all.
struct Hollow;

impl Linter for Hollow {
    fn name(&self) -> &'static str {
        "Hollow"
    }

    fn visitor(&self) -> Result<Visitor<LintContext>, RegistryError> {
        VisitorBuilder::new().build()
    }
}
