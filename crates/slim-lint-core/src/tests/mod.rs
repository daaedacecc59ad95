//! Unit tests for `slim_lint_core` types.

mod lint_tests;
mod report_tests;

mod behaviour;
