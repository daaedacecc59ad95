//! Per-rule configuration consumed from the configuration loader.
//!
//! Loading and merging configuration files happens elsewhere; this module
//! only defines the shape the lint core reads. Nothing here mutates or
//! persists configuration.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::lint::Severity;

/// Options for a single rule.
///
/// Unknown keys are kept in an option bag so that rules can read settings
/// the core knows nothing about.
///
/// # Defaults
///
/// - `enabled`: `true`
/// - `include`: empty (every file)
/// - `exclude`: empty
/// - `severity`: `None` (the rule's own default)
///
/// # Example
///
/// ```
/// use slim_lint_core::RuleConfig;
///
/// let config: RuleConfig = serde_json::from_str(
///     r#"{"enabled": true, "exclude": ["vendor/**"], "max": 80}"#,
/// ).expect("valid config");
/// assert!(config.applies_to("app/views/index.slim".as_ref()));
/// assert!(!config.applies_to("vendor/theme/index.slim".as_ref()));
/// assert_eq!(config.option_u64("max"), Some(80));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    enabled: bool,
    include: Vec<String>,
    exclude: Vec<String>,
    severity: Option<Severity>,
    #[serde(flatten)]
    options: BTreeMap<String, Value>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            include: Vec::new(),
            exclude: Vec::new(),
            severity: None,
            options: BTreeMap::new(),
        }
    }
}

impl RuleConfig {
    /// Returns a copy with `enabled` set.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Returns a copy with an added include glob.
    #[must_use]
    pub fn with_include(mut self, glob: impl Into<String>) -> Self {
        self.include.push(glob.into());
        self
    }

    /// Returns a copy with an added exclude glob.
    #[must_use]
    pub fn with_exclude(mut self, glob: impl Into<String>) -> Self {
        self.exclude.push(glob.into());
        self
    }

    /// Returns a copy with a severity override.
    #[must_use]
    pub const fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Returns a copy with an added option.
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.options.insert(key.into(), value);
        self
    }

    /// Returns whether the rule is enabled.
    #[must_use]
    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the include globs.
    #[must_use]
    pub fn include(&self) -> &[String] {
        &self.include
    }

    /// Returns the exclude globs.
    #[must_use]
    pub fn exclude(&self) -> &[String] {
        &self.exclude
    }

    /// Returns the severity override, if any.
    #[must_use]
    pub const fn severity(&self) -> Option<Severity> {
        self.severity
    }

    /// Returns the raw option bag.
    #[must_use]
    pub const fn options(&self) -> &BTreeMap<String, Value> {
        &self.options
    }

    /// Returns an option value by key.
    #[must_use]
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    /// Returns a string option.
    #[must_use]
    pub fn option_str(&self, key: &str) -> Option<&str> {
        self.option(key).and_then(Value::as_str)
    }

    /// Returns a boolean option.
    #[must_use]
    pub fn option_bool(&self, key: &str) -> Option<bool> {
        self.option(key).and_then(Value::as_bool)
    }

    /// Returns an unsigned integer option.
    #[must_use]
    pub fn option_u64(&self, key: &str) -> Option<u64> {
        self.option(key).and_then(Value::as_u64)
    }

    /// Returns a list-of-strings option, skipping non-string entries.
    #[must_use]
    pub fn option_strings(&self, key: &str) -> Vec<&str> {
        self.option(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Returns whether the rule should run against `path`.
    ///
    /// An empty include list accepts every path. Exclusions take precedence
    /// over inclusions. Glob patterns that fail to compile never match.
    #[must_use]
    pub fn applies_to(&self, path: &Path) -> bool {
        let included =
            self.include.is_empty() || self.include.iter().any(|glob| glob_matches(glob, path));
        included && !self.exclude.iter().any(|glob| glob_matches(glob, path))
    }
}

fn glob_matches(glob: &str, path: &Path) -> bool {
    glob::Pattern::new(glob).is_ok_and(|pattern| pattern.matches_path(path))
}

/// Configuration for a whole lint run.
///
/// # Example
///
/// ```
/// use slim_lint_core::{LinterConfig, RuleConfig};
///
/// let config = LinterConfig::default()
///     .with_rule("TagCase", RuleConfig::default().with_enabled(false));
/// assert!(!config.rule("TagCase").enabled());
/// assert!(config.rule("Unknown").enabled());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinterConfig {
    skip_frontmatter: bool,
    linters: BTreeMap<String, RuleConfig>,
}

impl LinterConfig {
    /// Returns a copy with the front-matter option set.
    #[must_use]
    pub const fn with_skip_frontmatter(mut self, skip: bool) -> Self {
        self.skip_frontmatter = skip;
        self
    }

    /// Returns a copy with configuration for `name`.
    #[must_use]
    pub fn with_rule(mut self, name: impl Into<String>, config: RuleConfig) -> Self {
        self.linters.insert(name.into(), config);
        self
    }

    /// Returns whether leading front matter should be stripped.
    #[must_use]
    pub const fn skip_frontmatter(&self) -> bool {
        self.skip_frontmatter
    }

    /// Returns the configuration for `name`, or the default when the rule
    /// is not mentioned.
    #[must_use]
    pub fn rule(&self, name: &str) -> RuleConfig {
        self.linters.get(name).cloned().unwrap_or_default()
    }

    /// Returns the names of all explicitly configured rules.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.linters.keys().map(String::as_str)
    }
}
