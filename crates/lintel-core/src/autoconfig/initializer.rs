//! Autoconfig workflow: from a corpus of sources to a rules configuration

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use super::Registry;
use crate::Result;
use crate::config::{LintConfig, RuleSeverity, RulesConfig, is_error_severity, normalize_to_strings};
use crate::linter::LintExecutor;

/// Name of the shared configuration built from the recommended rules
pub const RECOMMENDED_CONFIG: &str = "lintel:recommended";

/// Outcome of [`configure_rules`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoconfigSummary {
    /// Rules configured to anything but off
    pub enabled_rules: usize,
    pub total_rules: usize,
    pub file_count: usize,
}

impl fmt::Display for AutoconfigSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Enabled {} out of {} rules based on {} file{}.",
            self.enabled_rules,
            self.total_rules,
            self.file_count,
            if self.file_count == 1 { "" } else { "s" }
        )
    }
}

fn recommended_error_rules(recommended: &RulesConfig) -> impl Iterator<Item = &str> {
    recommended
        .iter()
        .filter(|(_, config)| is_error_severity(config))
        .map(|(rule_id, _)| rule_id.as_str())
}

fn is_off(config: &Value) -> bool {
    matches!(RuleSeverity::from_config(config), Ok(RuleSeverity::Off))
}

/// Derive a rules configuration that the given sources already satisfy
///
/// Every candidate in `registry` is linted against every source. Rules with
/// no error-free candidate are disabled, except recommended ones which stay at
/// error level. Among the surviving candidates of each rule, a single
/// survivor wins, then a survivor with one option, then one with two options,
/// then the bare severity. The resulting severities are written as names.
pub fn configure_rules<S, E>(
    registry: &Registry,
    sources: IndexMap<String, S>,
    base_config: &LintConfig,
    executor: &E,
    recommended: &RulesConfig,
    progress: Option<&mut dyn FnMut(usize)>,
) -> Result<(LintConfig, AutoconfigSummary)>
where
    E: LintExecutor<S> + ?Sized,
{
    let file_count = sources.len();
    let registry = registry.lint_source_code(sources, base_config, executor, progress)?;

    let recommended_ids: Vec<&str> = recommended_error_rules(recommended).collect();
    let disabled: RulesConfig = registry
        .get_failing_rules_registry()
        .rules
        .into_keys()
        .map(|rule_id| {
            let severity = if recommended_ids.contains(&rule_id.as_str()) {
                RuleSeverity::Error
            } else {
                RuleSeverity::Off
            };
            (rule_id, Value::from(severity.as_number()))
        })
        .collect();

    let registry = registry.strip_failing_configs();
    let single = registry.create_config().rules;
    let two_options = registry.filter_by_specificity(2).create_config().rules;
    let three_options = registry.filter_by_specificity(3).create_config().rules;
    let severity_only = registry.filter_by_specificity(1).create_config().rules;

    // later maps take precedence
    let mut rules = RulesConfig::new();
    for layer in [disabled, severity_only, three_options, two_options, single] {
        rules.extend(layer);
    }

    let summary = AutoconfigSummary {
        enabled_rules: rules.values().filter(|config| !is_off(config)).count(),
        total_rules: rules.len(),
        file_count,
    };
    info!("{}", summary);

    normalize_to_strings(&mut rules);
    Ok((base_config.with_rules(rules), summary))
}

/// Extend the recommended configuration, keeping only rules that differ from it
pub fn extend_from_recommended(config: &LintConfig, recommended: &RulesConfig) -> LintConfig {
    let mut extended = config.clone();
    normalize_to_strings(&mut extended.rules);

    let mut recommended = recommended.clone();
    normalize_to_strings(&mut recommended);
    for rule_id in recommended_error_rules(&recommended) {
        if extended.rules.get(rule_id) == recommended.get(rule_id) {
            extended.rules.shift_remove(rule_id);
        }
    }

    extended.extends = Some(RECOMMENDED_CONFIG.to_string());
    extended
}
