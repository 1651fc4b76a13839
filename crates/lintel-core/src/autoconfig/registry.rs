//! Registry of candidate rule configurations and their measured error counts

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{LintConfig, RulesConfig};
use crate::linter::{LintExecutor, RuleStore};
use crate::{LintelError, Result, ResultExt};

/// Rules with more candidates than this only have their low-specificity
/// candidates linted
pub const MAX_CONFIG_COMBINATIONS: usize = 17;

/// Highest specificity still linted for a rule over the cap
const CAPPED_MAX_SPECIFICITY: usize = 2;

/// Rule id to its candidate configurations, in probing order
pub type RuleCandidates = IndexMap<String, Vec<Value>>;

/// One candidate configuration of a rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryItem {
    pub config: Value,
    /// Severity plus options: array length, or 1 for a bare severity or an empty array
    pub specificity: usize,
    /// `None` until the candidate is scheduled for linting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_count: Option<usize>,
}

impl RegistryItem {
    pub fn new(config: Value) -> Self {
        let specificity = match &config {
            Value::Array(items) => items.len().max(1),
            _ => 1,
        };
        Self {
            config,
            specificity,
            error_count: None,
        }
    }

    fn is_error_free(&self) -> bool {
        self.error_count == Some(0)
    }

    fn has_errors(&self) -> bool {
        self.error_count.is_some_and(|count| count > 0)
    }

    /// Candidates skipped by [`Registry::build_rule_sets`] once a rule is over the cap
    fn is_capped_out(&self) -> bool {
        self.specificity > CAPPED_MAX_SPECIFICITY
            || self
                .config
                .get(1)
                .is_some_and(|option| option.is_object() || option.is_array() || option.is_null())
    }
}

/// Candidate configurations per rule
///
/// Every narrowing operation returns a new registry and leaves the receiver
/// untouched. Item order within a rule is preserved, so item `n` of a rule is
/// always linted in rule-set `n`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Registry {
    pub rules: IndexMap<String, Vec<RegistryItem>>,
}

impl Registry {
    pub fn new(candidates: RuleCandidates) -> Self {
        let rules = candidates
            .into_iter()
            .map(|(rule_id, configs)| {
                (rule_id, configs.into_iter().map(RegistryItem::new).collect::<Vec<_>>())
            })
            .collect();
        Self { rules }
    }

    /// Replace every rule with the candidates of the store's non-deprecated rules
    pub fn populate_from_core_rules(&mut self, store: &RuleStore) {
        *self = Self::new(store.core_rule_configs(true));
    }

    /// Group candidates into rule-sets by their position
    ///
    /// Rule-set `n` holds candidate `n` of every rule that has one. Every
    /// included item gets an error count of zero. A rule with more than
    /// [`MAX_CONFIG_COMBINATIONS`] candidates only contributes candidates of
    /// specificity 1 or 2 whose first option, if any, is a non-null scalar.
    /// Building stops at the first position that contributes nothing.
    pub fn build_rule_sets(&mut self) -> Vec<RulesConfig> {
        let mut rule_sets: Vec<RulesConfig> = Vec::new();

        for index in 0.. {
            for (rule_id, items) in &mut self.rules {
                let capped = items.len() > MAX_CONFIG_COMBINATIONS;
                let Some(item) = items.get_mut(index) else {
                    continue;
                };
                if capped && item.is_capped_out() {
                    continue;
                }
                if rule_sets.len() == index {
                    rule_sets.push(RulesConfig::new());
                }
                rule_sets[index].insert(rule_id.clone(), item.config.clone());
                item.error_count = Some(0);
            }
            if rule_sets.len() == index {
                break;
            }
        }

        rule_sets
    }

    fn retain_items(&self, keep: impl Fn(&RegistryItem) -> bool) -> Self {
        let rules = self
            .rules
            .iter()
            .map(|(rule_id, items)| {
                let kept: Vec<_> = items.iter().filter(|item| keep(item)).cloned().collect();
                (rule_id.clone(), kept)
            })
            .collect();
        Self { rules }
    }

    /// Keep only candidates linted without errors, dropping rules left empty
    pub fn strip_failing_configs(&self) -> Self {
        let mut registry = self.retain_items(RegistryItem::is_error_free);
        registry.rules.retain(|_, items| !items.is_empty());
        registry
    }

    /// Keep only candidates that were scheduled for linting
    pub fn strip_extra_configs(&self) -> Self {
        self.retain_items(|item| item.error_count.is_some())
    }

    /// Rules for which every candidate produced errors
    pub fn get_failing_rules_registry(&self) -> Self {
        let rules = self
            .rules
            .iter()
            .filter(|(_, items)| !items.is_empty() && items.iter().all(RegistryItem::has_errors))
            .map(|(rule_id, items)| (rule_id.clone(), items.clone()))
            .collect();
        Self { rules }
    }

    /// Configuration of every rule narrowed down to exactly one candidate
    pub fn create_config(&self) -> LintConfig {
        let rules = self
            .rules
            .iter()
            .filter_map(|(rule_id, items)| match items.as_slice() {
                [only] => Some((rule_id.clone(), only.config.clone())),
                _ => None,
            })
            .collect();
        LintConfig::new(rules)
    }

    /// Keep only candidates of exactly `specificity`
    pub fn filter_by_specificity(&self, specificity: usize) -> Self {
        self.retain_items(|item| item.specificity == specificity)
    }

    /// Lint every source with every rule-set and record the errors per candidate
    ///
    /// Files are linted one at a time against each rule-set in turn, with
    /// `config` providing everything but the rules. Each file is dropped as
    /// soon as its last rule-set has run. `progress` is called once per
    /// (file, rule-set) pair with the total number of pairs. The returned
    /// registry holds only the candidates that were linted. The first failing
    /// file aborts the whole run.
    pub fn lint_source_code<S, E>(
        &self,
        sources: IndexMap<String, S>,
        config: &LintConfig,
        executor: &E,
        progress: Option<&mut dyn FnMut(usize)>,
    ) -> Result<Self>
    where
        E: LintExecutor<S> + ?Sized,
    {
        let (registry, _) = self.lint_sources(sources, config, executor, progress, false)?;
        Ok(registry)
    }

    /// Like [`Registry::lint_source_code`], but files whose lint fails with a
    /// recoverable error are left out of the counts instead of aborting
    ///
    /// Returns the registry along with the names of the skipped files. A file
    /// counts for nothing unless every rule-set ran on it. Fatal errors still
    /// abort.
    pub fn lint_source_code_skipping_failures<S, E>(
        &self,
        sources: IndexMap<String, S>,
        config: &LintConfig,
        executor: &E,
        progress: Option<&mut dyn FnMut(usize)>,
    ) -> Result<(Self, Vec<String>)>
    where
        E: LintExecutor<S> + ?Sized,
    {
        self.lint_sources(sources, config, executor, progress, true)
    }

    fn lint_sources<S, E>(
        &self,
        sources: IndexMap<String, S>,
        config: &LintConfig,
        executor: &E,
        mut progress: Option<&mut dyn FnMut(usize)>,
        skip_failures: bool,
    ) -> Result<(Self, Vec<String>)>
    where
        E: LintExecutor<S> + ?Sized,
    {
        let mut registry = self.clone();
        let rule_sets = registry.build_rule_sets();
        let total = sources.len() * rule_sets.len();
        let mut skipped = Vec::new();

        debug!("Linting with all possible rule combinations");

        for (file, source) in sources {
            debug!("Linting file: {}", file);

            let mut hits: Vec<(usize, String)> = Vec::new();
            let mut failure = None;
            for (index, rule_set) in rule_sets.iter().enumerate() {
                let pass_config = config.with_rules(rule_set.clone());
                match executor.verify(&source, &pass_config) {
                    Ok(diagnostics) => hits.extend(
                        diagnostics
                            .into_iter()
                            .map(|diagnostic| (index, diagnostic.rule_id)),
                    ),
                    Err(err) => {
                        failure = Some(err);
                        break;
                    }
                }

                if let Some(progress) = progress.as_deref_mut() {
                    progress(total);
                }
            }

            drop(source);

            let outcome = match failure {
                None => Ok(hits),
                Some(err) => Err(LintelError::lint_failure(&file, err)),
            };
            let hits = if skip_failures {
                match outcome.recoverable()? {
                    Some(hits) => hits,
                    None => {
                        skipped.push(file);
                        continue;
                    }
                }
            } else {
                outcome?
            };

            for (index, rule_id) in hits {
                registry.record_error(index, &rule_id, &file);
            }
        }

        Ok((registry.strip_extra_configs(), skipped))
    }

    fn record_error(&mut self, index: usize, rule_id: &str, file: &str) {
        match self.rules.get_mut(rule_id).and_then(|items| items.get_mut(index)) {
            Some(item) => *item.error_count.get_or_insert(0) += 1,
            None => warn!(
                "Ignoring diagnostic from '{}' in {}: not a candidate in rule-set {}",
                rule_id, file, index
            ),
        }
    }
}
