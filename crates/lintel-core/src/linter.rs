//! Rule dispatch and the lint pass over one source file
//!
//! A [`Rule`] turns its options into `(event key, listener)` pairs. The
//! [`Linter`] instantiates every enabled rule of a [`LintConfig`], wires the
//! listeners into a selector-aware generator and traverses the AST once,
//! collecting what the listeners report through the [`LintContext`].

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::ast::Node;
use crate::autoconfig::{RuleCandidates, generate_configs_from_schema};
use crate::config::{LintConfig, RuleSeverity, rule_options};
use crate::diagnostics::{Diagnostic, Location};
use crate::events::{Emitter, Listener, NodeEventGenerator, SelectorEventGenerator};
use crate::source_code::SourceCode;
use crate::traverser::Traverser;
use crate::{LintelError, Result};

/// Listener signature for rules
pub type RuleListener<'a> = Listener<'a, LintContext<'a>>;

/// Static description of a rule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuleMeta {
    pub description: String,
    /// JSON schema of the positional options, as an array of option schemas
    pub schema: Value,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub recommended: bool,
}

/// A lint rule
pub trait Rule {
    /// Identifier used in configuration files
    fn id(&self) -> &'static str;

    fn meta(&self) -> RuleMeta;

    /// Build the listeners for one lint pass from the options that follow the
    /// severity in the rule's configuration
    fn create<'a>(&self, options: &[Value]) -> Result<Vec<(String, RuleListener<'a>)>>;
}

/// Ordered collection of available rules
#[derive(Default)]
pub struct RuleStore {
    rules: IndexMap<String, Box<dyn Rule>>,
}

impl RuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule, replacing any rule with the same id
    pub fn register(&mut self, rule: impl Rule + 'static) {
        self.rules.insert(rule.id().to_string(), Box::new(rule));
    }

    pub fn get(&self, rule_id: &str) -> Option<&dyn Rule> {
        self.rules.get(rule_id).map(|rule| rule.as_ref())
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Every candidate configuration of every rule, derived from its option schema
    pub fn core_rule_configs(&self, no_deprecated: bool) -> RuleCandidates {
        self.rules
            .iter()
            .filter_map(|(rule_id, rule)| {
                let meta = rule.meta();
                if no_deprecated && meta.deprecated {
                    return None;
                }
                Some((rule_id.clone(), generate_configs_from_schema(&meta.schema)))
            })
            .collect()
    }
}

impl fmt::Debug for RuleStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleStore")
            .field("rules", &self.rules.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Per-pass state handed to rule listeners
pub struct LintContext<'a> {
    source: &'a SourceCode,
    settings: &'a Map<String, Value>,
    rules: Vec<(String, RuleSeverity)>,
    active: usize,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> LintContext<'a> {
    fn new(
        source: &'a SourceCode,
        settings: &'a Map<String, Value>,
        rules: Vec<(String, RuleSeverity)>,
    ) -> Self {
        Self {
            source,
            settings,
            rules,
            active: 0,
            diagnostics: Vec::new(),
        }
    }

    pub fn source(&self) -> &'a SourceCode {
        self.source
    }

    pub fn settings(&self) -> &'a Map<String, Value> {
        self.settings
    }

    /// Id of the rule whose listener is running
    pub fn rule_id(&self) -> Option<&str> {
        self.rules.get(self.active).map(|(rule_id, _)| rule_id.as_str())
    }

    /// Report a problem spanning `node`
    pub fn report(&mut self, node: Node<'_>, message: impl Into<String>) {
        let (start, end) = node.range().unwrap_or_default();
        self.report_span(start, end, message);
    }

    /// Report a problem spanning the byte range `start..end`
    pub fn report_span(&mut self, start: usize, end: usize, message: impl Into<String>) {
        let Some((rule_id, severity)) = self.rules.get(self.active) else {
            return;
        };
        let (line, column) = self.source.line_column(start);
        self.diagnostics.push(Diagnostic::new(
            rule_id.clone(),
            *severity,
            message,
            Location::new(line, column, start, end.saturating_sub(start)),
        ));
    }
}

/// Runs lint passes for a configuration
pub trait LintExecutor<S> {
    fn verify(&self, source: &S, config: &LintConfig) -> Result<Vec<Diagnostic>>;
}

impl<S, F> LintExecutor<S> for F
where
    F: Fn(&S, &LintConfig) -> Result<Vec<Diagnostic>>,
{
    fn verify(&self, source: &S, config: &LintConfig) -> Result<Vec<Diagnostic>> {
        self(source, config)
    }
}

/// Mark rule `index` as the reporter before running its listener
fn dispatch_as<'a>(index: usize, mut listener: RuleListener<'a>) -> RuleListener<'a> {
    Box::new(move |node: Node<'a>, cx: &mut LintContext<'a>| {
        cx.active = index;
        listener(node, cx);
    })
}

/// The linter over a [`RuleStore`]
#[derive(Debug, Default)]
pub struct Linter {
    rules: RuleStore,
}

impl Linter {
    pub fn new(rules: RuleStore) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RuleStore {
        &self.rules
    }

    /// Lint one file with the rules enabled in `config`
    ///
    /// Diagnostics come back ordered by position, then by rule id.
    pub fn verify(&self, source: &SourceCode, config: &LintConfig) -> Result<Vec<Diagnostic>> {
        let mut active = Vec::new();
        let mut emitter = Emitter::new();

        for (rule_id, rule_config) in &config.rules {
            let rule = self
                .rules
                .get(rule_id)
                .ok_or_else(|| LintelError::rule_error(rule_id, "definition not found"))?;
            let severity = RuleSeverity::from_config(rule_config)?;
            if severity == RuleSeverity::Off {
                continue;
            }

            let index = active.len();
            active.push((rule_id.clone(), severity));
            for (event, listener) in rule.create(rule_options(rule_config))? {
                emitter.on(event, dispatch_as(index, listener));
            }
        }
        debug!("Running {} rules with {} listeners", active.len(), emitter.len());

        let mut cx = LintContext::new(source, &config.settings, active);
        let mut generator = SelectorEventGenerator::new(NodeEventGenerator::new(emitter));
        Traverser::traverse(source.ast(), &mut generator, &mut cx)?;

        let mut diagnostics = cx.diagnostics;
        diagnostics.sort_by(|a, b| {
            a.location
                .offset
                .cmp(&b.location.offset)
                .then_with(|| a.rule_id.cmp(&b.rule_id))
        });
        Ok(diagnostics)
    }
}

impl LintExecutor<SourceCode> for Linter {
    fn verify(&self, source: &SourceCode, config: &LintConfig) -> Result<Vec<Diagnostic>> {
        Linter::verify(self, source, config)
    }
}
