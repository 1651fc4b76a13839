//! Rule autoconfiguration
//!
//! Autoconfig probes a corpus of existing sources to find rule options that
//! the code already follows:
//!
//! 1. Every rule's option schema is expanded into candidate configurations
//!    ([`generate_configs_from_schema`]).
//! 2. A [`Registry`] groups the candidates into rule-sets and lints every
//!    source once per rule-set, counting the errors of each candidate.
//! 3. Failing candidates are stripped and the surviving ones are merged into
//!    a configuration ([`configure_rules`]).

mod config_rule;
mod initializer;
mod registry;

pub use config_rule::generate_configs_from_schema;
pub use initializer::{
    AutoconfigSummary, RECOMMENDED_CONFIG, configure_rules, extend_from_recommended,
};
pub use registry::{MAX_CONFIG_COMBINATIONS, Registry, RegistryItem, RuleCandidates};
