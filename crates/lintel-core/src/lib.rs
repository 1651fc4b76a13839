//! Lintel Core
//!
//! Core engine of the lintel JavaScript linter. Rules subscribe to AST events
//! by node type or by CSS-like selector; the linter traverses an ESTree AST
//! once per pass and dispatches the matching events. The autoconfig registry
//! derives a rules configuration from a corpus of existing sources.

pub mod ast;
pub mod autoconfig;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod events;
pub mod linter;
pub mod result;
pub mod selector;
pub mod source_code;
pub mod traverser;

// Re-export commonly used types
pub use ast::{Ast, Node, NodeId, PROGRAM_TYPE};
pub use autoconfig::{
    AutoconfigSummary, MAX_CONFIG_COMBINATIONS, Registry, RegistryItem, RuleCandidates,
    configure_rules, extend_from_recommended, generate_configs_from_schema,
};
pub use config::{LintConfig, RuleSeverity, RulesConfig};
pub use diagnostics::{Diagnostic, Location};
pub use error::{ErrorKind, LintelError};
pub use events::{
    Emitter, EventGenerator, Listener, NodeEventGenerator, SelectorEventGenerator,
};
pub use linter::{LintContext, LintExecutor, Linter, Rule, RuleListener, RuleMeta, RuleStore};
pub use result::{Result, ResultExt};
pub use selector::{CompiledSelector, NodePattern};
pub use source_code::SourceCode;
pub use traverser::Traverser;

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lintel=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
