//! Built-in rules
//!
//! - **Style** (`semi`, `semi-spacing`, `quotes`): statement terminators and string quoting
//! - **Correctness** (`no-debugger`, `no-empty-function`): leftovers that should not ship

mod no_debugger;
mod no_empty_function;
mod quotes;
mod semi;
mod semi_spacing;

pub use no_debugger::{NO_DEBUGGER, NoDebugger};
pub use no_empty_function::{NO_EMPTY_FUNCTION, NoEmptyFunction};
pub use quotes::{QUOTES, Quotes};
pub use semi::{SEMI, Semi};
pub use semi_spacing::{SEMI_SPACING, SemiSpacing};

use lintel_core::{Node, RuleSeverity, RuleStore, RulesConfig, SourceCode};
use serde_json::Value;
use tracing::debug;

/// Every built-in rule, in catalogue order
pub fn builtin_rules() -> RuleStore {
    let mut store = RuleStore::new();
    store.register(Semi);
    store.register(SemiSpacing);
    store.register(Quotes);
    store.register(NoDebugger);
    store.register(NoEmptyFunction);
    debug!("Registered {} built-in rules", store.len());
    store
}

/// The recommended configuration: every rule marked recommended, at error level
pub fn recommended_rules() -> RulesConfig {
    let store = builtin_rules();
    store
        .ids()
        .filter_map(|rule_id| {
            let rule = store.get(rule_id)?;
            rule.meta().recommended.then(|| {
                (
                    rule_id.to_string(),
                    Value::from(RuleSeverity::Error.as_str()),
                )
            })
        })
        .collect()
}

/// Statement types terminated by a semicolon
pub(crate) const TERMINATED_STATEMENTS: &[&str] = &[
    "VariableDeclaration",
    "ExpressionStatement",
    "ReturnStatement",
    "ThrowStatement",
    "BreakStatement",
    "ContinueStatement",
    "DebuggerStatement",
    "DoWhileStatement",
    "ImportDeclaration",
    "ExportNamedDeclaration",
    "ExportDefaultDeclaration",
    "ExportAllDeclaration",
];

/// Whether `node` is a statement that should end with a semicolon
pub(crate) fn is_terminated_statement(node: Node<'_>) -> bool {
    match node.kind() {
        "VariableDeclaration" => !is_for_head(node),
        "ExportNamedDeclaration" => node.field("declaration").is_none_or(Value::is_null),
        "ExportDefaultDeclaration" => !matches!(
            node.field("declaration")
                .and_then(|declaration| declaration.get("type"))
                .and_then(Value::as_str),
            Some("FunctionDeclaration" | "ClassDeclaration")
        ),
        kind => TERMINATED_STATEMENTS.contains(&kind),
    }
}

/// `for (var i = 0; ...)`: the declaration is part of the loop head
fn is_for_head(node: Node<'_>) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };
    matches!(
        parent.kind(),
        "ForStatement" | "ForInStatement" | "ForOfStatement"
    ) && !parent
        .field("body")
        .is_some_and(|body| std::ptr::eq(body, node.value()))
}

/// Byte offset of the semicolon closing `node`, if it has one
pub(crate) fn trailing_semicolon(node: Node<'_>, source: &SourceCode) -> Option<usize> {
    let (_, end) = node.range()?;
    let offset = end.checked_sub(1)?;
    (source.slice(offset, end)? == ";").then_some(offset)
}
