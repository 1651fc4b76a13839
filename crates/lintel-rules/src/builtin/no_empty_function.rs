//! Disallow empty function bodies
//!
//! A body holding only a comment is not empty: the comment documents why the
//! function does nothing.

use lintel_core::{LintContext, LintelError, Node, Result, Rule, RuleListener, RuleMeta};
use serde::Deserialize;
use serde_json::{Value, json};

pub const NO_EMPTY_FUNCTION: &str = "no-empty-function";

/// Empty blocks that are the direct body of a function
const EMPTY_FUNCTION_BODY: &str = "FunctionDeclaration > BlockStatement[body.length=\"0\"], FunctionExpression > BlockStatement[body.length=\"0\"]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Allowed {
    Functions,
    Methods,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Options {
    allow: Vec<Allowed>,
}

fn allowed_kinds(options: &[Value]) -> Result<Vec<Allowed>> {
    match options.first() {
        None => Ok(Vec::new()),
        Some(option) => Options::deserialize(option)
            .map(|options| options.allow)
            .map_err(|err| LintelError::rule_error(NO_EMPTY_FUNCTION, err.to_string())),
    }
}

fn is_method(function: Node<'_>) -> bool {
    function.parent().is_some_and(|parent| match parent.kind() {
        "MethodDefinition" => true,
        "Property" => parent.field("method").and_then(Value::as_bool) == Some(true),
        _ => false,
    })
}

fn function_name(function: Node<'_>) -> Option<&str> {
    function
        .field("id")
        .and_then(|id| id.get("name"))
        .and_then(Value::as_str)
}

fn check(allowed: &[Allowed], body: Node<'_>, cx: &mut LintContext<'_>) {
    let Some(function) = body.parent() else {
        return;
    };
    let method = is_method(function);
    let kind = if method {
        Allowed::Methods
    } else {
        Allowed::Functions
    };
    if allowed.contains(&kind) {
        return;
    }

    let has_comment = body
        .range()
        .and_then(|(start, end)| cx.source().slice(start + 1, end.saturating_sub(1)))
        .is_some_and(|inner| !inner.trim().is_empty());
    if has_comment {
        return;
    }

    let label = if method { "method" } else { "function" };
    let message = match function_name(function) {
        Some(name) => format!("Unexpected empty {label} '{name}'."),
        None => format!("Unexpected empty {label}."),
    };
    cx.report(body, message);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoEmptyFunction;

impl Rule for NoEmptyFunction {
    fn id(&self) -> &'static str {
        NO_EMPTY_FUNCTION
    }

    fn meta(&self) -> RuleMeta {
        RuleMeta {
            description: "Disallow empty functions".to_string(),
            schema: json!([{
                "type": "object",
                "properties": {
                    "allow": {
                        "type": "array",
                        "items": { "enum": ["functions", "methods"] },
                        "uniqueItems": true
                    }
                },
                "additionalProperties": false
            }]),
            deprecated: false,
            recommended: false,
        }
    }

    fn create<'a>(&self, options: &[Value]) -> Result<Vec<(String, RuleListener<'a>)>> {
        let allowed = allowed_kinds(options)?;
        let listener: RuleListener<'a> = Box::new(move |node: Node<'a>, cx: &mut LintContext<'a>| {
            check(&allowed, node, cx)
        });
        Ok(vec![(EMPTY_FUNCTION_BODY.to_string(), listener)])
    }
}
