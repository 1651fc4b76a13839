//! Enforce a consistent quote style for strings

use lintel_core::{LintContext, LintelError, Node, Result, Rule, RuleListener, RuleMeta};
use serde_json::{Value, json};

pub const QUOTES: &str = "quotes";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quote {
    Single,
    Double,
    Backtick,
}

impl Quote {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "single" => Some(Quote::Single),
            "double" => Some(Quote::Double),
            "backtick" => Some(Quote::Backtick),
            _ => None,
        }
    }

    fn char(self) -> char {
        match self {
            Quote::Single => '\'',
            Quote::Double => '"',
            Quote::Backtick => '`',
        }
    }

    fn description(self) -> &'static str {
        match self {
            Quote::Single => "singlequote",
            Quote::Double => "doublequote",
            Quote::Backtick => "backtick",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Options {
    quote: Quote,
    avoid_escape: bool,
}

impl Options {
    fn from_options(options: &[Value]) -> Result<Self> {
        let quote = match options.first() {
            None => Quote::Double,
            Some(option) => option.as_str().and_then(Quote::parse).ok_or_else(|| {
                LintelError::rule_error(
                    QUOTES,
                    format!("expected \"single\", \"double\" or \"backtick\", found {option}"),
                )
            })?,
        };
        let avoid_escape = match options.get(1) {
            None => false,
            Some(Value::String(flag)) if flag == "avoid-escape" => true,
            Some(Value::Object(object)) => object
                .get("avoidEscape")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            Some(other) => {
                return Err(LintelError::rule_error(
                    QUOTES,
                    format!("unsupported option {other}"),
                ));
            }
        };
        Ok(Self {
            quote,
            avoid_escape,
        })
    }
}

/// String literals that cannot be written as template literals
fn template_not_allowed(node: Node<'_>) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };
    let is_field = |name: &str| {
        parent
            .field(name)
            .is_some_and(|value| std::ptr::eq(value, node.value()))
    };
    match parent.kind() {
        "ImportDeclaration" | "ExportNamedDeclaration" | "ExportAllDeclaration" => {
            is_field("source")
        }
        "Property" | "MethodDefinition" | "PropertyDefinition" => {
            is_field("key") && !parent.field("computed").and_then(Value::as_bool).unwrap_or(false)
        }
        "ExpressionStatement" => parent.field("directive").is_some(),
        _ => false,
    }
}

fn check_literal(options: Options, node: Node<'_>, cx: &mut LintContext<'_>) {
    let Some(value) = node.field("value").and_then(Value::as_str) else {
        return;
    };
    let raw = match node.field("raw").and_then(Value::as_str) {
        Some(raw) => raw,
        None => match node.range().and_then(|(start, end)| cx.source().slice(start, end)) {
            Some(raw) => raw,
            None => return,
        },
    };

    let expected = options.quote.char();
    if raw.starts_with(expected) {
        return;
    }
    if options.avoid_escape && value.contains(expected) {
        return;
    }
    if options.quote == Quote::Backtick && template_not_allowed(node) {
        return;
    }
    cx.report(
        node,
        format!("Strings must use {}.", options.quote.description()),
    );
}

fn check_template(options: Options, node: Node<'_>, cx: &mut LintContext<'_>) {
    if options.quote == Quote::Backtick {
        return;
    }
    let has_expressions = node
        .field("expressions")
        .and_then(Value::as_array)
        .is_some_and(|expressions| !expressions.is_empty());
    let is_tagged = node
        .parent()
        .is_some_and(|parent| parent.kind() == "TaggedTemplateExpression");
    let spans_lines = node
        .range()
        .and_then(|(start, end)| cx.source().slice(start, end))
        .is_some_and(|text| text.contains('\n'));
    if has_expressions || is_tagged || spans_lines {
        return;
    }
    cx.report(
        node,
        format!("Strings must use {}.", options.quote.description()),
    );
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Quotes;

impl Rule for Quotes {
    fn id(&self) -> &'static str {
        QUOTES
    }

    fn meta(&self) -> RuleMeta {
        RuleMeta {
            description: "Enforce the consistent use of either backticks, double, or single quotes"
                .to_string(),
            schema: json!([
                { "enum": ["single", "double", "backtick"] },
                { "enum": ["avoid-escape"] }
            ]),
            deprecated: false,
            recommended: false,
        }
    }

    fn create<'a>(&self, options: &[Value]) -> Result<Vec<(String, RuleListener<'a>)>> {
        let options = Options::from_options(options)?;
        let literal: RuleListener<'a> = Box::new(move |node: Node<'a>, cx: &mut LintContext<'a>| {
            check_literal(options, node, cx)
        });
        let template: RuleListener<'a> =
            Box::new(move |node: Node<'a>, cx: &mut LintContext<'a>| {
                check_template(options, node, cx)
            });
        Ok(vec![
            ("Literal".to_string(), literal),
            ("TemplateLiteral".to_string(), template),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options() {
        assert_eq!(
            Options::from_options(&[]).unwrap(),
            Options {
                quote: Quote::Double,
                avoid_escape: false
            }
        );
        assert_eq!(
            Options::from_options(&[json!("single"), json!("avoid-escape")]).unwrap(),
            Options {
                quote: Quote::Single,
                avoid_escape: true
            }
        );
        assert!(
            Options::from_options(&[json!("backtick"), json!({ "avoidEscape": true })])
                .unwrap()
                .avoid_escape
        );
        assert!(Options::from_options(&[json!("curly")]).is_err());
    }
}
