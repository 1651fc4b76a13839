//! Enforce spacing before and after semicolons

use lintel_core::{LintContext, LintelError, Node, Result, Rule, RuleListener, RuleMeta};
use serde::Deserialize;
use serde_json::{Value, json};

use super::{TERMINATED_STATEMENTS, is_terminated_statement, trailing_semicolon};

pub const SEMI_SPACING: &str = "semi-spacing";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Spacing {
    before: bool,
    after: bool,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            before: false,
            after: true,
        }
    }
}

impl Spacing {
    fn from_options(options: &[Value]) -> Result<Self> {
        match options.first() {
            None => Ok(Self::default()),
            Some(option) => Self::deserialize(option)
                .map_err(|err| LintelError::rule_error(SEMI_SPACING, err.to_string())),
        }
    }
}

fn is_blank(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SemiSpacing;

impl Rule for SemiSpacing {
    fn id(&self) -> &'static str {
        SEMI_SPACING
    }

    fn meta(&self) -> RuleMeta {
        RuleMeta {
            description: "Enforce consistent spacing before and after semicolons".to_string(),
            schema: json!([{
                "type": "object",
                "properties": {
                    "before": { "type": "boolean" },
                    "after": { "type": "boolean" }
                },
                "additionalProperties": false
            }]),
            deprecated: false,
            recommended: false,
        }
    }

    fn create<'a>(&self, options: &[Value]) -> Result<Vec<(String, RuleListener<'a>)>> {
        let spacing = Spacing::from_options(options)?;
        Ok(TERMINATED_STATEMENTS
            .iter()
            .map(|kind| {
                let listener: RuleListener<'a> =
                    Box::new(move |node: Node<'a>, cx: &mut LintContext<'a>| {
                        check(spacing, node, cx)
                    });
                (kind.to_string(), listener)
            })
            .collect())
    }
}

fn check(spacing: Spacing, node: Node<'_>, cx: &mut LintContext<'_>) {
    if !is_terminated_statement(node) {
        return;
    }
    let Some(offset) = trailing_semicolon(node, cx.source()) else {
        return;
    };
    let text = cx.source().text();

    // only spacing on the semicolon's own line counts
    let line_before = text[..offset].rsplit('\n').next().unwrap_or_default();
    let line_after = text[offset + 1..].split('\n').next().unwrap_or_default();

    if !line_before.trim().is_empty() {
        let has_space = line_before.ends_with(is_blank);
        if has_space && !spacing.before {
            let start = offset - (line_before.len() - line_before.trim_end_matches(is_blank).len());
            cx.report_span(start, offset, "Unexpected whitespace before semicolon.");
        } else if !has_space && spacing.before {
            cx.report_span(offset, offset + 1, "Missing whitespace before semicolon.");
        }
    }

    let next = line_after.trim_start_matches(is_blank);
    let closes_or_ends = next.is_empty() || next.starts_with(['}', ')']);
    if !closes_or_ends {
        let has_space = line_after.starts_with(is_blank);
        if has_space && !spacing.after {
            let end = offset + 1 + (line_after.len() - next.len());
            cx.report_span(offset + 1, end, "Unexpected whitespace after semicolon.");
        } else if !has_space && spacing.after {
            cx.report_span(offset, offset + 1, "Missing whitespace after semicolon.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options() {
        assert_eq!(Spacing::from_options(&[]).unwrap(), Spacing::default());
        assert_eq!(
            Spacing::from_options(&[json!({ "before": true })]).unwrap(),
            Spacing {
                before: true,
                after: true
            }
        );
        assert!(Spacing::from_options(&[json!({ "after": "yes" })]).is_err());
        assert!(Spacing::from_options(&[json!("always")]).is_err());
    }
}
