//! Require or disallow semicolons at the end of statements

use lintel_core::{LintContext, LintelError, Node, Result, Rule, RuleListener, RuleMeta};
use serde_json::{Value, json};

use super::{TERMINATED_STATEMENTS, is_terminated_statement, trailing_semicolon};

pub const SEMI: &str = "semi";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Always,
    Never,
}

impl Mode {
    fn from_options(options: &[Value]) -> Result<Self> {
        match options.first().map(|option| (option, option.as_str())) {
            None => Ok(Mode::Always),
            Some((_, Some("always"))) => Ok(Mode::Always),
            Some((_, Some("never"))) => Ok(Mode::Never),
            Some((other, _)) => Err(LintelError::rule_error(
                SEMI,
                format!("expected \"always\" or \"never\", found {other}"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Semi;

impl Rule for Semi {
    fn id(&self) -> &'static str {
        SEMI
    }

    fn meta(&self) -> RuleMeta {
        RuleMeta {
            description: "Require or disallow semicolons instead of ASI".to_string(),
            schema: json!([{ "enum": ["always", "never"] }]),
            deprecated: false,
            recommended: false,
        }
    }

    fn create<'a>(&self, options: &[Value]) -> Result<Vec<(String, RuleListener<'a>)>> {
        let mode = Mode::from_options(options)?;
        Ok(TERMINATED_STATEMENTS
            .iter()
            .map(|kind| {
                let listener: RuleListener<'a> =
                    Box::new(move |node: Node<'a>, cx: &mut LintContext<'a>| {
                        check(mode, node, cx)
                    });
                (kind.to_string(), listener)
            })
            .collect())
    }
}

fn check(mode: Mode, node: Node<'_>, cx: &mut LintContext<'_>) {
    if !is_terminated_statement(node) {
        return;
    }
    let semicolon = trailing_semicolon(node, cx.source());
    match (mode, semicolon) {
        (Mode::Always, None) => {
            let end = node.range().map_or(0, |(_, end)| end);
            cx.report_span(end, end, "Missing semicolon.");
        }
        (Mode::Never, Some(offset)) => cx.report_span(offset, offset + 1, "Extra semicolon."),
        _ => {}
    }
}
