//! Disallow `debugger` statements

use lintel_core::{LintContext, Node, Result, Rule, RuleListener, RuleMeta};
use serde_json::{Value, json};

pub const NO_DEBUGGER: &str = "no-debugger";

#[derive(Debug, Clone, Copy, Default)]
pub struct NoDebugger;

impl Rule for NoDebugger {
    fn id(&self) -> &'static str {
        NO_DEBUGGER
    }

    fn meta(&self) -> RuleMeta {
        RuleMeta {
            description: "Disallow the use of `debugger`".to_string(),
            schema: json!([]),
            deprecated: false,
            recommended: true,
        }
    }

    fn create<'a>(&self, _options: &[Value]) -> Result<Vec<(String, RuleListener<'a>)>> {
        let listener: RuleListener<'a> = Box::new(|node: Node<'a>, cx: &mut LintContext<'a>| {
            cx.report(node, "Unexpected 'debugger' statement.")
        });
        Ok(vec![("DebuggerStatement".to_string(), listener)])
    }
}
