//! Built-in rules run through the linter on hand-written ESTree documents

use lintel_core::{Ast, Diagnostic, LintConfig, Linter, RuleSeverity, SourceCode};
use lintel_rules::{builtin_rules, recommended_rules};
use serde_json::{Value, json};

fn lint(text: &str, ast: Value, rules: Value) -> Vec<Diagnostic> {
    let source = SourceCode::new(text, Ast::from_json(ast).unwrap());
    let config = LintConfig::new(serde_json::from_value(rules).unwrap());
    Linter::new(builtin_rules()).verify(&source, &config).unwrap()
}

fn summarize(diagnostics: &[Diagnostic]) -> Vec<(&str, usize, &str)> {
    diagnostics
        .iter()
        .map(|d| (d.rule_id.as_str(), d.location.offset, d.message.as_str()))
        .collect()
}

/// `a()\nb();`
fn two_calls() -> Value {
    json!({
        "type": "Program",
        "range": [0, 8],
        "body": [
            {
                "type": "ExpressionStatement",
                "range": [0, 3],
                "expression": {
                    "type": "CallExpression",
                    "range": [0, 3],
                    "callee": { "type": "Identifier", "name": "a", "range": [0, 1] },
                    "arguments": []
                }
            },
            {
                "type": "ExpressionStatement",
                "range": [4, 8],
                "expression": {
                    "type": "CallExpression",
                    "range": [4, 7],
                    "callee": { "type": "Identifier", "name": "b", "range": [4, 5] },
                    "arguments": []
                }
            }
        ]
    })
}

/// `a() ;b();`
fn spaced_calls() -> Value {
    json!({
        "type": "Program",
        "range": [0, 9],
        "body": [
            {
                "type": "ExpressionStatement",
                "range": [0, 5],
                "expression": {
                    "type": "CallExpression",
                    "range": [0, 3],
                    "callee": { "type": "Identifier", "name": "a", "range": [0, 1] },
                    "arguments": []
                }
            },
            {
                "type": "ExpressionStatement",
                "range": [5, 9],
                "expression": {
                    "type": "CallExpression",
                    "range": [5, 8],
                    "callee": { "type": "Identifier", "name": "b", "range": [5, 6] },
                    "arguments": []
                }
            }
        ]
    })
}

/// `'x';\n`y`;`
fn mixed_strings() -> Value {
    json!({
        "type": "Program",
        "range": [0, 9],
        "body": [
            {
                "type": "ExpressionStatement",
                "range": [0, 4],
                "expression": { "type": "Literal", "value": "x", "raw": "'x'", "range": [0, 3] }
            },
            {
                "type": "ExpressionStatement",
                "range": [5, 9],
                "expression": {
                    "type": "TemplateLiteral",
                    "range": [5, 8],
                    "expressions": [],
                    "quasis": [{
                        "type": "TemplateElement",
                        "range": [6, 7],
                        "value": { "raw": "y", "cooked": "y" },
                        "tail": true
                    }]
                }
            }
        ]
    })
}

/// `function f() {}` with the body replaced by `block`
fn function_declaration(block_end: usize, program_end: usize) -> Value {
    json!({
        "type": "Program",
        "range": [0, program_end],
        "body": [{
            "type": "FunctionDeclaration",
            "range": [0, block_end],
            "id": { "type": "Identifier", "name": "f", "range": [9, 10] },
            "params": [],
            "body": { "type": "BlockStatement", "range": [13, block_end], "body": [] }
        }]
    })
}

/// `({ m() {} });`
fn object_method() -> Value {
    json!({
        "type": "Program",
        "range": [0, 13],
        "body": [{
            "type": "ExpressionStatement",
            "range": [0, 13],
            "expression": {
                "type": "ObjectExpression",
                "range": [1, 11],
                "properties": [{
                    "type": "Property",
                    "range": [3, 9],
                    "method": true,
                    "shorthand": false,
                    "computed": false,
                    "kind": "init",
                    "key": { "type": "Identifier", "name": "m", "range": [3, 4] },
                    "value": {
                        "type": "FunctionExpression",
                        "range": [4, 9],
                        "id": null,
                        "params": [],
                        "body": { "type": "BlockStatement", "range": [7, 9], "body": [] }
                    }
                }]
            }
        }]
    })
}

#[test]
fn test_semi_always() {
    let diagnostics = lint("a()\nb();", two_calls(), json!({ "semi": "error" }));
    insta::assert_debug_snapshot!(summarize(&diagnostics), @r#"
    [
        (
            "semi",
            3,
            "Missing semicolon.",
        ),
    ]
    "#);
    assert_eq!(diagnostics[0].location.line, 1);
    assert_eq!(diagnostics[0].location.column, 4);
    assert_eq!(diagnostics[0].severity, RuleSeverity::Error);
}

#[test]
fn test_semi_never() {
    let diagnostics = lint("a()\nb();", two_calls(), json!({ "semi": ["warn", "never"] }));
    assert_eq!(summarize(&diagnostics), vec![("semi", 7, "Extra semicolon.")]);
    assert_eq!(diagnostics[0].location.line, 2);
    assert_eq!(diagnostics[0].severity, RuleSeverity::Warn);
}

#[test]
fn test_semi_skips_for_loop_head() {
    let text = "for (var i = 0;;) {}";
    let ast = json!({
        "type": "Program",
        "range": [0, 20],
        "body": [{
            "type": "ForStatement",
            "range": [0, 20],
            "init": {
                "type": "VariableDeclaration",
                "kind": "var",
                "range": [5, 14],
                "declarations": [{
                    "type": "VariableDeclarator",
                    "range": [9, 14],
                    "id": { "type": "Identifier", "name": "i", "range": [9, 10] },
                    "init": { "type": "Literal", "value": 0, "raw": "0", "range": [13, 14] }
                }]
            },
            "test": null,
            "update": null,
            "body": { "type": "BlockStatement", "range": [18, 20], "body": [] }
        }]
    });
    assert!(lint(text, ast, json!({ "semi": 2 })).is_empty());
}

#[test]
fn test_semi_spacing() {
    let diagnostics = lint("a() ;b();", spaced_calls(), json!({ "semi-spacing": 2 }));
    assert_eq!(
        summarize(&diagnostics),
        vec![
            ("semi-spacing", 3, "Unexpected whitespace before semicolon."),
            ("semi-spacing", 4, "Missing whitespace after semicolon."),
        ]
    );

    let diagnostics = lint(
        "a() ;b();",
        spaced_calls(),
        json!({ "semi-spacing": [2, { "before": true, "after": false }] }),
    );
    assert_eq!(
        summarize(&diagnostics),
        vec![("semi-spacing", 8, "Missing whitespace before semicolon.")]
    );
}

#[test]
fn test_quotes() {
    let text = "'x';\n`y`;";
    let diagnostics = lint(text, mixed_strings(), json!({ "quotes": 2 }));
    assert_eq!(
        summarize(&diagnostics),
        vec![
            ("quotes", 0, "Strings must use doublequote."),
            ("quotes", 5, "Strings must use doublequote."),
        ]
    );

    let diagnostics = lint(text, mixed_strings(), json!({ "quotes": [2, "single"] }));
    assert_eq!(
        summarize(&diagnostics),
        vec![("quotes", 5, "Strings must use singlequote.")]
    );

    let diagnostics = lint(text, mixed_strings(), json!({ "quotes": [2, "backtick"] }));
    assert_eq!(
        summarize(&diagnostics),
        vec![("quotes", 0, "Strings must use backtick.")]
    );
}

#[test]
fn test_quotes_avoid_escape() {
    let text = "'a\"b';";
    let ast = json!({
        "type": "Program",
        "range": [0, 6],
        "body": [{
            "type": "ExpressionStatement",
            "range": [0, 6],
            "expression": { "type": "Literal", "value": "a\"b", "raw": "'a\"b'", "range": [0, 5] }
        }]
    });
    assert_eq!(lint(text, ast.clone(), json!({ "quotes": [2, "double"] })).len(), 1);
    assert!(lint(text, ast, json!({ "quotes": [2, "double", "avoid-escape"] })).is_empty());
}

#[test]
fn test_no_debugger() {
    let ast = json!({
        "type": "Program",
        "range": [0, 9],
        "body": [{ "type": "DebuggerStatement", "range": [0, 9] }]
    });
    let diagnostics = lint("debugger;", ast, json!({ "no-debugger": "error" }));
    assert_eq!(
        summarize(&diagnostics),
        vec![("no-debugger", 0, "Unexpected 'debugger' statement.")]
    );
    assert_eq!(diagnostics[0].location.length, 9);
}

#[test]
fn test_no_empty_function() {
    let diagnostics = lint(
        "function f() {}",
        function_declaration(15, 15),
        json!({ "no-empty-function": 2 }),
    );
    assert_eq!(
        summarize(&diagnostics),
        vec![("no-empty-function", 13, "Unexpected empty function 'f'.")]
    );

    let diagnostics = lint(
        "function f() {}",
        function_declaration(15, 15),
        json!({ "no-empty-function": [2, { "allow": ["functions"] }] }),
    );
    assert!(diagnostics.is_empty());
}

#[test]
fn test_no_empty_function_allows_comments() {
    let text = "function f() { /* later */ }";
    let diagnostics = lint(
        text,
        function_declaration(text.len(), text.len()),
        json!({ "no-empty-function": 2 }),
    );
    assert!(diagnostics.is_empty());
}

#[test]
fn test_no_empty_function_methods() {
    let text = "({ m() {} });";
    let diagnostics = lint(text, object_method(), json!({ "no-empty-function": 2 }));
    assert_eq!(
        summarize(&diagnostics),
        vec![("no-empty-function", 7, "Unexpected empty method.")]
    );

    let diagnostics = lint(
        text,
        object_method(),
        json!({ "no-empty-function": [2, { "allow": ["methods"] }] }),
    );
    assert!(diagnostics.is_empty());
}

#[test]
fn test_off_rules_do_not_run() {
    let diagnostics = lint(
        "a()\nb();",
        two_calls(),
        json!({ "semi": ["off", "never"], "semi-spacing": 0 }),
    );
    assert!(diagnostics.is_empty());
}

#[test]
fn test_catalogue() {
    let store = builtin_rules();
    assert_eq!(
        store.ids().collect::<Vec<_>>(),
        vec!["semi", "semi-spacing", "quotes", "no-debugger", "no-empty-function"]
    );

    let recommended = recommended_rules();
    assert_eq!(recommended.len(), 1);
    assert_eq!(recommended["no-debugger"], json!("error"));
}
