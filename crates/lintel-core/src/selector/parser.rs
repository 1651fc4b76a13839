//! Selector parser
//!
//! Recursive descent over the tokens produced by [`tokenize`]. Parsing is
//! strict: a selector that runs out of tokens, has an unbalanced quote or an
//! unexpected punctuation token is rejected with the selector text and the
//! token position where parsing stopped, rather than compiled into something
//! that silently never fires.

use super::tokenizer::{DESCENDANT, tokenize};
use super::{AttributeConstraint, AttributePath, CompiledSelector, NodePattern};
use crate::{LintelError, Result};

fn is_punctuation(token: &str) -> bool {
    matches!(token, "[" | "]" | "=" | "." | ">" | "," | DESCENDANT)
}

/// Parser state over one selector string
pub struct SelectorParser<'s> {
    source: &'s str,
    tokens: Vec<String>,
    pos: usize,
}

impl<'s> SelectorParser<'s> {
    pub fn new(source: &'s str) -> Self {
        Self {
            source,
            tokens: tokenize(source.trim()),
            pos: 0,
        }
    }

    /// Parse every comma-separated alternative of the selector
    pub fn parse(&mut self) -> Result<Vec<CompiledSelector>> {
        if self.source.matches('"').count() % 2 != 0 {
            return Err(self.error("unbalanced double quotes"));
        }
        if self.tokens.is_empty() {
            return Err(self.error("empty selector"));
        }

        let mut selectors = Vec::new();
        loop {
            selectors.push(self.parse_selector()?);
            if self.at_end() {
                break;
            }
            self.expect(",")?;
        }

        Ok(selectors)
    }

    fn parse_selector(&mut self) -> Result<CompiledSelector> {
        let mut patterns = vec![self.parse_node()?];

        while let Some(token) = self.peek() {
            let direct_child = match token {
                "," => break,
                ">" => true,
                DESCENDANT => false,
                other => return Err(self.unexpected(other)),
            };
            self.pos += 1;

            let mut node = self.parse_node()?;
            if direct_child {
                node.direct_child = true;
                if let Some(parent) = patterns.last_mut() {
                    parent.has_direct_child = true;
                }
            }
            patterns.push(node);
        }

        Ok(CompiledSelector {
            source: self.source.to_string(),
            patterns,
        })
    }

    fn parse_node(&mut self) -> Result<NodePattern> {
        let mut pattern = NodePattern::default();

        match self.peek() {
            None => return Err(self.error("unexpected end of input, expected a node")),
            Some("[") => {}
            Some(token) if is_punctuation(token) => return Err(self.unexpected(token)),
            Some(token) => {
                pattern.node_type = Some(token.to_string());
                self.pos += 1;
            }
        }

        pattern.attributes = self.parse_attributes()?;
        Ok(pattern)
    }

    fn parse_attributes(&mut self) -> Result<Vec<AttributeConstraint>> {
        let mut attributes = Vec::new();
        while self.peek() == Some("[") {
            self.pos += 1;
            attributes.push(self.parse_attribute()?);
            self.expect("]")?;
        }
        Ok(attributes)
    }

    fn parse_attribute(&mut self) -> Result<AttributeConstraint> {
        let mut segments = vec![self.expect_word("attribute name")?];
        while self.peek() == Some(".") {
            self.pos += 1;
            segments.push(self.expect_word("attribute name")?);
        }
        self.expect("=")?;
        let value = self.expect_word("attribute value")?;

        Ok(AttributeConstraint {
            path: AttributePath::new(segments),
            value,
        })
    }

    fn peek(&self) -> Option<&str> {
        self.tokens.get(self.pos).map(String::as_str)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn expect(&mut self, expected: &str) -> Result<()> {
        match self.peek() {
            Some(token) if token == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(token) => Err(self.error(format!("expected '{expected}', found '{token}'"))),
            None => Err(self.error(format!("unexpected end of input, expected '{expected}'"))),
        }
    }

    fn expect_word(&mut self, what: &str) -> Result<String> {
        match self.peek() {
            Some(token) if !is_punctuation(token) => {
                let word = token.to_string();
                self.pos += 1;
                Ok(word)
            }
            Some(token) => Err(self.error(format!("expected {what}, found '{token}'"))),
            None => Err(self.error(format!("unexpected end of input, expected {what}"))),
        }
    }

    fn unexpected(&self, token: &str) -> LintelError {
        self.error(format!("unexpected token '{token}'"))
    }

    fn error(&self, message: impl Into<String>) -> LintelError {
        LintelError::selector_error(self.source, self.pos, message)
    }
}

/// Parse a selector string into its compiled alternatives
pub fn parse(selector: &str) -> Result<Vec<CompiledSelector>> {
    SelectorParser::new(selector).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(node_type: &str) -> NodePattern {
        NodePattern {
            node_type: Some(node_type.to_string()),
            ..NodePattern::default()
        }
    }

    fn attr(path: &[&str], value: &str) -> AttributeConstraint {
        AttributeConstraint {
            path: AttributePath::new(path),
            value: value.to_string(),
        }
    }

    fn with_attrs(mut pattern: NodePattern, attributes: Vec<AttributeConstraint>) -> NodePattern {
        pattern.attributes = attributes;
        pattern
    }

    fn single(selector: &str) -> Vec<NodePattern> {
        let mut compiled = parse(selector).unwrap();
        assert_eq!(compiled.len(), 1);
        let compiled = compiled.remove(0);
        assert_eq!(compiled.source, selector);
        compiled.patterns
    }

    #[test]
    fn test_two_nodes() {
        assert_eq!(
            single("FunctionDeclaration Identifier"),
            vec![node("FunctionDeclaration"), node("Identifier")]
        );
    }

    #[test]
    fn test_attributes() {
        assert_eq!(
            single("FunctionDeclaration[expression=\"false\"] Identifier[name=\"test\"]"),
            vec![
                with_attrs(
                    node("FunctionDeclaration"),
                    vec![attr(&["expression"], "false")]
                ),
                with_attrs(node("Identifier"), vec![attr(&["name"], "test")]),
            ]
        );
    }

    #[test]
    fn test_attributes_and_spaces() {
        let expected = vec![with_attrs(
            node("FunctionDeclaration"),
            vec![attr(&["expression"], "false")],
        )];
        assert_eq!(single("FunctionDeclaration[ expression=\"false\" ]"), expected);
        assert_eq!(single("FunctionDeclaration[expression = \"false\"]"), expected);
    }

    #[test]
    fn test_direct_child() {
        insta::assert_debug_snapshot!(parse("FunctionDeclaration>Identifier").unwrap(), @r#"
        [
            CompiledSelector {
                source: "FunctionDeclaration>Identifier",
                patterns: [
                    NodePattern {
                        node_type: Some(
                            "FunctionDeclaration",
                        ),
                        attributes: [],
                        direct_child: false,
                        has_direct_child: true,
                    },
                    NodePattern {
                        node_type: Some(
                            "Identifier",
                        ),
                        attributes: [],
                        direct_child: true,
                        has_direct_child: false,
                    },
                ],
            },
        ]
        "#);
    }

    #[test]
    fn test_direct_child_with_spaces() {
        let patterns = single("FunctionDeclaration > Identifier");
        assert!(patterns[0].has_direct_child);
        assert!(!patterns[0].direct_child);
        assert!(patterns[1].direct_child);
        assert!(!patterns[1].has_direct_child);
    }

    #[test]
    fn test_multiple_attributes() {
        assert_eq!(
            single("FunctionDeclaration[expression=\"false\"][generator=\"false\"]"),
            vec![with_attrs(
                node("FunctionDeclaration"),
                vec![attr(&["expression"], "false"), attr(&["generator"], "false")]
            )]
        );
    }

    #[test]
    fn test_attribute_only_descendant() {
        assert_eq!(
            single("FunctionDeclaration[expression=\"false\"] [generator=\"false\"]"),
            vec![
                with_attrs(
                    node("FunctionDeclaration"),
                    vec![attr(&["expression"], "false")]
                ),
                with_attrs(
                    NodePattern::default(),
                    vec![attr(&["generator"], "false")]
                ),
            ]
        );
    }

    #[test]
    fn test_just_attributes() {
        assert_eq!(
            single("[name=\"test\"]"),
            vec![with_attrs(
                NodePattern::default(),
                vec![attr(&["name"], "test")]
            )]
        );
    }

    #[test]
    fn test_nested_attributes() {
        assert_eq!(
            single("FunctionDeclaration[body.type=\"BlockStatement\"]"),
            vec![with_attrs(
                node("FunctionDeclaration"),
                vec![attr(&["body", "type"], "BlockStatement")]
            )]
        );
    }

    #[test]
    fn test_three_nodes() {
        assert_eq!(
            single("FunctionDeclaration BlockStatement ExpressionStatement"),
            vec![
                node("FunctionDeclaration"),
                node("BlockStatement"),
                node("ExpressionStatement"),
            ]
        );
    }

    #[test]
    fn test_complex_selector() {
        let patterns = single(
            "FunctionDeclaration[body.type=\"BlockStatement\"] ExpressionStatement>CallExpression[callee.object.name=\"test\"][callee.property.name=\"forEach\"]",
        );

        let mut statement = node("ExpressionStatement");
        statement.has_direct_child = true;
        let mut call = with_attrs(
            node("CallExpression"),
            vec![
                attr(&["callee", "object", "name"], "test"),
                attr(&["callee", "property", "name"], "forEach"),
            ],
        );
        call.direct_child = true;

        assert_eq!(
            patterns,
            vec![
                with_attrs(
                    node("FunctionDeclaration"),
                    vec![attr(&["body", "type"], "BlockStatement")]
                ),
                statement,
                call,
            ]
        );
    }

    #[test]
    fn test_comma_separated_alternatives() {
        let compiled = parse("FunctionDeclaration > Identifier, FunctionExpression").unwrap();
        assert_eq!(compiled.len(), 2);
        assert!(
            compiled
                .iter()
                .all(|selector| selector.source == "FunctionDeclaration > Identifier, FunctionExpression")
        );
        assert_eq!(compiled[0].patterns.len(), 2);
        assert_eq!(compiled[1].patterns, vec![node("FunctionExpression")]);
    }

    #[test]
    fn test_rejects_malformed_selectors() {
        for selector in [
            "",
            "FunctionDeclaration >",
            "FunctionDeclaration[name",
            "FunctionDeclaration[name=\"x\"",
            "FunctionDeclaration[name=\"x]",
            "FunctionDeclaration[=\"x\"]",
            "FunctionDeclaration[name=\"\"]",
            "FunctionDeclaration > > Identifier",
            "FunctionDeclaration,",
        ] {
            let err = parse(selector).unwrap_err();
            assert!(
                matches!(err, LintelError::SelectorSyntax { .. }),
                "{selector:?} should be rejected"
            );
            assert!(err.to_string().contains(selector));
        }
    }

    #[test]
    fn test_error_reports_position() {
        let err = parse("FunctionDeclaration[name").unwrap_err();
        match err {
            LintelError::SelectorSyntax { position, message, .. } => {
                assert_eq!(position, 3);
                assert!(message.contains("end of input"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
