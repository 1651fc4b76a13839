//! Selector matching against live AST nodes

use std::borrow::Cow;

use serde_json::Value;

use super::{AttributeConstraint, AttributePath, CompiledSelector, NodePattern, PathStep};
use crate::ast::{Node, PROGRAM_TYPE};

/// Result of walking an attribute path
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'a> {
    Value(&'a Value),
    Length(usize),
}

impl<'a> Resolved<'a> {
    /// String form used for comparison; objects and arrays have none
    pub fn as_comparable(&self) -> Option<Cow<'a, str>> {
        match self {
            Resolved::Length(length) => Some(Cow::Owned(length.to_string())),
            Resolved::Value(Value::String(text)) => Some(Cow::Borrowed(text.as_str())),
            Resolved::Value(Value::Number(number)) => Some(Cow::Owned(number.to_string())),
            Resolved::Value(Value::Bool(flag)) => Some(Cow::Borrowed(if *flag {
                "true"
            } else {
                "false"
            })),
            Resolved::Value(Value::Null) => Some(Cow::Borrowed("null")),
            Resolved::Value(Value::Array(_) | Value::Object(_)) => None,
        }
    }
}

impl AttributePath {
    /// Walk the path from `root`; `None` as soon as a step is missing
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<Resolved<'a>> {
        let mut current = Resolved::Value(root);
        for step in &self.steps {
            let Resolved::Value(value) = current else {
                return None;
            };
            current = match (step, value) {
                (PathStep::Field(name), Value::Object(fields)) => {
                    Resolved::Value(fields.get(name)?)
                }
                (PathStep::Field(name), Value::Array(items)) if name == "length" => {
                    Resolved::Length(items.len())
                }
                (PathStep::Field(name), Value::String(text)) if name == "length" => {
                    Resolved::Length(text.chars().count())
                }
                (PathStep::Index(index), Value::Array(items)) => Resolved::Value(items.get(*index)?),
                (PathStep::Index(index), Value::Object(fields)) => {
                    Resolved::Value(fields.get(&index.to_string())?)
                }
                _ => return None,
            };
        }
        Some(current)
    }
}

impl AttributeConstraint {
    pub fn matches(&self, node: Node<'_>) -> bool {
        self.path
            .resolve(node.value())
            .and_then(|resolved| resolved.as_comparable())
            .is_some_and(|actual| actual == self.value.as_str())
    }
}

impl NodePattern {
    /// Test type and attribute constraints against a single node
    pub fn matches(&self, node: Node<'_>) -> bool {
        if let Some(node_type) = &self.node_type {
            if node.kind() != node_type {
                return false;
            }
        }
        self.attributes
            .iter()
            .all(|attribute| attribute.matches(node))
    }
}

impl CompiledSelector {
    /// Whether `node` matches the anchor and the ancestor chain matches the rest
    ///
    /// Patterns are consumed right to left. After a pattern matches, the next
    /// one is searched for among the ancestors: only the immediate parent when
    /// the matched pattern is a direct child, otherwise the nearest ancestor
    /// that matches. The `Program` root ends the walk without being tested.
    pub fn matches(&self, node: Node<'_>) -> bool {
        let mut patterns = self.patterns.iter().rev();
        let Some(anchor) = patterns.next() else {
            return false;
        };
        if !anchor.matches(node) {
            return false;
        }

        let mut current = node;
        let mut direct_child = anchor.direct_child;
        for pattern in patterns {
            loop {
                let Some(parent) = current.parent() else {
                    return false;
                };
                current = parent;
                if current.kind() == PROGRAM_TYPE {
                    return false;
                }
                if pattern.matches(current) {
                    break;
                }
                if direct_child {
                    return false;
                }
            }
            direct_child = pattern.direct_child;
        }

        true
    }
}
