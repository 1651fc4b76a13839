//! Structural selectors over the AST
//!
//! Rules can subscribe to CSS-like selectors instead of bare node types:
//!
//! ```text
//! selectors    = selector { "," selector }
//! selector     = node { relationship node }
//! relationship = ">" | " "              (direct child | any descendant)
//! node         = [ type ] { "[" query "=" '"' value '"' "]" }
//! query        = property { "." property }
//! ```
//!
//! `FunctionDeclaration[async="true"] > BlockStatement` matches a block that is
//! the immediate child of an async function declaration. Attribute values are
//! always compared as strings, so `Literal[value="42"]` matches the number 42.
//!
//! - **Tokenizer** (`tokenizer`): single left-to-right scan with one character of lookbehind
//! - **Parser** (`parser`): recursive descent over the tokens into [`CompiledSelector`]s
//! - **Matcher** (`matcher`): tests a compiled selector against a node and its ancestors

mod matcher;
mod parser;
mod tokenizer;

use once_cell::sync::Lazy;
use regex::Regex;

pub use matcher::Resolved;
pub use parser::{SelectorParser, parse};
pub use tokenizer::tokenize;

/// One step of an attribute path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
    /// Named field of an object (`length` also applies to arrays and strings)
    Field(String),
    /// Element of an array
    Index(usize),
}

impl PathStep {
    fn from_segment(segment: &str) -> Self {
        match segment.parse::<usize>() {
            Ok(index) => PathStep::Index(index),
            Err(_) => PathStep::Field(segment.to_string()),
        }
    }
}

/// A dotted property path such as `callee.object.name`, compiled into steps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributePath {
    steps: Vec<PathStep>,
}

impl AttributePath {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            steps: segments
                .into_iter()
                .map(|segment| PathStep::from_segment(segment.as_ref()))
                .collect(),
        }
    }

    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }
}

impl std::fmt::Display for AttributePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (position, step) in self.steps.iter().enumerate() {
            if position > 0 {
                f.write_str(".")?;
            }
            match step {
                PathStep::Field(name) => f.write_str(name)?,
                PathStep::Index(index) => write!(f, "{index}")?,
            }
        }
        Ok(())
    }
}

/// `path` evaluated from the node must equal `value` in string form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeConstraint {
    pub path: AttributePath,
    pub value: String,
}

/// One compound of a selector: an optional type plus attribute constraints
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePattern {
    pub node_type: Option<String>,
    pub attributes: Vec<AttributeConstraint>,
    /// Must be the immediate child of the pattern before it
    pub direct_child: bool,
    /// The pattern after this one must be its immediate child
    pub has_direct_child: bool,
}

/// A selector compiled into a chain of patterns, anchor last
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledSelector {
    /// The full selector text, used as the event key
    pub source: String,
    pub patterns: Vec<NodePattern>,
}

impl CompiledSelector {
    /// The pattern that must match the visited node itself
    pub fn anchor(&self) -> Option<&NodePattern> {
        self.patterns.last()
    }
}

static SELECTOR_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z:]").unwrap());

/// Whether an event key is selector DSL rather than a node type or `Type:exit`
pub fn is_selector(event: &str) -> bool {
    SELECTOR_CHARS.is_match(event)
}
