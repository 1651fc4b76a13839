//! Arena-backed view over an ESTree-shaped JSON AST
//!
//! The parser that produces the JSON lives outside this crate. Every JSON
//! object carrying a string `type` field is indexed as a node; nodes keep a
//! parent link and their children in field order, so a selector can walk the
//! ancestor chain of whatever node the traversal is currently visiting.

use std::fmt;

use serde_json::Value;

use crate::{LintelError, Result};

/// Node type of the traversal root
pub const PROGRAM_TYPE: &str = "Program";

static NULL: Value = Value::Null;

/// Index of a node inside its [`Ast`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
struct NodeData {
    kind: String,
    pointer: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An indexed AST document
#[derive(Debug)]
pub struct Ast {
    document: Value,
    nodes: Vec<NodeData>,
}

impl Ast {
    /// Index a JSON document whose root is a `type`-tagged object
    pub fn from_json(document: Value) -> Result<Self> {
        let Some(kind) = node_kind(&document) else {
            return Err(LintelError::ast_error(
                "root must be an object with a string `type` field",
            ));
        };

        let mut nodes = Vec::new();
        index_node(&document, kind, String::new(), None, &mut nodes);
        Ok(Self { document, nodes })
    }

    /// Parse and index a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(json)
            .map_err(|err| LintelError::ast_error(format!("malformed JSON: {err}")))?;
        Self::from_json(document)
    }

    /// The root node
    pub fn root(&self) -> Node<'_> {
        Node {
            ast: self,
            id: NodeId(0),
        }
    }

    pub fn node(&self, id: NodeId) -> Option<Node<'_>> {
        (id.0 < self.nodes.len()).then_some(Node { ast: self, id })
    }

    /// All nodes in pre-order
    pub fn nodes(&self) -> impl Iterator<Item = Node<'_>> {
        (0..self.nodes.len()).map(move |index| Node {
            ast: self,
            id: NodeId(index),
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }
}

fn node_kind(value: &Value) -> Option<&str> {
    value.as_object()?.get("type")?.as_str()
}

fn escape_pointer_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

fn index_node(
    value: &Value,
    kind: &str,
    pointer: String,
    parent: Option<NodeId>,
    nodes: &mut Vec<NodeData>,
) -> NodeId {
    let id = NodeId(nodes.len());
    nodes.push(NodeData {
        kind: kind.to_string(),
        pointer: pointer.clone(),
        parent,
        children: Vec::new(),
    });

    let Some(object) = value.as_object() else {
        return id;
    };

    for (key, field) in object {
        // ESTree producers sometimes serialize back-references; never descend into them
        if key == "parent" {
            continue;
        }
        let field_pointer = format!("{pointer}/{}", escape_pointer_token(key));
        match field {
            Value::Object(_) => {
                if let Some(child_kind) = node_kind(field) {
                    let child = index_node(field, child_kind, field_pointer, Some(id), nodes);
                    nodes[id.0].children.push(child);
                }
            }
            Value::Array(items) => {
                for (position, item) in items.iter().enumerate() {
                    if let Some(child_kind) = node_kind(item) {
                        let child = index_node(
                            item,
                            child_kind,
                            format!("{field_pointer}/{position}"),
                            Some(id),
                            nodes,
                        );
                        nodes[id.0].children.push(child);
                    }
                }
            }
            _ => {}
        }
    }

    id
}

/// Cheap handle to a node of an [`Ast`]
#[derive(Clone, Copy)]
pub struct Node<'a> {
    ast: &'a Ast,
    id: NodeId,
}

impl<'a> Node<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn ast(&self) -> &'a Ast {
        self.ast
    }

    /// The node's `type` field
    pub fn kind(&self) -> &'a str {
        &self.ast.data(self.id).kind
    }

    pub fn parent(&self) -> Option<Node<'a>> {
        let ast = self.ast;
        ast.data(self.id).parent.map(|id| Node { ast, id })
    }

    pub fn children(&self) -> impl Iterator<Item = Node<'a>> + 'a {
        let ast = self.ast;
        ast.data(self.id)
            .children
            .iter()
            .map(move |&id| Node { ast, id })
    }

    /// Ancestors from the immediate parent up to the root
    pub fn ancestors(&self) -> impl Iterator<Item = Node<'a>> + 'a {
        std::iter::successors(self.parent(), |node| node.parent())
    }

    /// The raw JSON object of this node
    pub fn value(&self) -> &'a Value {
        let data = self.ast.data(self.id);
        self.ast.document.pointer(&data.pointer).unwrap_or(&NULL)
    }

    pub fn field(&self, name: &str) -> Option<&'a Value> {
        self.value().get(name)
    }

    /// Byte range from the ESTree `range` field
    pub fn range(&self) -> Option<(usize, usize)> {
        let range = self.field("range")?.as_array()?;
        let start = range.first()?.as_u64()?;
        let end = range.get(1)?.as_u64()?;
        Some((usize::try_from(start).ok()?, usize::try_from(end).ok()?))
    }

    pub fn is_root(&self) -> bool {
        self.ast.data(self.id).parent.is_none()
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.ast, other.ast) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

impl fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id.0)
            .field("kind", &self.kind())
            .finish()
    }
}
