//! Event emission during AST traversal
//!
//! Rules subscribe to event keys: a bare node type (`Identifier`), a leave
//! event (`Identifier:exit`) or a selector (`FunctionDeclaration > Identifier`).
//! The [`Emitter`] holds those subscriptions as an ordered list of
//! `(event key, listener)` pairs. A generator decides which keys fire for each
//! visited node:
//!
//! - [`NodeEventGenerator`] fires the node type on enter and `<type>:exit` on leave
//! - [`SelectorEventGenerator`] wraps another generator and additionally fires
//!   every selector key whose compiled selector matches the entered node

mod selector;

pub use selector::SelectorEventGenerator;

use crate::Result;
use crate::ast::Node;

/// Callback registered for an event key
pub type Listener<'a, C> = Box<dyn FnMut(Node<'a>, &mut C) + 'a>;

/// Suffix of the event fired when a node is left
pub const EXIT_SUFFIX: &str = ":exit";

/// Ordered `(event key, listener)` registrations
pub struct Emitter<'a, C> {
    listeners: Vec<(String, Listener<'a, C>)>,
}

impl<'a, C> Emitter<'a, C> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Register `listener` under `event`
    pub fn on(&mut self, event: impl Into<String>, listener: Listener<'a, C>) {
        self.listeners.push((event.into(), listener));
    }

    /// Registered keys in registration order, duplicates included
    pub fn event_keys(&self) -> impl Iterator<Item = &str> {
        self.listeners.iter().map(|(event, _)| event.as_str())
    }

    /// Invoke every listener registered under exactly `event`
    pub fn emit(&mut self, event: &str, node: Node<'a>, cx: &mut C) {
        for (key, listener) in &mut self.listeners {
            if key == event {
                listener(node, cx);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl<C> Default for Emitter<'_, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, C> FromIterator<(String, Listener<'a, C>)> for Emitter<'a, C> {
    fn from_iter<I: IntoIterator<Item = (String, Listener<'a, C>)>>(iter: I) -> Self {
        Self {
            listeners: iter.into_iter().collect(),
        }
    }
}

impl<C> std::fmt::Debug for Emitter<'_, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.event_keys()).finish()
    }
}

/// Receives enter and leave notifications from a traversal
pub trait EventGenerator<'a, C> {
    fn enter_node(&mut self, node: Node<'a>, cx: &mut C) -> Result<()>;

    fn leave_node(&mut self, node: Node<'a>, cx: &mut C) -> Result<()>;

    /// The registrations this generator emits into
    fn emitter(&self) -> &Emitter<'a, C>;

    fn emitter_mut(&mut self) -> &mut Emitter<'a, C>;
}

/// Emits node-type events
#[derive(Debug)]
pub struct NodeEventGenerator<'a, C> {
    emitter: Emitter<'a, C>,
}

impl<'a, C> NodeEventGenerator<'a, C> {
    pub fn new(emitter: Emitter<'a, C>) -> Self {
        Self { emitter }
    }
}

impl<'a, C> EventGenerator<'a, C> for NodeEventGenerator<'a, C> {
    fn enter_node(&mut self, node: Node<'a>, cx: &mut C) -> Result<()> {
        self.emitter.emit(node.kind(), node, cx);
        Ok(())
    }

    fn leave_node(&mut self, node: Node<'a>, cx: &mut C) -> Result<()> {
        let event = format!("{}{EXIT_SUFFIX}", node.kind());
        self.emitter.emit(&event, node, cx);
        Ok(())
    }

    fn emitter(&self) -> &Emitter<'a, C> {
        &self.emitter
    }

    fn emitter_mut(&mut self) -> &mut Emitter<'a, C> {
        &mut self.emitter
    }
}
