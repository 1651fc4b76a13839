//! Selector-aware event generator

use indexmap::IndexMap;
use tracing::debug;

use super::{Emitter, EventGenerator};
use crate::Result;
use crate::ast::Node;
use crate::selector::{self, CompiledSelector};

/// Wraps a generator and fires selector events on node entry
///
/// Selector keys are collected from the emitter and compiled on the first
/// `enter_node`, so listeners registered before traversal starts are all
/// seen. A key made of comma-separated alternatives fires at most once per
/// node, however many of its alternatives match.
#[derive(Debug)]
pub struct SelectorEventGenerator<G> {
    base: G,
    selectors: Option<IndexMap<String, Vec<CompiledSelector>>>,
}

impl<G> SelectorEventGenerator<G> {
    pub fn new(base: G) -> Self {
        Self {
            base,
            selectors: None,
        }
    }

    pub fn into_inner(self) -> G {
        self.base
    }

    /// Whether selector keys have been compiled yet
    pub fn is_compiled(&self) -> bool {
        self.selectors.is_some()
    }
}

fn compile_selectors<C>(emitter: &Emitter<'_, C>) -> Result<IndexMap<String, Vec<CompiledSelector>>> {
    let mut compiled = IndexMap::new();
    for event in emitter.event_keys().filter(|event| selector::is_selector(event)) {
        if compiled.contains_key(event) {
            continue;
        }
        debug!("Compiling selector: {}", event);
        compiled.insert(event.to_string(), selector::parse(event)?);
    }
    Ok(compiled)
}

impl<'a, C, G> EventGenerator<'a, C> for SelectorEventGenerator<G>
where
    G: EventGenerator<'a, C>,
{
    fn enter_node(&mut self, node: Node<'a>, cx: &mut C) -> Result<()> {
        if self.selectors.is_none() {
            self.selectors = Some(compile_selectors(self.base.emitter())?);
        }

        if let Some(selectors) = &self.selectors {
            for (event, alternatives) in selectors {
                if alternatives.iter().any(|selector| selector.matches(node)) {
                    self.base.emitter_mut().emit(event, node, cx);
                }
            }
        }

        self.base.enter_node(node, cx)
    }

    fn leave_node(&mut self, node: Node<'a>, cx: &mut C) -> Result<()> {
        self.base.leave_node(node, cx)
    }

    fn emitter(&self) -> &Emitter<'a, C> {
        self.base.emitter()
    }

    fn emitter_mut(&mut self) -> &mut Emitter<'a, C> {
        self.base.emitter_mut()
    }
}
