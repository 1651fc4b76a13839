//! Depth-first AST traversal

use crate::Result;
use crate::ast::{Ast, Node};
use crate::events::EventGenerator;

enum Step<'a> {
    Enter(Node<'a>),
    Leave(Node<'a>),
}

/// Drives an [`EventGenerator`] over an AST
pub struct Traverser;

impl Traverser {
    /// Visit every node depth-first, children in field order
    ///
    /// Each `enter_node` is matched by exactly one `leave_node` once all of
    /// the node's children have been entered and left. The walk uses an
    /// explicit stack, so deeply nested input cannot overflow the call stack.
    pub fn traverse<'a, C, G>(ast: &'a Ast, generator: &mut G, cx: &mut C) -> Result<()>
    where
        G: EventGenerator<'a, C> + ?Sized,
    {
        let mut stack = vec![Step::Enter(ast.root())];

        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(node) => {
                    generator.enter_node(node, cx)?;
                    stack.push(Step::Leave(node));
                    let children: Vec<_> = node.children().collect();
                    stack.extend(children.into_iter().rev().map(Step::Enter));
                }
                Step::Leave(node) => generator.leave_node(node, cx)?,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LintelError;
    use crate::events::Emitter;
    use serde_json::json;

    /// Counts nesting depth and fails on the first `Debugger` node
    struct DepthProbe<'a> {
        emitter: Emitter<'a, usize>,
        depth: usize,
    }

    impl<'a> EventGenerator<'a, usize> for DepthProbe<'a> {
        fn enter_node(&mut self, node: Node<'a>, deepest: &mut usize) -> Result<()> {
            if node.kind() == "Debugger" {
                return Err(LintelError::internal_error("stop"));
            }
            self.depth += 1;
            *deepest = (*deepest).max(self.depth);
            Ok(())
        }

        fn leave_node(&mut self, _node: Node<'a>, _deepest: &mut usize) -> Result<()> {
            self.depth -= 1;
            Ok(())
        }

        fn emitter(&self) -> &Emitter<'a, usize> {
            &self.emitter
        }

        fn emitter_mut(&mut self) -> &mut Emitter<'a, usize> {
            &mut self.emitter
        }
    }

    fn nested(depth: usize, leaf: &str) -> Ast {
        let mut document = json!({ "type": leaf });
        for _ in 0..depth {
            document = json!({ "type": "BlockStatement", "body": [document] });
        }
        Ast::from_json(document).unwrap()
    }

    #[test]
    fn test_enter_and_leave_balance() {
        let ast = nested(200, "EmptyStatement");
        let mut probe = DepthProbe {
            emitter: Emitter::new(),
            depth: 0,
        };
        let mut deepest = 0;
        Traverser::traverse(&ast, &mut probe, &mut deepest).unwrap();
        assert_eq!(deepest, 201);
        assert_eq!(probe.depth, 0);
    }

    #[test]
    fn test_generator_errors_stop_the_walk() {
        let ast = nested(3, "Debugger");
        let mut probe = DepthProbe {
            emitter: Emitter::new(),
            depth: 0,
        };
        let generator: &mut dyn EventGenerator<'_, usize> = &mut probe;
        let mut deepest = 0;
        let err = Traverser::traverse(&ast, generator, &mut deepest).unwrap_err();
        assert!(matches!(err, LintelError::InternalError { .. }));
        assert_eq!(deepest, 3);
    }
}
