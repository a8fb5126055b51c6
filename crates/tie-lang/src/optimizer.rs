use crate::ast::node::Node;

/// Folds pure calls whose arguments are all constants.
///
/// The pass runs bottom-up, so nested constant sub-expressions collapse
/// into a single constant. Impure calls are never folded and their
/// arguments are left untouched.
#[derive(Debug, Default)]
pub struct Optimizer {
    folded: usize,
}

impl Optimizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of calls replaced by constants so far.
    pub fn folded(&self) -> usize {
        self.folded
    }

    pub fn optimize(&mut self, node: &mut Node<'_>) {
        let Node::Call(call) = node else {
            return;
        };

        if !call.pure {
            return;
        }

        call.args.iter_mut().for_each(|arg| self.optimize(arg));

        if call.args.iter().all(Node::is_constant) {
            let name = call.name;
            let value = node.eval();

            tracing::trace!(name, %value, "folded constant call");
            *node = Node::Constant(value);
            self.folded += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::ast::node::Callee;
    use crate::binding::Function;
    use crate::builtin;
    use crate::number::{NAN, Number};
    use rstest::rstest;

    fn add(a: Node<'static>, b: Node<'static>) -> Node<'static> {
        Node::operator("+", Function::Arity2(builtin::add), [a, b]).unwrap()
    }

    fn impure(a: Node<'static>) -> Node<'static> {
        Node::call(
            "negate",
            Callee::Function(Function::Arity1(builtin::negate)),
            false,
            [a],
        )
        .unwrap()
    }

    #[rstest]
    #[case::constant(Node::constant(1), Some(Number::new(1)), 0)]
    #[case::flat(add(Node::constant(5), Node::constant(5)), Some(Number::new(10)), 1)]
    #[case::nested(
        add(add(Node::constant(1), Node::constant(2)), add(Node::constant(3), Node::constant(4))),
        Some(Number::new(10)),
        3
    )]
    #[case::division_by_zero(
        Node::operator("%", Function::Arity2(builtin::rem), [Node::constant(1), Node::constant(0)]).unwrap(),
        Some(NAN),
        1
    )]
    #[case::impure(impure(Node::constant(1)), None, 0)]
    #[case::impure_argument(add(Node::constant(1), impure(Node::constant(1))), None, 0)]
    fn test_optimize(#[case] mut node: Node<'static>, #[case] expected: Option<Number>, #[case] folded: usize) {
        let before = node.eval();
        let mut optimizer = Optimizer::new();
        optimizer.optimize(&mut node);

        assert_eq!(node.constant_value(), expected);
        assert_eq!(optimizer.folded(), folded);
        assert_eq!(node.eval(), before);
    }

    #[test]
    fn test_impure_arguments_are_not_visited() {
        let mut node = impure(add(Node::constant(2), Node::constant(3)));
        Optimizer::new().optimize(&mut node);

        assert!(matches!(node.children(), [Node::Call(_)]));
    }

    #[test]
    fn test_variables_are_kept() {
        let x = Cell::new(1);
        let mut node = Node::operator(
            "+",
            Function::Arity2(builtin::add),
            [Node::variable("x", &x), add(Node::constant(2), Node::constant(3))],
        )
        .unwrap();
        Optimizer::new().optimize(&mut node);

        assert!(matches!(
            node.children(),
            [Node::Variable { .. }, Node::Constant(Number::Int(5))]
        ));
        x.set(10);
        assert_eq!(node.eval(), Number::new(15));
    }

    #[test]
    fn test_idempotent() {
        let x = Cell::new(1);
        let mut node = Node::operator(
            "*",
            Function::Arity2(builtin::mul),
            [Node::variable("x", &x), add(Node::constant(2), Node::constant(3))],
        )
        .unwrap();
        let mut optimizer = Optimizer::new();
        optimizer.optimize(&mut node);
        let once = node.to_string();
        optimizer.optimize(&mut node);

        assert_eq!(node.to_string(), once);
        assert_eq!(optimizer.folded(), 1);
    }
}
