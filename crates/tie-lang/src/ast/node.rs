use std::{
    cell::Cell,
    fmt::{self, Display, Formatter},
};

use crate::{
    binding::{Closure, Context, Function},
    eval,
    number::Number,
};

use super::{Args, error::AllocationError};

type Depth = usize;

#[derive(Debug, Clone, Copy)]
pub enum Callee<'a> {
    Function(Function),
    Closure(Closure, Context<'a>),
}

impl Callee<'_> {
    pub fn arity(&self) -> usize {
        match self {
            Callee::Function(function) => function.arity(),
            Callee::Closure(closure, _) => closure.arity(),
        }
    }

    /// Closures receive their context ahead of `args`.
    pub fn call(&self, args: &[Number]) -> Number {
        match self {
            Callee::Function(function) => function.call(args),
            Callee::Closure(closure, context) => closure.call(*context, args),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Call<'a> {
    pub name: &'a str,
    pub callee: Callee<'a>,
    /// Pure calls may be folded once all of their arguments are constant.
    pub pure: bool,
    pub args: Args<'a>,
}

/// A node of a compiled expression. Each node owns its children.
#[derive(Debug, Clone)]
pub enum Node<'a> {
    Constant(Number),
    Variable { name: &'a str, cell: &'a Cell<i64> },
    Call(Call<'a>),
}

impl<'a> Node<'a> {
    pub fn constant(value: impl Into<Number>) -> Self {
        Node::Constant(value.into())
    }

    pub fn variable(name: &'a str, cell: &'a Cell<i64>) -> Self {
        Node::Variable { name, cell }
    }

    /// Builds a call node whose argument storage is reserved up front.
    ///
    /// `children` must yield exactly `callee.arity()` nodes. On failure the
    /// children are dropped along with the iterator.
    pub fn call<I>(
        name: &'a str,
        callee: Callee<'a>,
        pure: bool,
        children: I,
    ) -> Result<Self, AllocationError>
    where
        I: IntoIterator<Item = Node<'a>>,
    {
        let arity = callee.arity();
        let mut args = Args::new();
        args.try_reserve_exact(arity)
            .map_err(|_| AllocationError(arity))?;
        args.extend(children);

        debug_assert_eq!(
            args.len(),
            arity,
            "`{}` expects {} arguments but got {}",
            name,
            arity,
            args.len()
        );

        Ok(Node::Call(Call {
            name,
            callee,
            pure,
            args,
        }))
    }

    /// Builds a pure operator node.
    pub fn operator<I>(name: &'static str, function: Function, children: I) -> Result<Self, AllocationError>
    where
        I: IntoIterator<Item = Node<'a>>,
    {
        Self::call(name, Callee::Function(function), true, children)
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Node::Constant(_))
    }

    pub fn constant_value(&self) -> Option<Number> {
        match self {
            Node::Constant(value) => Some(*value),
            _ => None,
        }
    }

    pub fn children(&self) -> &[Node<'a>] {
        match self {
            Node::Call(call) => &call.args,
            _ => &[],
        }
    }

    pub fn eval(&self) -> Number {
        eval::eval(self)
    }

    fn fmt_with_depth(&self, f: &mut Formatter<'_>, depth: Depth) -> fmt::Result {
        let indent = depth * 2;

        match self {
            Node::Constant(value) => writeln!(f, "{:indent$}{}", "", value),
            Node::Variable { name, .. } => writeln!(f, "{:indent$}{}", "", name),
            Node::Call(call) => {
                writeln!(
                    f,
                    "{:indent$}{}/{}{}",
                    "",
                    call.name,
                    call.args.len(),
                    if call.pure { "" } else { " impure" }
                )?;
                call.args
                    .iter()
                    .try_for_each(|arg| arg.fmt_with_depth(f, depth + 1))
            }
        }
    }
}

impl Display for Node<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.fmt_with_depth(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin;
    use rstest::rstest;

    fn sum3(a: Number, b: Number, c: Number) -> Number {
        a + b + c
    }

    #[test]
    fn test_call_builder() {
        let x = Cell::new(4);
        let node = Node::call(
            "sum3",
            Callee::Function(Function::Arity3(sum3)),
            false,
            [Node::constant(1), Node::variable("x", &x), Node::constant(2)],
        );

        match node {
            Ok(Node::Call(call)) => {
                assert_eq!(call.name, "sum3");
                assert_eq!(call.args.len(), 3);
                assert!(call.args.capacity() >= 3);
                assert!(!call.pure);
            }
            other => panic!("unexpected node {:?}", other),
        }
    }

    #[rstest]
    #[case::constant(Node::constant(5), true, 0)]
    #[case::call(
        Node::operator("neg", Function::Arity1(builtin::negate), [Node::constant(1)]).unwrap(),
        false,
        1
    )]
    fn test_shape(#[case] node: Node, #[case] is_constant: bool, #[case] children: usize) {
        assert_eq!(node.is_constant(), is_constant);
        assert_eq!(node.children().len(), children);
    }

    #[test]
    fn test_variable_has_no_children() {
        let x = Cell::new(4);
        let node = Node::variable("x", &x);

        assert!(node.children().is_empty());
        assert_eq!(node.constant_value(), None);
    }

    #[test]
    fn test_callee_closure_receives_context() {
        fn read(context: &dyn std::any::Any) -> Number {
            context
                .downcast_ref::<i64>()
                .map(|value| Number::new(*value))
                .unwrap_or(crate::number::NAN)
        }

        let context = 12_i64;
        let callee = Callee::Closure(Closure::Arity0(read), &context);

        assert_eq!(callee.arity(), 0);
        assert_eq!(callee.call(&[]), Number::new(12));
    }

    #[test]
    fn test_display() {
        let x = Cell::new(4);
        let node = Node::operator(
            "+",
            Function::Arity2(builtin::add),
            [
                Node::constant(1),
                Node::call(
                    "sum3",
                    Callee::Function(Function::Arity3(sum3)),
                    false,
                    [Node::constant(2), Node::variable("x", &x), Node::constant(-3)],
                )
                .unwrap(),
            ],
        )
        .unwrap();

        assert_eq!(
            node.to_string(),
            "+/2\n  1\n  sum3/3 impure\n    2\n    x\n    -3\n"
        );
    }
}
