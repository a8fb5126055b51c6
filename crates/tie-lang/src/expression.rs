use std::fmt::{self, Display, Formatter};

use crate::ast::node::Node;
use crate::number::Number;

/// A compiled expression, ready to be evaluated any number of times.
///
/// The expression borrows the variables and closure contexts it was
/// compiled against for `'a`. Dropping it releases the whole tree.
///
/// It is neither `Send` nor `Sync`, even when every node is a constant,
/// because any node may borrow a `Cell` or a `dyn Any` context. Share it
/// across threads by recompiling per thread.
#[derive(Debug, Clone)]
pub struct Expression<'a> {
    root: Node<'a>,
}

impl<'a> Expression<'a> {
    pub(crate) fn new(root: Node<'a>) -> Self {
        Self { root }
    }

    pub fn eval(&self) -> Number {
        self.root.eval()
    }

    pub fn root(&self) -> &Node<'a> {
        &self.root
    }

    /// The value of an expression that was folded to a single constant.
    pub fn value(&self) -> Option<Number> {
        self.root.constant_value()
    }

    /// Renders the tree, one node per line, children indented under their call.
    pub fn dump(&self) -> String {
        self.root.to_string()
    }
}

impl Display for Expression<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.root)
    }
}
