use smallvec::SmallVec;

use crate::ast::node::Node;
use crate::number::Number;

/// Arguments of a single call; calls take at most seven.
type Values = SmallVec<[Number; 7]>;

/// Evaluates `node` against the current contents of its variables.
///
/// Arguments are evaluated left to right before the callee runs.
/// Evaluation never fails: undefined arithmetic yields `NAN` or an infinity.
pub fn eval(node: &Node<'_>) -> Number {
    match node {
        Node::Constant(value) => *value,
        Node::Variable { cell, .. } => Number::new(cell.get()),
        Node::Call(call) => {
            let args: Values = call.args.iter().map(eval).collect();
            call.callee.call(&args)
        }
    }
}
