pub mod error;
pub mod node;
pub mod parser;

pub type Args<'a> = Vec<node::Node<'a>>;
