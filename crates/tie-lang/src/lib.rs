//! `tie-lang` compiles tiny integer expressions into a tree and evaluates them.
//!
//! The language has integer literals, the operators `+ - * / % & | ^ < >`
//! (`<` and `>` are left and right shifts), unary signs, parentheses, the
//! comma operator and calls to caller-supplied variables, functions and
//! closures of up to seven arguments. The builtins `abs`, `floor` and `if`
//! are always available.
//!
//! ## Examples
//!
//! ```rust
//! use std::cell::Cell;
//! use tie_lang::{Binding, Function, Number};
//!
//! assert_eq!(tie_lang::interpret("1 + 2 * 3"), Number::new(7));
//!
//! let x = Cell::new(3);
//! let bindings = [
//!     Binding::variable("x", &x),
//!     Binding::function("max", Function::Arity2(|a, b| if a.value() > b.value() { a } else { b })),
//! ];
//! let expression = tie_lang::compile("max(x, 10) - 1", &bindings).unwrap();
//! assert_eq!(expression.eval(), Number::new(9));
//!
//! x.set(20);
//! assert_eq!(expression.eval(), Number::new(19));
//!
//! let err = tie_lang::compile("1 +", &bindings).unwrap_err();
//! assert_eq!(err.code(), 3);
//! ```
mod ast;
mod binding;
mod builtin;
mod engine;
mod error;
mod eval;
mod expression;
mod lexer;
mod number;
mod optimizer;
mod range;
mod resolver;

use ast::parser::Parser;
use lexer::Lexer;
use optimizer::Optimizer;
use resolver::Resolver;

pub use ast::error::{AllocationError, ParseError};
pub use ast::node::{Call as AstCall, Callee, Node as AstNode};
pub use binding::{Binding, BindingKind, Closure, Context, Function};
pub use engine::{Engine, Options};
pub use error::{Error, InnerError};
pub use expression::Expression;
pub use lexer::error::LexerError;
pub use lexer::token::{Operator, Token, TokenKind};
pub use number::{INFINITE, NAN, NEG_INFINITE, Number, ZERO};
pub use range::Range;
pub use resolver::Symbol;

/// Compiles `code` against `bindings` with the default [`Options`].
#[allow(clippy::result_large_err)]
pub fn compile<'a>(code: &str, bindings: &[Binding<'a>]) -> Result<Expression<'a>, Error> {
    compile_with_options(code, bindings, &Options::default())
}

#[allow(clippy::result_large_err)]
pub fn compile_with_options<'a>(
    code: &str,
    bindings: &[Binding<'a>],
    options: &Options,
) -> Result<Expression<'a>, Error> {
    tracing::debug!(code, bindings = bindings.len(), "compiling expression");

    let mut root = Parser::new(Lexer::new(code, Resolver::new(bindings)))
        .and_then(Parser::parse)
        .map_err(|cause| {
            tracing::debug!(%cause, "failed to compile expression");
            Error::from_error(code, cause)
        })?;

    if options.optimize {
        let mut optimizer = Optimizer::new();
        optimizer.optimize(&mut root);
        tracing::debug!(folded = optimizer.folded(), "optimized expression");
    }

    Ok(Expression::new(root))
}

/// Scans `code` into tokens, ending with [`TokenKind::Eof`].
#[allow(clippy::result_large_err)]
pub fn tokenize<'a>(code: &str, bindings: &[Binding<'a>]) -> Result<Vec<Token<'a>>, Error> {
    Lexer::new(code, Resolver::new(bindings))
        .tokenize()
        .map_err(|e| Error::from_error(code, InnerError::Lexer(e)))
}

/// Evaluates a compiled expression, yielding [`NAN`] when there is none.
pub fn evaluate(expression: Option<&Expression<'_>>) -> Number {
    expression.map_or(NAN, Expression::eval)
}

/// Compiles and evaluates `code` without bindings, yielding [`NAN`] on failure.
pub fn interpret(code: &str) -> Number {
    try_interpret(code).unwrap_or(NAN)
}

/// Compiles and evaluates `code` without bindings.
#[allow(clippy::result_large_err)]
pub fn try_interpret(code: &str) -> Result<Number, Error> {
    compile(code, &[]).map(|expression| expression.eval())
}
