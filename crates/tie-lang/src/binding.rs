use std::any::Any;
use std::cell::Cell;
use std::fmt;

use crate::number::{NAN, Number};

/// Caller memory handed to a closure on every call.
///
/// Closures recover it with `downcast_ref`, which only succeeds for the exact
/// concrete type. Annotate integer literals (`Cell::new(0_i64)`), since an
/// unannotated `Cell::new(0)` coerced to `&dyn Any` is a `Cell<i32>`.
pub type Context<'a> = &'a dyn Any;

/// A host function taking between zero and seven arguments.
#[derive(Clone, Copy)]
pub enum Function {
    Arity0(fn() -> Number),
    Arity1(fn(Number) -> Number),
    Arity2(fn(Number, Number) -> Number),
    Arity3(fn(Number, Number, Number) -> Number),
    Arity4(fn(Number, Number, Number, Number) -> Number),
    Arity5(fn(Number, Number, Number, Number, Number) -> Number),
    Arity6(fn(Number, Number, Number, Number, Number, Number) -> Number),
    Arity7(fn(Number, Number, Number, Number, Number, Number, Number) -> Number),
}

impl Function {
    pub fn arity(&self) -> usize {
        match self {
            Function::Arity0(_) => 0,
            Function::Arity1(_) => 1,
            Function::Arity2(_) => 2,
            Function::Arity3(_) => 3,
            Function::Arity4(_) => 4,
            Function::Arity5(_) => 5,
            Function::Arity6(_) => 6,
            Function::Arity7(_) => 7,
        }
    }

    /// Invokes the function. A slice whose length differs from the arity yields `NAN`.
    pub fn call(&self, args: &[Number]) -> Number {
        match (*self, args) {
            (Function::Arity0(f), []) => f(),
            (Function::Arity1(f), [a]) => f(*a),
            (Function::Arity2(f), [a, b]) => f(*a, *b),
            (Function::Arity3(f), [a, b, c]) => f(*a, *b, *c),
            (Function::Arity4(f), [a, b, c, d]) => f(*a, *b, *c, *d),
            (Function::Arity5(f), [a, b, c, d, e]) => f(*a, *b, *c, *d, *e),
            (Function::Arity6(f), [a, b, c, d, e, g]) => f(*a, *b, *c, *d, *e, *g),
            (Function::Arity7(f), [a, b, c, d, e, g, h]) => f(*a, *b, *c, *d, *e, *g, *h),
            _ => NAN,
        }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function/{}", self.arity())
    }
}

/// A host function that receives its bound [`Context`] before the arguments.
#[derive(Clone, Copy)]
pub enum Closure {
    Arity0(fn(&dyn Any) -> Number),
    Arity1(fn(&dyn Any, Number) -> Number),
    Arity2(fn(&dyn Any, Number, Number) -> Number),
    Arity3(fn(&dyn Any, Number, Number, Number) -> Number),
    Arity4(fn(&dyn Any, Number, Number, Number, Number) -> Number),
    Arity5(fn(&dyn Any, Number, Number, Number, Number, Number) -> Number),
    Arity6(fn(&dyn Any, Number, Number, Number, Number, Number, Number) -> Number),
    Arity7(fn(&dyn Any, Number, Number, Number, Number, Number, Number, Number) -> Number),
}

impl Closure {
    pub fn arity(&self) -> usize {
        match self {
            Closure::Arity0(_) => 0,
            Closure::Arity1(_) => 1,
            Closure::Arity2(_) => 2,
            Closure::Arity3(_) => 3,
            Closure::Arity4(_) => 4,
            Closure::Arity5(_) => 5,
            Closure::Arity6(_) => 6,
            Closure::Arity7(_) => 7,
        }
    }

    pub fn call(&self, context: Context<'_>, args: &[Number]) -> Number {
        match (*self, args) {
            (Closure::Arity0(f), []) => f(context),
            (Closure::Arity1(f), [a]) => f(context, *a),
            (Closure::Arity2(f), [a, b]) => f(context, *a, *b),
            (Closure::Arity3(f), [a, b, c]) => f(context, *a, *b, *c),
            (Closure::Arity4(f), [a, b, c, d]) => f(context, *a, *b, *c, *d),
            (Closure::Arity5(f), [a, b, c, d, e]) => f(context, *a, *b, *c, *d, *e),
            (Closure::Arity6(f), [a, b, c, d, e, g]) => f(context, *a, *b, *c, *d, *e, *g),
            (Closure::Arity7(f), [a, b, c, d, e, g, h]) => {
                f(context, *a, *b, *c, *d, *e, *g, *h)
            }
            _ => NAN,
        }
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Closure/{}", self.arity())
    }
}

#[derive(Debug, Clone, Copy)]
pub enum BindingKind<'a> {
    Variable(&'a Cell<i64>),
    Function(Function),
    Closure(Closure, Context<'a>),
}

/// A named entry of the table passed to [`crate::compile`].
///
/// Variables are read when the expression is evaluated, not when it is
/// compiled, so updating the cell changes the next result.
#[derive(Debug, Clone, Copy)]
pub struct Binding<'a> {
    pub name: &'a str,
    pub kind: BindingKind<'a>,
}

impl<'a> Binding<'a> {
    pub fn variable(name: &'a str, cell: &'a Cell<i64>) -> Self {
        Binding {
            name,
            kind: BindingKind::Variable(cell),
        }
    }

    pub fn function(name: &'a str, function: Function) -> Self {
        Binding {
            name,
            kind: BindingKind::Function(function),
        }
    }

    pub fn closure(name: &'a str, closure: Closure, context: Context<'a>) -> Self {
        Binding {
            name,
            kind: BindingKind::Closure(closure, context),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn seven(a: Number, b: Number, c: Number, d: Number, e: Number, f: Number, g: Number) -> Number {
        a + b + c + d + e + f + g
    }

    fn offset(context: &dyn Any, a: Number) -> Number {
        context
            .downcast_ref::<Cell<i64>>()
            .map(|cell| a + cell.get().into())
            .unwrap_or(NAN)
    }

    #[rstest]
    #[case(Function::Arity0(|| Number::new(1)), 0)]
    #[case(Function::Arity1(|a| -a), 1)]
    #[case(Function::Arity3(|a, _, _| a), 3)]
    #[case(Function::Arity7(seven), 7)]
    fn test_function_arity(#[case] function: Function, #[case] expected: usize) {
        assert_eq!(function.arity(), expected);
    }

    #[test]
    fn test_function_call() {
        let args: Vec<Number> = (1..=7).map(Number::new).collect();
        assert_eq!(Function::Arity7(seven).call(&args), Number::new(28));
        assert_eq!(Function::Arity7(seven).call(&args[..3]), NAN);
    }

    #[test]
    fn test_closure_call() {
        let context = Cell::new(10_i64);
        let closure = Closure::Arity1(offset);

        assert_eq!(closure.call(&context, &[Number::new(5)]), Number::new(15));
        context.set(20);
        assert_eq!(closure.call(&context, &[Number::new(5)]), Number::new(25));
        assert_eq!(closure.call(&"not a cell", &[Number::new(5)]), NAN);
    }

    #[test]
    fn test_closure_context_type_must_match() {
        let narrow = Cell::new(10_i32);
        let exact = Cell::new(10_i64);
        let closure = Closure::Arity1(offset);

        assert_eq!(closure.call(&narrow, &[Number::new(5)]), NAN);
        assert_eq!(closure.call(&exact, &[Number::new(5)]), Number::new(15));
    }
}
