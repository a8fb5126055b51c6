use std::cell::Cell;

use crate::{
    Expression,
    binding::{Binding, Closure, Context, Function},
    compile_with_options,
    error::Error,
    number::Number,
};

#[derive(Debug, Clone)]
pub struct Options {
    /// Fold constant sub-expressions after parsing.
    pub optimize: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { optimize: true }
    }
}

/// Owns a binding table and compile options for repeated compilation.
///
/// Names are resolved in definition order, so the first definition of a
/// name shadows later ones as well as any builtin.
#[derive(Debug, Clone, Default)]
pub struct Engine<'a> {
    bindings: Vec<Binding<'a>>,
    options: Options,
}

impl<'a> Engine<'a> {
    pub fn new(options: Options) -> Self {
        Self {
            bindings: Vec::new(),
            options,
        }
    }

    pub fn set_optimize(&mut self, optimize: bool) {
        self.options.optimize = optimize;
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn bindings(&self) -> &[Binding<'a>] {
        &self.bindings
    }

    pub fn define_variable(&mut self, name: &'a str, cell: &'a Cell<i64>) -> &mut Self {
        self.bindings.push(Binding::variable(name, cell));
        self
    }

    pub fn define_function(&mut self, name: &'a str, function: Function) -> &mut Self {
        self.bindings.push(Binding::function(name, function));
        self
    }

    pub fn define_closure(
        &mut self,
        name: &'a str,
        closure: Closure,
        context: Context<'a>,
    ) -> &mut Self {
        self.bindings.push(Binding::closure(name, closure, context));
        self
    }

    #[allow(clippy::result_large_err)]
    pub fn compile(&self, code: &str) -> Result<Expression<'a>, Error> {
        compile_with_options(code, &self.bindings, &self.options)
    }

    /// Compiles `code` and evaluates it once.
    #[allow(clippy::result_large_err)]
    pub fn eval(&self, code: &str) -> Result<Number, Error> {
        self.compile(code).map(|expression| expression.eval())
    }

    pub const fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}

#[cfg(test)]
mod tests {
    use std::any::Any;

    use super::*;
    use rstest::{fixture, rstest};

    fn twice(a: Number) -> Number {
        a * Number::new(2)
    }

    fn scaled(context: &dyn Any, a: Number) -> Number {
        context
            .downcast_ref::<Cell<i64>>()
            .map(|factor| a * Number::new(factor.get()))
            .unwrap_or(crate::number::NAN)
    }

    #[fixture]
    fn engine() -> Engine<'static> {
        let mut engine = Engine::default();
        engine.define_function("twice", Function::Arity1(twice));
        engine
    }

    #[rstest]
    #[case("twice 21", Number::new(42))]
    #[case("twice(1+2)*2", Number::new(12))]
    #[case("abs -5", Number::new(5))]
    fn test_eval(engine: Engine<'static>, #[case] code: &str, #[case] expected: Number) {
        assert_eq!(engine.eval(code), Ok(expected));
    }

    #[rstest]
    fn test_eval_error(engine: Engine<'static>) {
        let err = engine.eval("twice").unwrap_err();
        assert_eq!(err.code(), 5);
    }

    #[test]
    fn test_variables_and_closures() {
        let x = Cell::new(3);
        let factor = Cell::new(10_i64);
        let mut engine = Engine::default();
        engine
            .define_variable("x", &x)
            .define_closure("scaled", Closure::Arity1(scaled), &factor);

        let expression = engine.compile("scaled x + 1").unwrap();
        assert_eq!(expression.eval(), Number::new(31));

        x.set(4);
        factor.set(2);
        assert_eq!(expression.eval(), Number::new(9));
        assert_eq!(engine.bindings().len(), 2);
    }

    #[rstest]
    #[case(true, Some(Number::new(10)))]
    #[case(false, None)]
    fn test_set_optimize(#[case] optimize: bool, #[case] expected: Option<Number>) {
        let mut engine = Engine::default();
        engine.set_optimize(optimize);

        let expression = engine.compile("5+5").unwrap();
        assert_eq!(expression.value(), expected);
        assert_eq!(expression.eval(), Number::new(10));
        assert_eq!(engine.options().optimize, optimize);
    }

    #[test]
    fn test_version() {
        let version = Engine::version();
        assert!(!version.is_empty());
    }
}
