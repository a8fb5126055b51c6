//! Property-based tests for compiling and evaluating tie-lang expressions.
use std::cell::Cell;

use proptest::prelude::*;
use tie_lang::{Binding, Number, Options};

/// A generated expression together with the value it must evaluate to.
#[derive(Debug, Clone)]
enum Expr {
    Literal(i64),
    Variable,
    Negate(Box<Expr>),
    Binary(&'static str, Box<Expr>, Box<Expr>),
}

impl Expr {
    fn to_code(&self, space: &str) -> String {
        match self {
            Expr::Literal(n) => n.to_string(),
            Expr::Variable => "x".to_string(),
            Expr::Negate(e) => format!("-{space}({space}{}{space})", e.to_code(space)),
            Expr::Binary(op, lhs, rhs) => format!(
                "({space}{}{space}{op}{space}{}{space})",
                lhs.to_code(space),
                rhs.to_code(space)
            ),
        }
    }

    fn eval(&self, x: i64) -> Number {
        match self {
            Expr::Literal(n) => Number::new(*n),
            Expr::Variable => Number::new(x),
            Expr::Negate(e) => -e.eval(x),
            Expr::Binary(op, lhs, rhs) => {
                let (a, b) = (lhs.eval(x), rhs.eval(x));
                match *op {
                    "+" => a + b,
                    "-" => a - b,
                    "*" => a * b,
                    "/" => a / b,
                    "%" => a % b,
                    "&" => a & b,
                    "|" => a | b,
                    "^" => a ^ b,
                    "<" => a << b,
                    ">" => a >> b,
                    _ => b,
                }
            }
        }
    }
}

mod strategies {
    use super::*;

    pub fn operator() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec!["+", "-", "*", "/", "%", "&", "|", "^", "<", ">", ","])
    }

    pub fn leaf() -> impl Strategy<Value = Expr> {
        prop_oneof![
            4 => (0i64..1000).prop_map(Expr::Literal),
            1 => Just(Expr::Variable),
        ]
    }

    pub fn expr() -> impl Strategy<Value = Expr> {
        leaf().prop_recursive(4, 32, 2, |inner| {
            prop_oneof![
                1 => inner.clone().prop_map(|e| Expr::Negate(Box::new(e))),
                4 => (operator(), inner.clone(), inner)
                    .prop_map(|(op, lhs, rhs)| Expr::Binary(op, Box::new(lhs), Box::new(rhs))),
            ]
        })
    }

    pub fn space() -> impl Strategy<Value = String> {
        "[ \t\n]{0,3}"
    }
}

fn compile_and_eval(code: &str, x: i64, optimize: bool) -> Result<Number, i32> {
    let cell = Cell::new(x);
    let bindings = [Binding::variable("x", &cell)];

    tie_lang::compile_with_options(code, &bindings, &Options { optimize })
        .map(|expression| expression.eval())
        .map_err(|e| e.code())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Fully parenthesized expressions evaluate like the arithmetic they spell out
    #[test]
    fn eval_matches_number_arithmetic(expr in strategies::expr(), x in -100i64..100) {
        let code = expr.to_code("");
        prop_assert_eq!(compile_and_eval(&code, x, true), Ok(expr.eval(x)), "code: {}", code);
    }

    /// Folding constants never changes the result
    #[test]
    fn optimize_preserves_value(expr in strategies::expr(), x in -100i64..100) {
        let code = expr.to_code("");
        prop_assert_eq!(
            compile_and_eval(&code, x, true),
            compile_and_eval(&code, x, false),
            "code: {}", code
        );
    }

    /// Whitespace between tokens is insignificant
    #[test]
    fn whitespace_is_ignored(expr in strategies::expr(), space in strategies::space(), x in -100i64..100) {
        prop_assert_eq!(
            compile_and_eval(&expr.to_code(&space), x, true),
            compile_and_eval(&expr.to_code(""), x, true)
        );
    }

    /// Extra parentheses around a whole expression do not change it
    #[test]
    fn redundant_parens(expr in strategies::expr(), depth in 1usize..5) {
        let code = expr.to_code("");
        let wrapped = format!("{}{}{}", "(".repeat(depth), code, ")".repeat(depth));

        prop_assert_eq!(compile_and_eval(&wrapped, 7, true), compile_and_eval(&code, 7, true));
    }

    /// A chain of binary operators on one tier associates to the left
    #[test]
    fn subtraction_is_left_associative(a in 0i64..1000, b in 0i64..1000, c in 0i64..1000) {
        let code = format!("{a}-{b}-{c}");
        prop_assert_eq!(tie_lang::try_interpret(&code).map_err(|e| e.code()), Ok(Number::new(a - b - c)));
    }

    /// Failing to compile always yields NaN from `interpret`
    #[test]
    fn invalid_input_interprets_to_nan(code in "[0-9+*()]{0,8}[#!$@]") {
        prop_assert!(tie_lang::interpret(&code).is_nan());
        prop_assert!(tie_lang::try_interpret(&code).unwrap_err().code() >= 1);
    }
}
