#![no_main]

use std::cell::Cell;

use arbitrary::Arbitrary;
use itertools::Itertools;
use libfuzzer_sys::fuzz_target;
use tie_lang::{Binding, Closure, Function, Number, Options};

#[derive(Debug, Clone, Arbitrary)]
enum Expr {
    Literal(u16),
    Variable,
    Sign(bool, Box<Expr>),
    Binary(u8, Box<Expr>, Box<Expr>),
    Call(u8, Vec<Expr>),
    Raw(String),
}

const OPERATORS: [&str; 11] = ["+", "-", "*", "/", "%", "&", "|", "^", "<", ">", ","];
const CALLEES: [&str; 5] = ["abs", "floor", "if", "sum2", "scale"];

impl Expr {
    fn to_code(&self) -> String {
        match self {
            Expr::Literal(n) => n.to_string(),
            Expr::Variable => "x".to_string(),
            Expr::Sign(negative, e) => format!("{}{}", if *negative { "-" } else { "+" }, e.to_code()),
            Expr::Binary(op, lhs, rhs) => format!(
                "({}{}{})",
                lhs.to_code(),
                OPERATORS[*op as usize % OPERATORS.len()],
                rhs.to_code()
            ),
            Expr::Call(callee, args) => format!(
                "{}({})",
                CALLEES[*callee as usize % CALLEES.len()],
                args.iter().map(Expr::to_code).join(", ")
            ),
            Expr::Raw(code) => code.clone(),
        }
    }
}

#[derive(Debug, Clone, Arbitrary)]
struct Context {
    raw_code: Option<String>,
    generated: Option<Expr>,
    x: i64,
}

fn sum2(a: Number, b: Number) -> Number {
    a + b
}

fn scale(context: &dyn std::any::Any, a: Number) -> Number {
    context
        .downcast_ref::<Cell<i64>>()
        .map_or(tie_lang::NAN, |factor| a * Number::new(factor.get()))
}

fuzz_target!(|context: Context| {
    let code = match (&context.raw_code, &context.generated) {
        (Some(raw), _) => raw.clone(),
        (_, Some(generated)) => generated.to_code(),
        _ => "".to_string(),
    };

    let x = Cell::new(context.x);
    let factor = Cell::new(3_i64);
    let bindings = [
        Binding::variable("x", &x),
        Binding::function("sum2", Function::Arity2(sum2)),
        Binding::closure("scale", Closure::Arity1(scale), &factor),
    ];

    let optimized = tie_lang::compile(&code, &bindings);
    let plain = tie_lang::compile_with_options(&code, &bindings, &Options { optimize: false });

    match (optimized, plain) {
        (Ok(optimized), Ok(plain)) => assert_eq!(optimized.eval(), plain.eval()),
        (Err(a), Err(b)) => assert_eq!(a.code(), b.code()),
        (a, b) => panic!("optimizer changed compile outcome: {a:?} vs {b:?}"),
    }
});
