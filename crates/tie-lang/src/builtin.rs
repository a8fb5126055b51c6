use crate::binding::Function;
use crate::number::Number;

#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub function: Function,
}

/// Builtin functions, sorted by name for binary search.
pub const BUILTINS: &[Builtin] = &[
    Builtin {
        name: "abs",
        function: Function::Arity1(abs),
    },
    Builtin {
        name: "floor",
        function: Function::Arity1(floor),
    },
    Builtin {
        name: "if",
        function: Function::Arity3(if_),
    },
];

const _: () = assert!(is_sorted(BUILTINS), "BUILTINS must be sorted by name");

const fn is_sorted(builtins: &[Builtin]) -> bool {
    let mut i = 1;
    while i < builtins.len() {
        if !str_less_than(builtins[i - 1].name, builtins[i].name) {
            return false;
        }
        i += 1;
    }
    true
}

// Byte-wise ordering, the same as `str::cmp`.
const fn str_less_than(a: &str, b: &str) -> bool {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut i = 0;
    while i < a.len() && i < b.len() {
        if a[i] != b[i] {
            return a[i] < b[i];
        }
        i += 1;
    }
    a.len() < b.len()
}

pub fn lookup(name: &str) -> Option<&'static Builtin> {
    BUILTINS
        .binary_search_by(|builtin| builtin.name.cmp(name))
        .ok()
        .map(|index| &BUILTINS[index])
}

pub fn abs(a: Number) -> Number {
    a.abs()
}

pub fn floor(a: Number) -> Number {
    a.floor()
}

pub fn if_(condition: Number, then: Number, otherwise: Number) -> Number {
    if condition.is_truthy() { then } else { otherwise }
}

pub fn add(a: Number, b: Number) -> Number {
    a + b
}

pub fn sub(a: Number, b: Number) -> Number {
    a - b
}

pub fn mul(a: Number, b: Number) -> Number {
    a * b
}

pub fn div(a: Number, b: Number) -> Number {
    a / b
}

pub fn rem(a: Number, b: Number) -> Number {
    a % b
}

pub fn negate(a: Number) -> Number {
    -a
}

pub fn shift_left(a: Number, b: Number) -> Number {
    a << b
}

pub fn shift_right(a: Number, b: Number) -> Number {
    a >> b
}

pub fn bitwise_and(a: Number, b: Number) -> Number {
    a & b
}

pub fn bitwise_or(a: Number, b: Number) -> Number {
    a | b
}

pub fn bitwise_xor(a: Number, b: Number) -> Number {
    a ^ b
}

/// `a, b` evaluates both operands and yields the right one.
pub fn comma(_: Number, b: Number) -> Number {
    b
}
