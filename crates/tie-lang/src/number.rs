use std::fmt;
use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Rem, Shl, Shr, Sub};

/// The result of evaluating an expression.
///
/// Integer arithmetic wraps on overflow. Operations that have no integer
/// result produce one of the sentinels: dividing a non-zero value by zero
/// gives an infinity, and indeterminate forms such as `0/0` or `x % 0`
/// give `NaN`. `NaN` is absorbing for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Number {
    Int(i64),
    PosInf,
    NegInf,
    NaN,
}

/// Represents a Not-a-Number (NaN) value.
pub const NAN: Number = Number::NaN;

/// Represents positive infinity.
pub const INFINITE: Number = Number::PosInf;

/// Represents negative infinity.
pub const NEG_INFINITE: Number = Number::NegInf;

pub const ZERO: Number = Number::Int(0);

impl Number {
    /// Creates a new `Number` from an `i64` value.
    pub const fn new(value: i64) -> Self {
        Number::Int(value)
    }

    /// Converts a decimal literal to a `Number`, truncating toward zero.
    ///
    /// Values outside the `i64` range saturate.
    pub fn from_literal(value: f64) -> Self {
        Number::Int(value as i64)
    }

    /// Returns the integer value, or `None` for a sentinel.
    pub fn value(&self) -> Option<i64> {
        match self {
            Number::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_nan(&self) -> bool {
        matches!(self, Number::NaN)
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Number::PosInf | Number::NegInf)
    }

    pub fn is_finite(&self) -> bool {
        matches!(self, Number::Int(_))
    }

    /// Everything except integer zero selects the "then" branch of `if`.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Number::Int(0))
    }

    /// Returns the absolute value of this number.
    pub fn abs(&self) -> Self {
        match self {
            Number::Int(n) => Number::Int(n.wrapping_abs()),
            Number::PosInf | Number::NegInf => Number::PosInf,
            Number::NaN => Number::NaN,
        }
    }

    /// Integers are already whole, so this only passes the value through.
    pub fn floor(&self) -> Self {
        *self
    }

    // Sign of a non-NaN value.
    fn signum(&self) -> i64 {
        match self {
            Number::Int(n) => n.signum(),
            Number::PosInf => 1,
            Number::NegInf => -1,
            Number::NaN => 0,
        }
    }

    fn infinity(sign: i64) -> Self {
        match sign.cmp(&0) {
            std::cmp::Ordering::Greater => Number::PosInf,
            std::cmp::Ordering::Less => Number::NegInf,
            std::cmp::Ordering::Equal => Number::NaN,
        }
    }

    fn bitwise(self, rhs: Self, op: impl FnOnce(i64, i64) -> i64) -> Self {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => Number::Int(op(a, b)),
            _ => Number::NaN,
        }
    }
}

impl Default for Number {
    fn default() -> Self {
        ZERO
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            Number::PosInf => write!(f, "inf"),
            Number::NegInf => write!(f, "-inf"),
            Number::NaN => write!(f, "nan"),
        }
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Int(value)
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Int(value.into())
    }
}

impl From<bool> for Number {
    fn from(value: bool) -> Self {
        Number::Int(value.into())
    }
}

impl Neg for Number {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Number::Int(n) => Number::Int(n.wrapping_neg()),
            Number::PosInf => Number::NegInf,
            Number::NegInf => Number::PosInf,
            Number::NaN => Number::NaN,
        }
    }
}

impl Add for Number {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Number::NaN, _) | (_, Number::NaN) => Number::NaN,
            (Number::Int(a), Number::Int(b)) => Number::Int(a.wrapping_add(b)),
            (Number::PosInf, Number::NegInf) | (Number::NegInf, Number::PosInf) => Number::NaN,
            (Number::PosInf, _) | (_, Number::PosInf) => Number::PosInf,
            (Number::NegInf, _) | (_, Number::NegInf) => Number::NegInf,
        }
    }
}

impl Sub for Number {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => Number::Int(a.wrapping_sub(b)),
            _ => self + -rhs,
        }
    }
}

impl Mul for Number {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Number::NaN, _) | (_, Number::NaN) => Number::NaN,
            (Number::Int(a), Number::Int(b)) => Number::Int(a.wrapping_mul(b)),
            _ => Number::infinity(self.signum() * rhs.signum()),
        }
    }
}

impl Div for Number {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Number::NaN, _) | (_, Number::NaN) => Number::NaN,
            (Number::Int(a), Number::Int(0)) => Number::infinity(a.signum()),
            (Number::Int(a), Number::Int(b)) => Number::Int(a.wrapping_div(b)),
            (Number::Int(_), _) => ZERO,
            (_, Number::Int(0)) => self,
            (_, Number::Int(b)) => Number::infinity(self.signum() * b.signum()),
            _ => Number::NaN,
        }
    }
}

impl Rem for Number {
    type Output = Self;

    fn rem(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Number::Int(_), Number::Int(0)) => Number::NaN,
            (Number::Int(a), Number::Int(b)) => Number::Int(a.wrapping_rem(b)),
            (Number::Int(_), Number::PosInf | Number::NegInf) => self,
            _ => Number::NaN,
        }
    }
}

impl BitAnd for Number {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.bitwise(rhs, |a, b| a & b)
    }
}

impl BitOr for Number {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.bitwise(rhs, |a, b| a | b)
    }
}

impl BitXor for Number {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self::Output {
        self.bitwise(rhs, |a, b| a ^ b)
    }
}

// Shift amounts wrap modulo the bit width.
impl Shl for Number {
    type Output = Self;

    fn shl(self, rhs: Self) -> Self::Output {
        self.bitwise(rhs, |a, b| a.wrapping_shl(b as u32))
    }
}

impl Shr for Number {
    type Output = Self;

    fn shr(self, rhs: Self) -> Self::Output {
        self.bitwise(rhs, |a, b| a.wrapping_shr(b as u32))
    }
}
