//! Value representation for runtime values

mod display;
mod impls;

use std::sync::Arc;

/// Runtime value for the typeval evaluator.
///
/// Every datum flowing through the evaluator is one of these five
/// variants. A value is immutable once constructed; heap payloads are
/// Arc-wrapped so cloning is cheap.
#[derive(Clone, PartialEq)]
pub enum Value {
    /// Placeholder with no concrete type yet.
    ///
    /// Exists only until unified with a concrete operand (autodefine
    /// mode) or overwritten by an assignment.
    Unknown,

    /// Text value
    Str(Arc<String>),

    /// Numeric value, normalized per [`Number`]
    Num(Number),

    /// Boolean: `true` or `false`
    Bool(bool),

    /// Ordered, heterogeneous sequence of values
    List(Arc<Vec<Value>>),
}

/// The variant tag of a [`Value`], without its payload.
///
/// Used for type checks at operator sites and for unification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// No concrete type yet
    Unknown,
    /// Text
    Str,
    /// Number
    Num,
    /// Boolean
    Bool,
    /// List
    List,
}

/// Normalized numeric payload.
///
/// A number whose decimal value has a fractional part of exactly zero is
/// always stored as `Int`, so `4.0` and `4` are the same value. `Float`
/// therefore never carries a whole number.
#[derive(Clone, Copy, Debug)]
pub enum Number {
    /// Whole number
    Int(i64),
    /// Number with a nonzero fractional part
    Float(f64),
}

impl Number {
    /// Build a number from a float, collapsing whole values to `Int`.
    pub fn from_f64(f: f64) -> Self {
        if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
            Number::Int(f as i64)
        } else {
            Number::Float(f)
        }
    }

    /// The numeric value as a float, whatever the representation.
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Int(n) => *n as f64,
            Number::Float(f) => *f,
        }
    }

    /// True for exactly zero.
    pub fn is_zero(&self) -> bool {
        matches!(self, Number::Int(0)) || matches!(self, Number::Float(f) if *f == 0.0)
    }

    /// Multiply by a whole factor (binary-unit suffixes).
    ///
    /// Integer multiplication that would overflow falls back to the
    /// float representation.
    pub fn scale(self, factor: i64) -> Self {
        match self {
            Number::Int(n) => match n.checked_mul(factor) {
                Some(m) => Number::Int(m),
                None => Number::from_f64(n as f64 * factor as f64),
            },
            Number::Float(f) => Number::from_f64(f * factor as f64),
        }
    }

    /// Negate, preserving the representation.
    pub fn neg(self) -> Self {
        match self {
            Number::Int(n) => match n.checked_neg() {
                Some(m) => Number::Int(m),
                None => Number::from_f64(-(n as f64)),
            },
            Number::Float(f) => Number::Float(-f),
        }
    }

    /// Addition over the normalized representation.
    pub fn add(self, other: Number) -> Self {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => match a.checked_add(b) {
                Some(n) => Number::Int(n),
                None => Number::from_f64(a as f64 + b as f64),
            },
            (a, b) => Number::from_f64(a.as_f64() + b.as_f64()),
        }
    }

    /// Subtraction over the normalized representation.
    pub fn sub(self, other: Number) -> Self {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => match a.checked_sub(b) {
                Some(n) => Number::Int(n),
                None => Number::from_f64(a as f64 - b as f64),
            },
            (a, b) => Number::from_f64(a.as_f64() - b.as_f64()),
        }
    }

    /// Multiplication over the normalized representation.
    pub fn mul(self, other: Number) -> Self {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => match a.checked_mul(b) {
                Some(n) => Number::Int(n),
                None => Number::from_f64(a as f64 * b as f64),
            },
            (a, b) => Number::from_f64(a.as_f64() * b.as_f64()),
        }
    }

    /// Division over the normalized representation.
    ///
    /// Exact integer quotients stay `Int`; everything else is the float
    /// quotient, re-normalized. The caller is responsible for rejecting
    /// a zero divisor first.
    pub fn div(self, other: Number) -> Self {
        if let (Number::Int(a), Number::Int(b)) = (self, other) {
            if b != 0 {
                if let (Some(0), Some(q)) = (a.checked_rem(b), a.checked_div(b)) {
                    return Number::Int(q);
                }
            }
        }
        Number::from_f64(self.as_f64() / other.as_f64())
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            // Normalization keeps whole values out of Float, so a cross
            // comparison can only succeed through the float view.
            (a, b) => a.as_f64() == b.as_f64(),
        }
    }
}
