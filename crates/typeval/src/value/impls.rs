//! Value trait implementations: constructors, predicates, extractors, From traits

use std::sync::Arc;

use super::*;

// ═══════════════════════════════════════════════════════════════════
// Convenience Constructors
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Create a string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Arc::new(s.into()))
    }

    /// Create a number value from an integer
    pub fn int(n: i64) -> Self {
        Value::Num(Number::Int(n))
    }

    /// Create a number value from a float, normalizing whole values
    pub fn float(f: f64) -> Self {
        Value::Num(Number::from_f64(f))
    }

    /// Create a list value
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Arc::new(items))
    }

    /// The empty list
    pub fn empty_list() -> Self {
        Value::List(Arc::new(Vec::new()))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Kind and Type Predicates
    // ═══════════════════════════════════════════════════════════════════

    /// The variant tag of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Unknown => ValueKind::Unknown,
            Value::Str(_) => ValueKind::Str,
            Value::Num(_) => ValueKind::Num,
            Value::Bool(_) => ValueKind::Bool,
            Value::List(_) => ValueKind::List,
        }
    }

    /// Check if value has no concrete type yet
    pub fn is_unknown(&self) -> bool {
        matches!(self, Value::Unknown)
    }

    /// Check if value is a string
    pub fn is_str(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    /// Check if value is a number
    pub fn is_num(&self) -> bool {
        matches!(self, Value::Num(_))
    }

    /// Check if value is a boolean
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Check if value is a list
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Extractors (return Option for safe access)
    // ═══════════════════════════════════════════════════════════════════

    /// Extract the bare text of a string value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Extract boolean value
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract as i64 (whole numbers only)
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Num(Number::Int(n)) => Some(*n),
            _ => None,
        }
    }

    /// Extract as f64 (any number)
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Num(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    /// Extract the elements of a list value
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// Unification Support
// ═══════════════════════════════════════════════════════════════════

impl ValueKind {
    /// The type-appropriate zero value adopted by an `Unknown` operand
    /// when it unifies with this kind.
    pub fn zero(self) -> Value {
        match self {
            ValueKind::Unknown => Value::Unknown,
            ValueKind::Str => Value::string(""),
            ValueKind::Num => Value::int(0),
            ValueKind::Bool => Value::Bool(false),
            ValueKind::List => Value::empty_list(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// From Conversions
// ═══════════════════════════════════════════════════════════════════

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Value::Num(n)
    }
}
