//! Display and Debug implementations for Value

use std::fmt;

use super::*;

/// Wrap text in double quotes, escaping embedded quotes and backslashes.
///
/// This is the canonical rendering of string values, so that the
/// auto-typing decoder reads the text back unchanged wherever it
/// appears (standalone, in a list literal, or in an encoded record).
fn quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

impl fmt::Display for Value {
    /// The canonical printable form.
    ///
    /// For String, Number, Boolean and List values this round-trips
    /// through [`decode_value`](crate::decode_value): strings render
    /// quoted so text that looks like a number or boolean (`"4"`,
    /// `"true"`) decodes back as the same string. `Unknown` has no
    /// printable payload and renders as the empty string. Plain
    /// un-quoted access to string text is [`Value::as_str`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unknown => Ok(()),
            Value::Str(s) => write!(f, "{}", quoted(s)),
            Value::Num(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unknown => write!(f, "unknown"),
            Value::Str(s) => write!(f, "{:?}", s.as_ref()),
            Value::Num(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(n) => write!(f, "{}", n),
            Number::Float(x) => write!(f, "{}", x),
        }
    }
}
