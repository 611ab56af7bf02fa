//! Error types for typeval decoding and evaluation

use thiserror::Error;

use crate::value::Value;

/// Main error type for typeval operations.
///
/// Every failure aborts the current `evaluate`/`decode_*` call and is
/// returned to the caller; nothing is retried internally. Environment
/// mutations performed by statements that already ran are kept (see the
/// crate docs on non-transactional behavior).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Unrecognized character while tokenizing; aborts the remaining input
    #[error("unrecognized character {ch:?} at position {pos}")]
    LexicalError {
        /// The offending character
        ch: char,
        /// Byte offset into the expression text
        pos: usize,
    },

    /// Token sequence does not match any grammar rule
    #[error("error in expression near {token:?} (position: {pos}) (expression: {expr})")]
    SyntaxError {
        /// Rendered text of the offending token
        token: String,
        /// Byte offset of the offending token
        pos: usize,
        /// The full expression being evaluated
        expr: String,
    },

    /// Binary operator applied to incompatible operand types
    #[error("type error: operator {op} not defined for {left_type} and {right_type}")]
    InvalidBinaryOperands {
        /// The operator symbol
        op: String,
        /// Type name of the left operand
        left_type: String,
        /// Type name of the right operand
        right_type: String,
    },

    /// Unary operator applied to the wrong operand type
    #[error("type error: operator {op} not defined for {operand_type}")]
    InvalidUnaryOperand {
        /// The operator symbol
        op: String,
        /// Type name of the operand
        operand_type: String,
    },

    /// Identifier lookup failure in strict mode
    #[error("undefined variable: {name}")]
    UndefinedVariable {
        /// The unresolved identifier
        name: String,
    },

    /// Malformed `key=value;` record text
    #[error("malformed record near {rest:?}")]
    MalformedRecord {
        /// The trailing text that did not match the record structure
        rest: String,
    },

    /// Division by a zero number operand
    #[error("division by zero")]
    DivisionByZero,
}

/// Result type alias for typeval operations
pub type Result<T> = std::result::Result<T, EvalError>;

/// Get a human-readable name for a value's type (for error messages).
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Unknown => "unknown",
        Value::Str(_) => "string",
        Value::Num(_) => "number",
        Value::Bool(_) => "boolean",
        Value::List(_) => "list",
    }
}
