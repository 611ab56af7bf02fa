//! Unary operation evaluation

use crate::error::{type_name, EvalError, Result};
use crate::value::Value;

/// Evaluate unary minus (`-x`). Defined for numbers only.
pub(crate) fn eval_neg(operand: Value) -> Result<Value> {
    match operand {
        Value::Num(n) => Ok(Value::Num(n.neg())),
        other => Err(EvalError::InvalidUnaryOperand {
            op: "-".to_string(),
            operand_type: type_name(&other).to_string(),
        }),
    }
}

/// Evaluate logical negation (`not x` / `!x`). Defined for booleans only.
pub(crate) fn eval_not(operand: Value) -> Result<Value> {
    match operand {
        Value::Bool(b) => Ok(Value::Bool(!b)),
        other => Err(EvalError::InvalidUnaryOperand {
            op: "not".to_string(),
            operand_type: type_name(&other).to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;

    #[test]
    fn test_neg_int() {
        let result = eval_neg(Value::int(42)).unwrap();
        assert_eq!(result, Value::int(-42));
    }

    #[test]
    fn test_neg_float() {
        let result = eval_neg(Value::float(2.5)).unwrap();
        assert_eq!(result, Value::Num(Number::Float(-2.5)));
    }

    #[test]
    fn test_neg_string_fails() {
        let result = eval_neg(Value::string("test"));
        assert!(matches!(
            result.unwrap_err(),
            EvalError::InvalidUnaryOperand { .. }
        ));
    }

    #[test]
    fn test_not_bool() {
        let result = eval_not(Value::Bool(true)).unwrap();
        assert_eq!(result, Value::Bool(false));
    }

    #[test]
    fn test_not_number_fails() {
        let result = eval_not(Value::int(1));
        assert!(matches!(
            result.unwrap_err(),
            EvalError::InvalidUnaryOperand { .. }
        ));
    }
}
