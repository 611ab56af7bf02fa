//! Binary operation evaluation
//!
//! Operands are evaluated first; in autodefine mode an `Unknown`
//! operand is unified with the opposing concrete type before the
//! operator applies, and when the `Unknown` came from an identifier the
//! environment entry is rewritten so later statements observe the
//! concrete type.

use crate::environment::Environment;
use crate::error::{type_name, EvalError, Result};
use crate::value::Value;

use super::{BinaryOp, Evaluate, Expr};

/// Resolve an `Unknown` operand's type by adopting the type of the
/// opposing concrete operand, substituting the type-appropriate zero
/// value (`""`, `0`, `false`, `[]`). Concrete pairs pass through
/// unchanged, as do two `Unknown`s.
pub fn unify(left: Value, right: Value) -> (Value, Value) {
    match (left.is_unknown(), right.is_unknown()) {
        (true, false) => (right.kind().zero(), right),
        (false, true) => {
            let zero = left.kind().zero();
            (left, zero)
        }
        _ => (left, right),
    }
}

/// Evaluate an operand, remembering which identifier it came from so a
/// unification can be written back to the environment.
fn eval_operand<'e>(
    expr: &'e Expr,
    env: &mut Environment,
    autodefine: bool,
) -> Result<(Value, Option<&'e str>)> {
    match expr {
        Expr::Ident(name) => Ok((expr.eval(env, autodefine)?, Some(name.as_str()))),
        _ => Ok((expr.eval(env, autodefine)?, None)),
    }
}

/// Persist a unified value over the identifier it was read from.
fn persist(env: &mut Environment, name: Option<&str>, value: &Value) {
    if let Some(name) = name {
        env.set(name, value.clone());
    }
}

pub(crate) fn eval_binary(
    op: BinaryOp,
    left: &Expr,
    right: &Expr,
    env: &mut Environment,
    autodefine: bool,
) -> Result<Value> {
    let (mut l, l_name) = eval_operand(left, env, autodefine)?;
    let (mut r, r_name) = eval_operand(right, env, autodefine)?;

    if autodefine {
        match op {
            // The right side of a membership test always unifies
            // against a list, whatever the left side's type is.
            BinaryOp::In | BinaryOp::Subset => {
                if r.is_unknown() {
                    r = Value::empty_list();
                    persist(env, r_name, &r);
                }
            }
            _ => {
                let l_was_unknown = l.is_unknown();
                let r_was_unknown = r.is_unknown();
                let (l2, r2) = unify(l, r);
                l = l2;
                r = r2;
                if l_was_unknown && !l.is_unknown() {
                    persist(env, l_name, &l);
                }
                if r_was_unknown && !r.is_unknown() {
                    persist(env, r_name, &r);
                }
            }
        }
    }

    apply(op, l, r)
}

/// Type error for a binary operator over the given operands.
fn invalid(op: BinaryOp, left: &Value, right: &Value) -> EvalError {
    EvalError::InvalidBinaryOperands {
        op: op.symbol().to_string(),
        left_type: type_name(left).to_string(),
        right_type: type_name(right).to_string(),
    }
}

/// Apply a binary operator to two already-unified operands.
fn apply(op: BinaryOp, left: Value, right: Value) -> Result<Value> {
    match op {
        BinaryOp::Add => eval_add(left, right),
        BinaryOp::Sub | BinaryOp::Mul => match (&left, &right) {
            (Value::Num(a), Value::Num(b)) => Ok(Value::Num(if op == BinaryOp::Sub {
                a.sub(*b)
            } else {
                a.mul(*b)
            })),
            _ => Err(invalid(op, &left, &right)),
        },
        BinaryOp::Div => match (&left, &right) {
            (Value::Num(a), Value::Num(b)) => {
                if b.is_zero() {
                    return Err(EvalError::DivisionByZero);
                }
                Ok(Value::Num(a.div(*b)))
            }
            _ => Err(invalid(op, &left, &right)),
        },
        BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => match (&left, &right) {
            (Value::Num(a), Value::Num(b)) => {
                let (a, b) = (a.as_f64(), b.as_f64());
                Ok(Value::Bool(match op {
                    BinaryOp::Lt => a < b,
                    BinaryOp::Le => a <= b,
                    BinaryOp::Gt => a > b,
                    _ => a >= b,
                }))
            }
            _ => Err(invalid(op, &left, &right)),
        },
        BinaryOp::Eq | BinaryOp::Ne => {
            // Equality requires matching variants; the comparison itself
            // is structural (lists element-wise, in order).
            if left.kind() != right.kind() {
                return Err(invalid(op, &left, &right));
            }
            let equal = left == right;
            Ok(Value::Bool(if op == BinaryOp::Eq { equal } else { !equal }))
        }
        BinaryOp::And | BinaryOp::Or => match (&left, &right) {
            (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(if op == BinaryOp::And {
                *a && *b
            } else {
                *a || *b
            })),
            _ => Err(invalid(op, &left, &right)),
        },
        BinaryOp::In => match &right {
            Value::List(items) => Ok(Value::Bool(items.iter().any(|item| *item == left))),
            _ => Err(invalid(op, &left, &right)),
        },
        BinaryOp::Subset => match (&left, &right) {
            (Value::List(subset), Value::List(superset)) => Ok(Value::Bool(
                subset
                    .iter()
                    .all(|needle| superset.iter().any(|item| item == needle)),
            )),
            _ => Err(invalid(op, &left, &right)),
        },
    }
}

/// `+` is overloaded: numeric sum, string concatenation, and list
/// concatenation (order preserved).
fn eval_add(left: Value, right: Value) -> Result<Value> {
    match (&left, &right) {
        (Value::Num(a), Value::Num(b)) => Ok(Value::Num(a.add(*b))),
        (Value::Str(a), Value::Str(b)) => Ok(Value::string(format!("{}{}", a, b))),
        (Value::List(a), Value::List(b)) => {
            let mut items = a.as_ref().clone();
            items.extend(b.iter().cloned());
            Ok(Value::list(items))
        }
        _ => Err(invalid(BinaryOp::Add, &left, &right)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unify_adopts_concrete_type() {
        let (l, r) = unify(Value::Unknown, Value::int(4));
        assert_eq!(l, Value::int(0));
        assert_eq!(r, Value::int(4));

        let (l, r) = unify(Value::string("x"), Value::Unknown);
        assert_eq!(l, Value::string("x"));
        assert_eq!(r, Value::string(""));

        let (l, r) = unify(Value::Unknown, Value::empty_list());
        assert_eq!(l, Value::empty_list());
        assert_eq!(r, Value::empty_list());
    }

    #[test]
    fn test_unify_leaves_concrete_pairs_alone() {
        let (l, r) = unify(Value::int(1), Value::Bool(true));
        assert_eq!(l, Value::int(1));
        assert_eq!(r, Value::Bool(true));
    }

    #[test]
    fn test_add_concatenates_lists() {
        let l = Value::list(vec![Value::int(1)]);
        let r = Value::list(vec![Value::int(2), Value::int(3)]);
        assert_eq!(
            eval_add(l, r).unwrap(),
            Value::list(vec![Value::int(1), Value::int(2), Value::int(3)])
        );
    }

    #[test]
    fn test_add_rejects_mixed_types() {
        let err = eval_add(Value::int(1), Value::string("a")).unwrap_err();
        assert!(matches!(err, EvalError::InvalidBinaryOperands { .. }));
    }

    #[test]
    fn test_division_by_zero() {
        let err = apply(BinaryOp::Div, Value::int(1), Value::int(0)).unwrap_err();
        assert_eq!(err, EvalError::DivisionByZero);
    }

    #[test]
    fn test_equality_requires_matching_variants() {
        let err = apply(BinaryOp::Eq, Value::int(1), Value::string("1")).unwrap_err();
        assert!(matches!(err, EvalError::InvalidBinaryOperands { .. }));
    }
}
