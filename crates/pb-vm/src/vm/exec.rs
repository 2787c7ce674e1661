//! Operator semantics.

use pb_common::{BinaryOp, UnaryOp};
use pb_runtime::Value;

use super::types::VmError;

pub(super) fn expect_number(value: &Value) -> Result<f64, VmError> {
    value.as_number().ok_or(VmError::TypeMismatch {
        expected: "number",
        found: value.type_name(),
    })
}

pub(super) fn expect_bool(value: &Value) -> Result<bool, VmError> {
    value.as_bool().ok_or(VmError::TypeMismatch {
        expected: "boolean",
        found: value.type_name(),
    })
}

fn expect_str(value: &Value) -> Result<&str, VmError> {
    value.as_str().ok_or(VmError::TypeMismatch {
        expected: "string",
        found: value.type_name(),
    })
}

pub(super) fn unary(op: UnaryOp, value: &Value) -> Result<Value, VmError> {
    Ok(match op {
        UnaryOp::Not => Value::Boolean(!expect_bool(value)?),
        UnaryOp::Negate => Value::Number(-expect_number(value)?),
    })
}

pub(super) fn binary(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, VmError> {
    let num = |l: &Value, r: &Value| -> Result<(f64, f64), VmError> { Ok((expect_number(l)?, expect_number(r)?)) };
    let boolean = |l: &Value, r: &Value| -> Result<(bool, bool), VmError> { Ok((expect_bool(l)?, expect_bool(r)?)) };
    Ok(match op {
        BinaryOp::Add => num(left, right).map(|(l, r)| Value::Number(l + r))?,
        BinaryOp::Sub => num(left, right).map(|(l, r)| Value::Number(l - r))?,
        BinaryOp::Mul => num(left, right).map(|(l, r)| Value::Number(l * r))?,
        BinaryOp::Div => num(left, right).map(|(l, r)| Value::Number(l / r))?,
        BinaryOp::Less => num(left, right).map(|(l, r)| Value::Boolean(l < r))?,
        BinaryOp::LessEqual => num(left, right).map(|(l, r)| Value::Boolean(l <= r))?,
        BinaryOp::Greater => num(left, right).map(|(l, r)| Value::Boolean(l > r))?,
        BinaryOp::GreaterEqual => num(left, right).map(|(l, r)| Value::Boolean(l >= r))?,
        BinaryOp::Equal => Value::Boolean(left == right),
        BinaryOp::NotEqual => Value::Boolean(left != right),
        BinaryOp::And => boolean(left, right).map(|(l, r)| Value::Boolean(l && r))?,
        BinaryOp::Or => boolean(left, right).map(|(l, r)| Value::Boolean(l || r))?,
        BinaryOp::Xor => boolean(left, right).map(|(l, r)| Value::Boolean(l != r))?,
        BinaryOp::Concat => return Err(VmError::InvalidOperator(op)),
    })
}

pub(super) fn concat(left: &Value, right: &Value) -> Result<Value, VmError> {
    let (l, r) = (expect_str(left)?, expect_str(right)?);
    let mut out = String::with_capacity(l.len() + r.len());
    out.push_str(l);
    out.push_str(r);
    Ok(Value::from(out))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b(op: BinaryOp, l: impl Into<Value>, r: impl Into<Value>) -> Value {
        binary(op, &l.into(), &r.into()).unwrap()
    }

    #[test]
    fn test_arithmetic_and_comparison() {
        assert_eq!(b(BinaryOp::Sub, 5.0, 3.0), Value::from(2.0));
        assert_eq!(b(BinaryOp::Div, 1.0, 0.0), Value::from(f64::INFINITY));
        assert_eq!(b(BinaryOp::GreaterEqual, 2.0, 2.0), Value::from(true));
        assert_eq!(b(BinaryOp::Equal, "a", "a"), Value::from(true));
        assert_eq!(b(BinaryOp::NotEqual, 1.0, 2.0), Value::from(true));
    }

    #[test]
    fn test_xor_is_exclusive_or() {
        assert_eq!(b(BinaryOp::Xor, true, true), Value::from(false));
        assert_eq!(b(BinaryOp::Xor, true, false), Value::from(true));
        assert_eq!(b(BinaryOp::Xor, false, true), Value::from(true));
        assert_eq!(b(BinaryOp::Xor, false, false), Value::from(false));
    }

    #[test]
    fn test_concat_is_not_a_binary_op() {
        assert_eq!(
            binary(BinaryOp::Concat, &Value::from("a"), &Value::from("b")),
            Err(VmError::InvalidOperator(BinaryOp::Concat))
        );
        assert_eq!(concat(&Value::from("a"), &Value::from("b")), Ok(Value::from("ab")));
    }

    #[test]
    fn test_type_mismatch() {
        assert_eq!(
            unary(UnaryOp::Negate, &Value::from(true)),
            Err(VmError::TypeMismatch {
                expected: "number",
                found: "boolean"
            })
        );
    }
}
