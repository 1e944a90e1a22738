//! Operator implementations.
//!
//! Each operator checks its operands for errors first (left, then right),
//! then dispatches on the operand types. Unsupported combinations produce
//! an error value listing the accepted overloads and naming the operand
//! that did not fit.

use crate::ast::OperatorKind;
use crate::environment::Environment;
use crate::matrix::Matrix;
use crate::value::{RangeBound, RangeValue, Value};

/// Applies `op` to evaluated operands. Assignment writes into `env`.
///
/// # Examples
///
/// ```
/// use ptms_lang::{Environment, Value};
/// use ptms_lang::ast::OperatorKind;
/// use ptms_lang::operators::apply;
///
/// let mut env = Environment::new();
/// let sum = apply(OperatorKind::Plus, Value::Number(2.0), Value::Number(3.0), &mut env);
/// assert_eq!(sum, Value::Number(5.0));
///
/// let err = Value::error("boom");
/// assert_eq!(apply(OperatorKind::Plus, err.clone(), Value::Number(1.0), &mut env), err);
/// ```
pub fn apply(op: OperatorKind, left: Value, right: Value, env: &mut Environment) -> Value {
    let (left, right) = match (left, right) {
        (Value::Error(e), _) | (_, Value::Error(e)) => return Value::Error(e),
        operands => operands,
    };

    tracing::trace!(op = op.symbol(), left = left.type_name(), right = right.type_name(), "apply operator");
    match op {
        OperatorKind::Plus => arithmetic(op, left, right, |a, b| a + b),
        OperatorKind::Minus => arithmetic(op, left, right, |a, b| a - b),
        OperatorKind::Times => arithmetic(op, left, right, |a, b| a * b),
        OperatorKind::Divide => arithmetic(op, left, right, |a, b| a / b),
        OperatorKind::Mod => arithmetic(op, left, right, |a, b| a % b),
        OperatorKind::Power => power(left, right),
        OperatorKind::Range => range(left, right),
        OperatorKind::Equal => compare(op, left, right, |a, b| a == b),
        OperatorKind::NotEqual => compare(op, left, right, |a, b| a != b),
        OperatorKind::GreaterThan => compare(op, left, right, |a, b| a > b),
        OperatorKind::GreaterThanOrEqual => compare(op, left, right, |a, b| a >= b),
        OperatorKind::LessThan => compare(op, left, right, |a, b| a < b),
        OperatorKind::LessThanOrEqual => compare(op, left, right, |a, b| a <= b),
        OperatorKind::Assign => assign(left, right, env),
    }
}

#[derive(Clone, Copy)]
enum Operand {
    First,
    Second,
}

impl Operand {
    fn name(self) -> &'static str {
        match self {
            Operand::First => "first",
            Operand::Second => "second",
        }
    }
}

fn type_error(op: OperatorKind, overloads: &str, operand: Operand, value: &Value) -> Value {
    Value::error(format!(
        "Type Error: Operator '{}' accepts {}. However, the {} argument received is '{}' which is neither of those.",
        op,
        overloads,
        operand.name(),
        value
    ))
}

fn shape_error(op: OperatorKind, a: &Matrix, b: &Matrix) -> Value {
    Value::error(format!(
        "Shape Error: Operator '{op}' (Overload [Mat] {sym} [Mat]) the first item '{a}' and the second item '{b}' should have the identical size and channel.",
        sym = op.symbol(),
    ))
}

fn arithmetic(op: OperatorKind, left: Value, right: Value, f: impl Fn(f64, f64) -> f64) -> Value {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Value::Number(f(a, b)),
        (Value::Number(a), Value::Matrix(m)) => Value::Matrix(m.map(|b| f(a, b))),
        (Value::Matrix(m), Value::Number(b)) => Value::Matrix(m.map(|a| f(a, b))),
        (Value::Matrix(a), Value::Matrix(b)) if a.same_shape(&b) => Value::Matrix(a.zip_map(&b, f)),
        (Value::Matrix(a), Value::Matrix(b)) => shape_error(op, &a, &b),
        (Value::Number(_) | Value::Matrix(_), right) => {
            type_error(op, &arithmetic_overloads(op), Operand::Second, &right)
        }
        (left, _) => type_error(op, &arithmetic_overloads(op), Operand::First, &left),
    }
}

fn arithmetic_overloads(op: OperatorKind) -> String {
    format!("[Number/Mat] {} [Number/Mat]", op.symbol())
}

const POWER_OVERLOADS: &str = "[Number] ^ [Number], [Mat] ^ [Number] or ^[Number]";

fn power(left: Value, right: Value) -> Value {
    let op = OperatorKind::Power;
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Value::Number(a.powf(b)),
        (Value::Matrix(m), Value::Number(b)) => Value::Matrix(m.map(|a| a.powf(b))),
        (Value::Nothing, Value::Number(b)) if b >= 0.0 => Value::Number(-b),
        (Value::Nothing, Value::Number(b)) => Value::error(format!(
            "Out Of Range Error: Operator '{op}' used as a prefix (^n means -n) expects a non-negative number, but got '{b}'."
        )),
        (Value::Number(_) | Value::Matrix(_) | Value::Nothing, right) => {
            type_error(op, POWER_OVERLOADS, Operand::Second, &right)
        }
        (left, _) => type_error(op, POWER_OVERLOADS, Operand::First, &left),
    }
}

fn range(left: Value, right: Value) -> Value {
    let start = match range_bound(&left, Operand::First) {
        Ok(bound) => bound,
        Err(e) => return e,
    };
    let end = match range_bound(&right, Operand::Second) {
        Ok(bound) => bound,
        Err(e) => return e,
    };
    Value::Range(RangeValue::new(start, end))
}

fn range_bound(value: &Value, operand: Operand) -> Result<RangeBound, Value> {
    let op = OperatorKind::Range;
    match value {
        Value::Nothing => Ok(RangeBound::Open),
        Value::Number(n) => RangeBound::from_number(*n).ok_or_else(|| {
            Value::error(format!(
                "Out Of Range Error: Operator '{op}', the {} argument '{n}' is not a valid index.",
                operand.name()
            ))
        }),
        other => Err(type_error(op, "[Number/Nothing] .. [Number/Nothing]", operand, other)),
    }
}

fn compare(op: OperatorKind, left: Value, right: Value, test: fn(f64, f64) -> bool) -> Value {
    let overloads = format!(
        "[Number] {0} [Number] -> [Boolean], [Mat] {0} [Mat] -> [Mask Mat] or [Mat] {0} [Number] -> [Mask Mat]",
        op.symbol()
    );
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Value::Boolean(test(a, b)),
        (Value::Matrix(m), Value::Number(b)) => Value::Matrix(m.mask_where(|a| test(a, b))),
        (Value::Matrix(a), Value::Matrix(b)) if a.same_shape(&b) => Value::Matrix(a.mask_zip(&b, test)),
        (Value::Matrix(a), Value::Matrix(b)) => shape_error(op, &a, &b),
        (Value::Number(_) | Value::Matrix(_), right) => type_error(op, &overloads, Operand::Second, &right),
        (left, _) => type_error(op, &overloads, Operand::First, &left),
    }
}

fn assign(left: Value, right: Value, env: &mut Environment) -> Value {
    match left {
        Value::VariableReference(name) => {
            env.set_variable(name, right.clone());
            right
        }
        other => Value::error(format!(
            "Type Error: Operator '=' accepts [VariableNameReference] = [Any]. However, the first argument received is '{}' which is not [VariableNameReference].",
            other
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::MatrixType;

    fn run(op: OperatorKind, left: Value, right: Value) -> Value {
        apply(op, left, right, &mut Environment::new())
    }

    #[test]
    fn test_left_error_wins() {
        let result = run(OperatorKind::Times, Value::error("left"), Value::error("right"));
        assert_eq!(result, Value::error("left"));
    }

    #[test]
    fn test_prefix_power_negates() {
        assert_eq!(run(OperatorKind::Power, Value::Nothing, Value::Number(5.0)), Value::Number(-5.0));
        assert!(run(OperatorKind::Power, Value::Nothing, Value::Number(-5.0)).is_error());
    }

    #[test]
    fn test_matrix_mod_broadcasts() {
        let m = Matrix::filled(MatrixType::Gray, 2, 2, 1, 7.0).unwrap();
        let Value::Matrix(result) = run(OperatorKind::Mod, Value::Matrix(m), Value::Number(4.0)) else {
            panic!("expected a matrix");
        };
        assert_eq!(result.kind(), MatrixType::Matrix);
        assert!(result.data().iter().all(|&v| v == 3.0));
    }

    #[test]
    fn test_range_type_error_names_operand() {
        let result = run(OperatorKind::Range, Value::Number(1.0), Value::Boolean(true));
        let Value::Error(message) = result else {
            panic!("expected an error");
        };
        assert!(message.contains("second argument"), "{message}");
    }
}
