use super::Signature;
use crate::matrix::Matrix;
use crate::value::Value;

const ABS: Signature = Signature {
    overloads: &["[Number] Abs([Number] value)", "[Mat] Abs([Mat] value)"],
    arity: "1",
};

pub(super) fn abs(args: Vec<Value>) -> Result<Value, Value> {
    let [value] = ABS.arguments(args)?;
    match value {
        Value::Number(n) => Ok(Value::Number(n.abs())),
        Value::Matrix(m) => Ok(Value::Matrix(m.map(f64::abs))),
        other => Err(ABS.type_error("value", &other, "[Number/Mat]")),
    }
}

const CLAMP: Signature = Signature {
    overloads: &[
        "[Number] Clamp([Number] value, [Number] lowerBound, [Number] upperBound)",
        "[Mat] Clamp([Mat] value, [Number] lowerBound, [Number] upperBound)",
        "[Mat] Clamp([Mat] value, [Mat] lowerBound, [Mat] upperBound)",
    ],
    arity: "3",
};

pub(super) fn clamp(args: Vec<Value>) -> Result<Value, Value> {
    let [value, lower, upper] = CLAMP.arguments(args)?;
    match (value, lower, upper) {
        (Value::Number(n), Value::Number(lo), Value::Number(hi)) => {
            check_bounds(lo, hi)?;
            Ok(Value::Number(n.max(lo).min(hi)))
        }
        (Value::Matrix(m), Value::Number(lo), Value::Number(hi)) => {
            check_bounds(lo, hi)?;
            Ok(Value::Matrix(m.map(|v| v.max(lo).min(hi))))
        }
        (Value::Matrix(m), Value::Matrix(lo), Value::Matrix(hi)) => {
            for (name, bound) in [("lowerBound", &lo), ("upperBound", &hi)] {
                if !m.same_shape(bound) {
                    return Err(CLAMP.error(
                        "Shape",
                        format!("{} '{}' should have the same size and channels as value '{}'", name, bound, m),
                    ));
                }
            }
            Ok(Value::Matrix(m.zip_map(&lo, f64::max).zip_map(&hi, f64::min)))
        }
        (Value::Number(_), Value::Number(_), upper) => {
            Err(CLAMP.type_error("upperBound", &upper, "[Number]"))
        }
        (Value::Number(_), lower, _) => Err(CLAMP.type_error("lowerBound", &lower, "[Number]")),
        (Value::Matrix(_), Value::Number(_), upper) => {
            Err(CLAMP.type_error("upperBound", &upper, "[Number]"))
        }
        (Value::Matrix(_), Value::Matrix(_), upper) => {
            Err(CLAMP.type_error("upperBound", &upper, "[Mat]"))
        }
        (Value::Matrix(_), lower, _) => Err(CLAMP.type_error("lowerBound", &lower, "[Number/Mat]")),
        (value, _, _) => Err(CLAMP.type_error("value", &value, "[Number/Mat]")),
    }
}

fn check_bounds(lo: f64, hi: f64) -> Result<(), Value> {
    if lo > hi {
        return Err(CLAMP.error(
            "Out Of Range",
            format!("lowerBound '{}' should not be greater than upperBound '{}'", lo, hi),
        ));
    }
    Ok(())
}

const MIN: Signature = Signature {
    overloads: &[
        "[Number] Min([Number] values...)",
        "[Number] Min([Mat] value)",
        "[Mat] Min([Mat] values...)",
    ],
    arity: "1 or more",
};

const MAX: Signature = Signature {
    overloads: &[
        "[Number] Max([Number] values...)",
        "[Number] Max([Mat] value)",
        "[Mat] Max([Mat] values...)",
    ],
    arity: "1 or more",
};

pub(super) fn min(args: Vec<Value>) -> Result<Value, Value> {
    extreme(&MIN, args, f64::min, Matrix::min_value)
}

pub(super) fn max(args: Vec<Value>) -> Result<Value, Value> {
    extreme(&MAX, args, f64::max, Matrix::max_value)
}

/// Shared body of `Min` and `Max`. All arguments must be numbers, or all
/// matrices of one shape. A lone matrix reduces to its extreme element.
fn extreme(
    signature: &Signature,
    args: Vec<Value>,
    pick: fn(f64, f64) -> f64,
    reduce: fn(&Matrix) -> f64,
) -> Result<Value, Value> {
    let mut args = args.into_iter();
    let Some(first) = args.next() else {
        return Err(signature.arity_error(0));
    };

    match first {
        Value::Number(mut acc) => {
            for arg in args {
                match arg {
                    Value::Number(n) => acc = pick(acc, n),
                    other => return Err(signature.type_error("value", &other, "[Number]")),
                }
            }
            Ok(Value::Number(acc))
        }
        Value::Matrix(first) => {
            let rest: Vec<Value> = args.collect();
            if rest.is_empty() {
                return Ok(Value::Number(reduce(&first)));
            }
            let mut acc = first;
            for arg in rest {
                match arg {
                    Value::Matrix(m) if acc.same_shape(&m) => acc = acc.zip_map(&m, pick),
                    Value::Matrix(m) => {
                        return Err(signature.error(
                            "Shape",
                            format!("value '{}' should have the same size and channels as '{}'", m, acc),
                        ));
                    }
                    other => return Err(signature.type_error("value", &other, "[Mat]")),
                }
            }
            Ok(Value::Matrix(acc))
        }
        other => Err(signature.type_error("value", &other, "[Number/Mat]")),
    }
}

const NORMALIZE_TO: Signature = Signature {
    overloads: &["[Mat] NormalizeTo([Mat] mat, [Number] normMax)"],
    arity: "2",
};

pub(super) fn normalize_to(args: Vec<Value>) -> Result<Value, Value> {
    let [mat, norm_max] = NORMALIZE_TO.arguments(args)?;
    let m = match mat {
        Value::Matrix(m) => m,
        other => return Err(NORMALIZE_TO.type_error("mat", &other, "[Mat]")),
    };
    let target = match norm_max {
        Value::Number(n) => n,
        other => return Err(NORMALIZE_TO.type_error("normMax", &other, "[Number]")),
    };

    let current = m.max_value();
    if current == 0.0 || !current.is_finite() {
        return Err(NORMALIZE_TO.error(
            "Math",
            format!("mat '{}' has a maximum of {}, which cannot be scaled to {}", m, current, target),
        ));
    }
    let scale = target / current;
    Ok(Value::Matrix(m.map(|v| v * scale)))
}
