use std::fmt;
use std::ops::Range;

use crate::matrix::Matrix;

/// Result of evaluating an expression.
///
/// `Error` is an ordinary value: every operator and built-in function
/// returns the first error it receives untouched, so a failure deep inside
/// an expression surfaces as the final result.
///
/// # Examples
///
/// ```
/// use ptms_lang::{Environment, Value, evaluate};
///
/// let mut env = Environment::new();
/// assert_eq!(evaluate("2 + 3 * 4", &mut env), Value::Number(14.0));
/// assert_eq!(evaluate("1 > 2", &mut env), Value::Boolean(false));
/// assert!(evaluate("missing + 1", &mut env).is_error());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Double-precision number
    Number(f64),

    /// Tagged multi-channel matrix
    Matrix(Matrix),

    /// Result of comparing two numbers
    Boolean(bool),

    /// Index range, used by `SubMat` and `[...]`
    Range(RangeValue),

    /// Implicit operand placeholder
    Nothing,

    /// Assignment target, only meaningful on the left of `=`
    VariableReference(String),

    /// Failure message
    Error(String),
}

impl Value {
    pub fn error(message: impl Into<String>) -> Self {
        Value::Error(message.into())
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_matrix(&self) -> Option<&Matrix> {
        match self {
            Value::Matrix(m) => Some(m),
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Number(_) => "Number",
            Value::Matrix(_) => "Mat",
            Value::Boolean(_) => "Boolean",
            Value::Range(_) => "Range",
            Value::Nothing => "Nothing",
            Value::VariableReference(_) => "VariableNameReference",
            Value::Error(_) => "Error",
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<Matrix> for Value {
    fn from(m: Matrix) -> Self {
        Value::Matrix(m)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{}", n),
            Value::Matrix(m) => write!(f, "{}", m),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Range(r) => write!(f, "{}", r),
            Value::Nothing => f.write_str("<nothing>"),
            Value::VariableReference(name) => write!(f, "VariableRef({})", name),
            Value::Error(message) => f.write_str(message),
        }
    }
}

/// One end of a [`RangeValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBound {
    /// Unbounded: the start or the end of the axis
    Open,
    /// Index counted from the start
    FromStart(usize),
    /// Index counted back from the end (`^n`)
    FromEnd(usize),
}

impl RangeBound {
    /// Converts an index number: negative numbers count from the end.
    /// Fractions round half to even. Returns `None` for NaN and infinities.
    pub fn from_number(n: f64) -> Option<RangeBound> {
        if !n.is_finite() {
            return None;
        }
        let index = n.round_ties_even();
        if index < 0.0 {
            Some(RangeBound::FromEnd((-index) as usize))
        } else {
            Some(RangeBound::FromStart(index as usize))
        }
    }

    fn position(self, len: usize, open: usize) -> Option<usize> {
        match self {
            RangeBound::Open => Some(open),
            RangeBound::FromStart(n) => Some(n),
            RangeBound::FromEnd(n) => len.checked_sub(n),
        }
    }
}

impl fmt::Display for RangeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeBound::Open => Ok(()),
            RangeBound::FromStart(n) => write!(f, "{}", n),
            RangeBound::FromEnd(n) => write!(f, "^{}", n),
        }
    }
}

/// Half-open index range with optional ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeValue {
    pub start: RangeBound,
    pub end: RangeBound,
}

impl RangeValue {
    pub const FULL: RangeValue = RangeValue {
        start: RangeBound::Open,
        end: RangeBound::Open,
    };

    pub fn new(start: RangeBound, end: RangeBound) -> Self {
        RangeValue { start, end }
    }

    /// Resolves the range against an axis of length `len`.
    ///
    /// An end counted from the start that runs past the axis is clamped to
    /// `len`. Returns `None` when the start or a `^n` end falls outside the
    /// axis, or when the range is empty.
    pub fn resolve(&self, len: usize) -> Option<Range<usize>> {
        let start = self.start.position(len, 0)?;
        let end = match self.end {
            RangeBound::FromStart(n) => n.min(len),
            bound => bound.position(len, len)?,
        };
        (start < end).then_some(start..end)
    }
}

impl fmt::Display for RangeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_from_end() {
        let range = RangeValue::new(RangeBound::FromStart(1), RangeBound::FromEnd(1));
        assert_eq!(range.resolve(5), Some(1..4));
        assert_eq!(range.to_string(), "1..^1");
    }

    #[test]
    fn test_range_end_past_axis_is_clamped() {
        let range = RangeValue::new(RangeBound::Open, RangeBound::FromStart(10));
        assert_eq!(range.resolve(5), Some(0..5));
        assert_eq!(RangeValue::FULL.resolve(5), Some(0..5));
    }

    #[test]
    fn test_range_out_of_bounds() {
        let past_start = RangeValue::new(RangeBound::FromStart(5), RangeBound::FromStart(10));
        assert_eq!(past_start.resolve(5), None);
        let past_end = RangeValue::new(RangeBound::Open, RangeBound::FromEnd(6));
        assert_eq!(past_end.resolve(5), None);
    }

    #[test]
    fn test_bound_rounds_half_to_even() {
        assert_eq!(RangeBound::from_number(2.5), Some(RangeBound::FromStart(2)));
        assert_eq!(RangeBound::from_number(-3.0), Some(RangeBound::FromEnd(3)));
        assert_eq!(RangeBound::from_number(f64::NAN), None);
    }
}
