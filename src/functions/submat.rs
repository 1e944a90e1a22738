use std::ops::Range;

use ndarray::s;

use super::{Signature, as_index};
use crate::matrix::{Matrix, MatrixType};
use crate::value::{RangeValue, Value};

const SUB_MAT: Signature = Signature {
    overloads: &[
        "[Number] SubMat([Mat] mat, [Number] y, [Number] x, [Number] channel)",
        "[Mat] SubMat([Mat] mat, [Number/Range] y, [Number/Range] x (optional), [Number/Range] channel (optional))",
    ],
    arity: "2 to 4",
};

/// One resolved axis selector.
enum Selection {
    Index(usize),
    Span(Range<usize>),
}

impl Selection {
    fn span(&self) -> Range<usize> {
        match self {
            Selection::Index(i) => *i..*i + 1,
            Selection::Span(range) => range.clone(),
        }
    }
}

/// Resolves a number or range against an axis of length `len`. Negative
/// numbers count from the end.
fn select(parameter: &str, category: &str, value: &Value, len: usize) -> Result<Selection, Value> {
    let out_of_range = || {
        SUB_MAT.error(
            category,
            format!("{} '{}' is out of range (valid indices are -{} to {})", parameter, value, len, len - 1),
        )
    };
    match value {
        Value::Number(n) => {
            let index = as_index(*n).ok_or_else(out_of_range)?;
            let index = if index < 0 { len as i64 + index } else { index };
            if (0..len as i64).contains(&index) {
                Ok(Selection::Index(index as usize))
            } else {
                Err(out_of_range())
            }
        }
        Value::Range(range) => range.resolve(len).map(Selection::Span).ok_or_else(out_of_range),
        other => Err(SUB_MAT.type_error(parameter, other, "[Number/Range]")),
    }
}

/// `SubMat(mat, y, x, channel)`. Missing selectors cover the whole axis.
/// Numbers on every axis pick a single element.
pub(super) fn sub_mat(args: Vec<Value>) -> Result<Value, Value> {
    if !(2..=4).contains(&args.len()) {
        return Err(SUB_MAT.arity_error(args.len()));
    }
    let mut args = args.into_iter();
    let m = match args.next() {
        Some(mat) => SUB_MAT.matrix("mat", mat)?,
        None => return Err(SUB_MAT.arity_error(0)),
    };
    let mut selector = |name: &str, category: &str, len: usize| {
        let value = args.next().unwrap_or(Value::Range(RangeValue::FULL));
        select(name, category, &value, len)
    };

    let y = selector("y", "Index Out Of Range", m.rows())?;
    let x = selector("x", "Index Out Of Range", m.cols())?;
    let channel = selector("channel", "Channel Out Of Range", m.channels())?;

    if let (Selection::Index(y), Selection::Index(x), Selection::Index(c)) = (&y, &x, &channel) {
        return m
            .get(*y, *x, *c)
            .map(Value::Number)
            .ok_or_else(|| SUB_MAT.error("Index Out Of Range", "element is outside the matrix"));
    }

    let data = m
        .data()
        .slice(s![y.span(), x.span(), channel.span()])
        .to_owned();
    let kind = if m.kind().accepts(data.dim().2) {
        m.kind()
    } else {
        MatrixType::Matrix
    };
    SUB_MAT.finish(Matrix::new(kind, data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::RangeBound;

    fn grid() -> Matrix {
        // 3x3, value = 10 * row + col
        let values = (0..3)
            .flat_map(|r| (0..3).map(move |c| (10 * r + c) as f64))
            .collect();
        Matrix::from_vec(MatrixType::Gray, 3, 3, 1, values).unwrap()
    }

    #[test]
    fn test_all_numbers_select_element() {
        let result = sub_mat(vec![
            Value::Matrix(grid()),
            Value::Number(2.0),
            Value::Number(1.0),
            Value::Number(0.0),
        ]);
        assert_eq!(result, Ok(Value::Number(21.0)));
    }

    #[test]
    fn test_negative_index_counts_from_end() {
        let result = sub_mat(vec![
            Value::Matrix(grid()),
            Value::Number(-1.0),
            Value::Number(0.0),
            Value::Number(0.0),
        ]);
        assert_eq!(result, Ok(Value::Number(20.0)));
    }

    #[test]
    fn test_missing_selectors_cover_axis() {
        let result = sub_mat(vec![Value::Matrix(grid()), Value::Number(1.0)]);
        let m = match result {
            Ok(Value::Matrix(m)) => m,
            other => panic!("expected a matrix, got {:?}", other),
        };
        assert_eq!((m.rows(), m.cols(), m.channels()), (1, 3, 1));
        assert_eq!(m.kind(), MatrixType::Gray);
    }

    #[test]
    fn test_range_selection() {
        let range = RangeValue::new(RangeBound::FromStart(1), RangeBound::Open);
        let result = sub_mat(vec![Value::Matrix(grid()), Value::Range(range), Value::Range(range)]);
        let m = match result {
            Ok(Value::Matrix(m)) => m,
            other => panic!("expected a matrix, got {:?}", other),
        };
        assert_eq!(m.data().iter().copied().collect::<Vec<_>>(), vec![11.0, 12.0, 21.0, 22.0]);
    }

    #[test]
    fn test_out_of_range() {
        let result = sub_mat(vec![Value::Matrix(grid()), Value::Number(3.0)]);
        assert!(result.is_err());
    }
}
