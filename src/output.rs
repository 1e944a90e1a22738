//! Text rendering of evaluation results.
//!
//! This module turns a [`Value`] into the text shown to users. Compact output
//! is the value's one-line summary; pretty output additionally lists matrix
//! contents row by row.
//!
//! # Features
//!
//! - **Compact output** via [`render()`] - one line, matrices as a summary
//! - **Pretty output** via [`render_pretty()`] - matrix elements, clipped to
//!   a preview for large matrices
//!
//! # Examples
//!
//! ```
//! use ptms_lang::Value;
//! use ptms_lang::output::{render, render_pretty};
//!
//! let value = Value::Number(42.0);
//!
//! assert_eq!(render(&value), "42");
//! assert_eq!(render_pretty(&value), "42");
//! ```

use crate::matrix::Matrix;
use crate::value::Value;

/// Rows and columns shown by pretty output before clipping.
const PREVIEW_LIMIT: usize = 8;

pub struct ValuePrinter {
    pretty: bool,
}

impl ValuePrinter {
    pub fn new(pretty: bool) -> Self {
        ValuePrinter { pretty }
    }

    pub fn print(&self, value: &Value) -> String {
        match value {
            Value::Matrix(m) if self.pretty => self.print_matrix(m),
            other => other.to_string(),
        }
    }

    fn print_matrix(&self, m: &Matrix) -> String {
        let mut lines = vec![m.to_string()];
        for row in 0..m.rows().min(PREVIEW_LIMIT) {
            let mut cells: Vec<String> = (0..m.cols().min(PREVIEW_LIMIT))
                .map(|col| self.print_pixel(m, row, col))
                .collect();
            if m.cols() > PREVIEW_LIMIT {
                cells.push("...".to_string());
            }
            lines.push(format!("  [{}]", cells.join(", ")));
        }
        if m.rows() > PREVIEW_LIMIT {
            lines.push(format!("  ... {} more row(s)", m.rows() - PREVIEW_LIMIT));
        }
        lines.join("\n")
    }

    fn print_pixel(&self, m: &Matrix, row: usize, col: usize) -> String {
        let channels: Vec<String> = (0..m.channels())
            .filter_map(|c| m.get(row, col, c))
            .map(|v| v.to_string())
            .collect();
        if channels.len() == 1 {
            channels.join("")
        } else {
            format!("({})", channels.join(", "))
        }
    }
}

/// Renders a value on one line.
pub fn render(value: &Value) -> String {
    ValuePrinter::new(false).print(value)
}

/// Renders a value with matrix contents.
///
/// # Examples
///
/// ```
/// use ptms_lang::{Matrix, MatrixType, Value};
/// use ptms_lang::output::render_pretty;
///
/// let m = Matrix::from_vec(MatrixType::Gray, 2, 2, 1, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// assert_eq!(
///     render_pretty(&Value::Matrix(m)),
///     "[1-channel Gray Mat 2x2]\n  [1, 2]\n  [3, 4]"
/// );
/// ```
pub fn render_pretty(value: &Value) -> String {
    ValuePrinter::new(true).print(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::MatrixType;

    #[test]
    fn test_pretty_pixels_group_channels() {
        let m = Matrix::from_vec(MatrixType::Matrix, 1, 1, 2, vec![1.5, 2.0]).unwrap();
        assert_eq!(
            render_pretty(&Value::Matrix(m)),
            "[2-channel Matrix Mat 1x1]\n  [(1.5, 2)]"
        );
    }

    #[test]
    fn test_large_matrix_is_clipped() {
        let m = Matrix::filled(MatrixType::Gray, 10, 10, 1, 0.0).unwrap();
        let text = render_pretty(&Value::Matrix(m));
        assert!(text.ends_with("  ... 2 more row(s)"));
        assert!(text.lines().nth(1).is_some_and(|line| line.ends_with("...]")));
    }
}
