//! JSON <-> Value conversion utilities
//!
//! Matrices are written as objects:
//!
//! ```text
//! {"type": "RGB", "rows": 2, "cols": 2, "data": [...]}
//! ```
//!
//! `data` is either flat (row-major, channels interleaved) or nested as
//! rows of pixels, where a pixel is a number or an array of channels. A
//! bare nested array is read as a plain matrix.

use serde_json::{Map, json};

use super::CliError;
use crate::matrix::{Matrix, MatrixType};
use crate::value::Value;

/// Convert serde_json::Value to a variable value
pub fn json_to_value(json: serde_json::Value) -> Result<Value, CliError> {
    match json {
        serde_json::Value::Null => Ok(Value::Nothing),
        serde_json::Value::Bool(b) => Ok(Value::Boolean(b)),
        serde_json::Value::Number(n) => n
            .as_f64()
            .map(Value::Number)
            .ok_or_else(|| CliError::InvalidValue(format!("{} is not a double", n))),
        serde_json::Value::Array(rows) => {
            let m = nested_matrix(&rows)?;
            Ok(Value::Matrix(m))
        }
        serde_json::Value::Object(map) => matrix_object(&map).map(Value::Matrix),
        serde_json::Value::String(s) => Err(CliError::InvalidValue(format!(
            "strings are not values in expressions (got \"{}\")",
            s
        ))),
    }
}

fn number(json: &serde_json::Value) -> Result<f64, CliError> {
    json.as_f64()
        .ok_or_else(|| CliError::InvalidValue(format!("expected a number, got {}", json)))
}

fn dimension(map: &Map<String, serde_json::Value>, key: &str) -> Result<Option<usize>, CliError> {
    match map.get(key) {
        None => Ok(None),
        Some(json) => json
            .as_u64()
            .map(|n| Some(n as usize))
            .ok_or_else(|| CliError::InvalidValue(format!("'{}' should be a positive integer, got {}", key, json))),
    }
}

/// Reads rows of pixels. Every row must have the same number of pixels and
/// every pixel the same number of channels.
fn nested_matrix(rows: &[serde_json::Value]) -> Result<Matrix, CliError> {
    let cols = rows.first().and_then(|row| row.as_array()).map_or(0, Vec::len);
    let channels = rows
        .first()
        .and_then(|row| row.as_array())
        .and_then(|row| row.first())
        .map_or(1, |pixel| pixel.as_array().map_or(1, Vec::len));

    let mut values = Vec::with_capacity(rows.len() * cols * channels);
    for row in rows {
        let pixels = row
            .as_array()
            .filter(|pixels| pixels.len() == cols)
            .ok_or_else(|| CliError::InvalidValue(format!("every row should be an array of {} pixels", cols)))?;
        for pixel in pixels {
            match pixel {
                serde_json::Value::Array(parts) if parts.len() == channels => {
                    for part in parts {
                        values.push(number(part)?);
                    }
                }
                single if channels == 1 && !single.is_array() => values.push(number(single)?),
                other => {
                    return Err(CliError::InvalidValue(format!(
                        "every pixel should have {} channel(s), got {}",
                        channels, other
                    )));
                }
            }
        }
    }

    Ok(Matrix::from_vec(MatrixType::Matrix, rows.len(), cols, channels, values)?)
}

fn matrix_object(map: &Map<String, serde_json::Value>) -> Result<Matrix, CliError> {
    let kind = match map.get("type") {
        None => MatrixType::Matrix,
        Some(serde_json::Value::String(name)) => MatrixType::from_name(name)
            .ok_or_else(|| CliError::InvalidValue(format!("unknown matrix type '{}'", name)))?,
        Some(other) => {
            return Err(CliError::InvalidValue(format!("matrix type should be a string, got {}", other)));
        }
    };
    let data = map
        .get("data")
        .and_then(|data| data.as_array())
        .ok_or_else(|| CliError::InvalidValue("a matrix object needs a 'data' array".to_string()))?;

    if data.first().is_some_and(|first| first.is_array()) {
        return Ok(nested_matrix(data)?.with_kind(kind)?);
    }

    let rows = dimension(map, "rows")?;
    let cols = dimension(map, "cols")?;
    let (Some(rows), Some(cols)) = (rows, cols) else {
        return Err(CliError::InvalidValue(
            "a flat 'data' array needs 'rows' and 'cols'".to_string(),
        ));
    };
    let pixels = rows
        .checked_mul(cols)
        .ok_or_else(|| CliError::InvalidValue(format!("a {}x{} matrix is too large", rows, cols)))?;
    let channels = match (dimension(map, "channels")?, kind.fixed_channels()) {
        (Some(channels), _) => channels,
        (None, Some(fixed)) => fixed,
        (None, None) if pixels > 0 => data.len() / pixels,
        (None, None) => 0,
    };
    let values = data.iter().map(number).collect::<Result<Vec<_>, _>>()?;
    Ok(Matrix::from_vec(kind, rows, cols, channels, values)?)
}

/// Convert a value to serde_json::Value
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Number(n) => float(*n),
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Matrix(m) => json!({
            "type": m.kind().name(),
            "rows": m.rows(),
            "cols": m.cols(),
            "channels": m.channels(),
            "data": matrix_rows(m),
        }),
        Value::Range(range) => serde_json::Value::String(range.to_string()),
        Value::Nothing => serde_json::Value::Null,
        Value::VariableReference(name) => serde_json::Value::String(name.clone()),
        Value::Error(message) => json!({ "error": message }),
    }
}

/// Non-finite numbers have no JSON form and are written as strings.
fn float(n: f64) -> serde_json::Value {
    serde_json::Number::from_f64(n)
        .map(serde_json::Value::Number)
        .unwrap_or_else(|| serde_json::Value::String(n.to_string()))
}

fn matrix_rows(m: &Matrix) -> serde_json::Value {
    let rows = m
        .data()
        .outer_iter()
        .map(|row| {
            let pixels = row
                .outer_iter()
                .map(|pixel| match pixel.len() {
                    1 => float(pixel[0]),
                    _ => serde_json::Value::Array(pixel.iter().copied().map(float).collect()),
                })
                .collect();
            serde_json::Value::Array(pixels)
        })
        .collect();
    serde_json::Value::Array(rows)
}
