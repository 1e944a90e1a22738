//! Built-in function library and the [`Function`] trait shared with user
//! functions.
//!
//! Built-ins are looked up case-insensitively. Every built-in returns the
//! first error among its arguments before checking anything else.

mod channels;
mod conversion;
mod math;
mod submat;

use crate::matrix::{Matrix, MatrixError};
use crate::value::Value;

/// A callable taking evaluated arguments.
///
/// Implemented for any `Fn(Vec<Value>) -> Value`, so closures can be
/// registered on an [`Environment`](crate::Environment) directly.
pub trait Function {
    fn invoke(&self, args: Vec<Value>) -> Value;
}

impl<F> Function for F
where
    F: Fn(Vec<Value>) -> Value,
{
    fn invoke(&self, args: Vec<Value>) -> Value {
        self(args)
    }
}

/// Built-in body. `Err` carries the error value to return.
type BuiltinFn = fn(Vec<Value>) -> Result<Value, Value>;

struct Builtin {
    name: &'static str,
    run: BuiltinFn,
}

impl Function for Builtin {
    fn invoke(&self, args: Vec<Value>) -> Value {
        if let Some(error) = args.iter().find(|arg| arg.is_error()) {
            return error.clone();
        }
        tracing::trace!(function = self.name, args = args.len(), "invoke builtin");
        (self.run)(args).unwrap_or_else(|error| error)
    }
}

static BUILTINS: [Builtin; 15] = [
    Builtin { name: "Abs", run: math::abs },
    Builtin { name: "Clamp", run: math::clamp },
    Builtin { name: "Min", run: math::min },
    Builtin { name: "Max", run: math::max },
    Builtin { name: "NormalizeTo", run: math::normalize_to },
    Builtin { name: "GetChannelCount", run: channels::get_channel_count },
    Builtin { name: "GetChannel", run: channels::get_channel },
    Builtin { name: "ReplaceChannel", run: channels::replace_channel },
    Builtin { name: "CombineChannels", run: channels::combine_channels },
    Builtin { name: "RGBReplace", run: channels::rgb_replace },
    Builtin { name: "AlphaReplace", run: channels::alpha_replace },
    Builtin { name: "GetRGB", run: channels::get_rgb },
    Builtin { name: "ToImage", run: conversion::to_image },
    Builtin { name: "ToMatrix", run: conversion::to_matrix },
    Builtin { name: "SubMat", run: submat::sub_mat },
];

/// Looks up a built-in function, ignoring case.
pub fn builtin(name: &str) -> Option<&'static dyn Function> {
    BUILTINS
        .iter()
        .find(|builtin| builtin.name.eq_ignore_ascii_case(name))
        .map(|builtin| builtin as &'static dyn Function)
}

/// Names of the built-in functions, in their documented casing.
pub fn builtin_names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|builtin| builtin.name)
}

/// Overload description used in a built-in's error messages.
pub(crate) struct Signature {
    pub overloads: &'static [&'static str],
    /// Accepted argument counts, as written in messages ("3", "2 to 4")
    pub arity: &'static str,
}

impl Signature {
    fn describe(&self) -> String {
        self.overloads.join(" | ")
    }

    pub fn arity_error(&self, given: usize) -> Value {
        Value::error(format!(
            "Parameter Error: Function {} accepts {} parameter(s) but {} was/were given",
            self.describe(),
            self.arity,
            given
        ))
    }

    /// Error for an argument of the wrong type. `parameter` names the
    /// parameter and `expected` lists the accepted types.
    pub fn type_error(&self, parameter: &str, value: &Value, expected: &str) -> Value {
        Value::error(format!(
            "Type Error: Function {}, {} '{}' should be {}",
            self.describe(),
            parameter,
            value,
            expected
        ))
    }

    /// Error of another category, such as "Channel Out Of Range".
    pub fn error(&self, category: &str, detail: impl std::fmt::Display) -> Value {
        Value::error(format!("{} Error: Function {}, {}", category, self.describe(), detail))
    }

    /// Destructures a fixed number of arguments.
    pub fn arguments<const N: usize>(&self, args: Vec<Value>) -> Result<[Value; N], Value> {
        <[Value; N]>::try_from(args).map_err(|args| self.arity_error(args.len()))
    }

    pub fn matrix(&self, parameter: &str, value: Value) -> Result<Matrix, Value> {
        match value {
            Value::Matrix(m) => Ok(m),
            other => Err(self.type_error(parameter, &other, "[Mat]")),
        }
    }

    pub fn number(&self, parameter: &str, value: Value) -> Result<f64, Value> {
        match value {
            Value::Number(n) => Ok(n),
            other => Err(self.type_error(parameter, &other, "[Number]")),
        }
    }

    /// Fails unless `m` has exactly `channels` channels.
    pub fn channels(&self, parameter: &str, m: &Matrix, channels: usize) -> Result<(), Value> {
        if m.channels() != channels {
            return Err(self.type_error(
                parameter,
                &Value::Matrix(m.clone()),
                &format!("a {}-channel [Mat]", channels),
            ));
        }
        Ok(())
    }

    /// Fails unless `m` has as many rows and columns as `reference`.
    pub fn same_size(&self, parameter: &str, m: &Matrix, reference: &Matrix) -> Result<(), Value> {
        if m.rows() != reference.rows() || m.cols() != reference.cols() {
            return Err(self.error(
                "Shape",
                format!(
                    "{} '{}' should have the same size as '{}' ({}x{})",
                    parameter,
                    m,
                    reference,
                    reference.rows(),
                    reference.cols()
                ),
            ));
        }
        Ok(())
    }

    pub fn finish(&self, result: Result<Matrix, MatrixError>) -> Result<Value, Value> {
        result
            .map(Value::Matrix)
            .map_err(|e| self.error("Matrix", e))
    }
}

/// Rounds a number used as an integer index, half to even.
pub(crate) fn as_index(n: f64) -> Option<i64> {
    let rounded = n.round_ties_even();
    (rounded.is_finite() && rounded.abs() <= i64::MAX as f64).then_some(rounded as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_case() {
        assert!(builtin("abs").is_some());
        assert!(builtin("GETCHANNEL").is_some());
        assert!(builtin("rgbreplace").is_some());
        assert!(builtin("blur").is_none());
    }

    #[test]
    fn test_first_error_argument_is_returned() {
        let abs = builtin("abs").unwrap();
        let result = abs.invoke(vec![Value::error("first"), Value::error("second")]);
        assert_eq!(result, Value::error("first"));
    }

    #[test]
    fn test_names_are_listed() {
        let names: Vec<_> = builtin_names().collect();
        assert!(names.contains(&"SubMat"));
        assert_eq!(names.len(), 15);
    }
}
