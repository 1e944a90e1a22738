pub mod ast;
pub mod cli;
pub mod environment;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod grouper;
pub mod lexer;
pub mod matrix;
pub mod operators;
pub mod output;
pub mod parser;
pub mod value;

pub use ast::{Expr, OperatorKind, Token};
pub use environment::Environment;
pub use error::SyntaxError;
pub use evaluator::Evaluator;
pub use functions::Function;
pub use lexer::Lexer;
pub use matrix::{Matrix, MatrixError, MatrixType};
pub use output::{render, render_pretty};
pub use parser::parse;
pub use value::{RangeBound, RangeValue, Value};

/// Parses and evaluates `source` against `env`.
///
/// Syntax errors come back as [`Value::Error`] like every other failure.
/// Assignments in `source` persist in `env`.
///
/// # Examples
///
/// ```
/// use ptms_lang::{Environment, Value, evaluate};
///
/// let mut env = Environment::new();
/// assert_eq!(evaluate("x = 5", &mut env), Value::Number(5.0));
/// assert_eq!(evaluate("x ** 2", &mut env), Value::Number(25.0));
/// assert!(evaluate("(1 + 2", &mut env).is_error());
/// ```
#[tracing::instrument(level = "debug", skip(env))]
pub fn evaluate(source: &str, env: &mut Environment) -> Value {
    match parse(source) {
        Ok(expr) => Evaluator::new(env).eval_expression(&expr),
        Err(e) => Value::Error(e.to_string()),
    }
}
