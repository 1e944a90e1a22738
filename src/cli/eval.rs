//! Evaluate expressions with variables bound from the command line

use regex::Regex;

use super::{CliError, json_to_value};
use crate::{Environment, Value, evaluate, parse};

/// `NAME=VALUE`, where NAME is letters only as in the expression language.
const BINDING_PATTERN: &str = r"^\s*(\p{Alphabetic}+)\s*=\s*(.+?)\s*$";

/// Options for the eval command
#[derive(Debug, Clone, Default)]
pub struct EvalOptions {
    /// The expression to evaluate
    pub expression: String,
    /// `NAME=VALUE` bindings, VALUE being JSON
    pub bindings: Vec<String>,
    /// JSON object of variables
    pub input: Option<String>,
    /// Only validate syntax, don't evaluate
    pub syntax_only: bool,
}

/// Result of an eval operation
#[derive(Debug)]
pub enum EvalOutcome {
    /// Syntax validation passed
    SyntaxValid,
    /// Expression evaluated to a value
    Value(Value),
}

/// Splits a `NAME=VALUE` binding and converts VALUE from JSON.
///
/// # Examples
///
/// ```
/// use ptms_lang::Value;
/// use ptms_lang::cli::parse_binding;
///
/// let (name, value) = parse_binding("threshold=0.5").unwrap();
/// assert_eq!(name, "threshold");
/// assert_eq!(value, Value::Number(0.5));
/// ```
pub fn parse_binding(binding: &str) -> Result<(String, Value), CliError> {
    let pattern = Regex::new(BINDING_PATTERN)?;
    let captures = pattern
        .captures(binding)
        .ok_or_else(|| CliError::InvalidBinding(binding.to_string()))?;
    let name = captures[1].to_string();
    let json: serde_json::Value = serde_json::from_str(&captures[2])?;
    Ok((name, json_to_value(json)?))
}

/// Binds every entry of a JSON object as a variable.
pub fn bind_input(env: &mut Environment, input: &str) -> Result<(), CliError> {
    let json: serde_json::Value = serde_json::from_str(input)?;
    let serde_json::Value::Object(entries) = json else {
        return Err(CliError::InvalidValue(
            "input must be a JSON object mapping variable names to values".to_string(),
        ));
    };

    for (name, value) in entries {
        if name.is_empty() || !name.chars().all(char::is_alphabetic) {
            return Err(CliError::InvalidBinding(name));
        }
        env.set_variable(name, json_to_value(value)?);
    }
    Ok(())
}

/// Execute a ptms eval operation
pub fn execute_eval(options: &EvalOptions) -> Result<EvalOutcome, CliError> {
    if options.syntax_only {
        parse(&options.expression)?;
        return Ok(EvalOutcome::SyntaxValid);
    }

    let mut env = Environment::new();
    if let Some(input) = &options.input {
        bind_input(&mut env, input)?;
    }
    for binding in &options.bindings {
        let (name, value) = parse_binding(binding)?;
        env.set_variable(name, value);
    }

    match evaluate(&options.expression, &mut env) {
        Value::Error(message) => Err(CliError::Evaluation(message)),
        value => Ok(EvalOutcome::Value(value)),
    }
}
