use std::collections::HashMap;
use std::fmt;

use crate::functions::{self, Function};
use crate::value::Value;

/// Variable and function bindings for evaluation.
///
/// Function lookup tries the built-in library first, ignoring case, then the
/// functions registered on this environment by exact name. Variables are
/// looked up every time a name is evaluated, so assignments made earlier in
/// an expression are visible to the rest of it.
///
/// # Examples
///
/// ```
/// use ptms_lang::{Environment, Value, evaluate};
///
/// let mut env = Environment::new();
/// env.register_function("double", |args: Vec<Value>| match args.as_slice() {
///     [Value::Number(n)] => Value::Number(n * 2.0),
///     _ => Value::error("double takes one number"),
/// });
///
/// evaluate("x = 4", &mut env);
/// assert_eq!(evaluate("x.double()", &mut env), Value::Number(8.0));
/// ```
#[derive(Default)]
pub struct Environment {
    variables: HashMap<String, Value>,
    functions: HashMap<String, Box<dyn Function>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a variable, or an error value naming the missing variable.
    pub fn get_variable(&self, name: &str) -> Value {
        match self.variables.get(name) {
            Some(value) => value.clone(),
            None => Value::error(format!("The name '{}' is not a valid value", name)),
        }
    }

    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Binds a variable, returning the value it replaced.
    pub fn set_variable(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        let name = name.into();
        tracing::debug!(%name, value = %value, "set variable");
        self.variables.insert(name, value)
    }

    pub fn remove_variable(&mut self, name: &str) -> Option<Value> {
        self.variables.remove(name)
    }

    /// Variable names in sorted order.
    pub fn variable_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.variables.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Registers a user function. Built-ins with the same name, in any case,
    /// take precedence.
    pub fn register_function(&mut self, name: impl Into<String>, function: impl Function + 'static) {
        self.functions.insert(name.into(), Box::new(function));
    }

    pub fn get_function(&self, name: &str) -> Option<&(dyn Function + 'static)> {
        if let Some(builtin) = functions::builtin(name) {
            return Some(builtin);
        }
        self.functions.get(name).map(|f| f.as_ref())
    }

    pub fn has_function(&self, name: &str) -> bool {
        self.get_function(name).is_some()
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut functions: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        functions.sort_unstable();
        f.debug_struct("Environment")
            .field("variables", &self.variables)
            .field("functions", &functions)
            .finish()
    }
}
