use crate::ast::{Expr, Group, Item};
use crate::environment::Environment;
use crate::operators;
use crate::value::Value;

/// Reduces folded expressions to values.
///
/// Both operands of an operator and every argument of a call are evaluated
/// eagerly, left to right, before the operator or function runs. Names are
/// resolved through the environment at the moment they are evaluated.
///
/// # Examples
///
/// ```
/// use ptms_lang::{Environment, Evaluator, Value, parse};
///
/// let mut env = Environment::new();
/// env.set_variable("x", Value::Number(-3.0));
///
/// let expr = parse("x.abs() + 1").unwrap();
/// let mut evaluator = Evaluator::new(&mut env);
/// assert_eq!(evaluator.eval_expression(&expr), Value::Number(4.0));
/// ```
pub struct Evaluator<'env> {
    env: &'env mut Environment,
}

impl<'env> Evaluator<'env> {
    pub fn new(env: &'env mut Environment) -> Self {
        Evaluator { env }
    }

    pub fn eval_expression(&mut self, expr: &Expr) -> Value {
        match expr {
            Expr::Number(n) => Value::Number(*n),
            Expr::Nothing => Value::Nothing,
            Expr::Name(name) => self.env.get_variable(name),
            Expr::VariableReference(name) => Value::VariableReference(name.clone()),
            Expr::Group(group) => self.eval_group(group),
            Expr::Operation { op, left, right } => {
                let left = self.eval_expression(left);
                let right = self.eval_expression(right);
                operators::apply(*op, left, right, self.env)
            }
            Expr::Call { name, args } => self.eval_call(name, args),
        }
    }

    /// A group must hold exactly one expression after folding.
    fn eval_group(&mut self, group: &Group) -> Value {
        if group.has_comma || group.items.len() > 1 {
            return Value::error("Syntax Error: The content inside the bracket is more than one value.");
        }
        match group.items.first() {
            Some(Item::Expr(expr)) => self.eval_expression(expr),
            Some(other) => Value::error(format!("Syntax Error: '{}' is not a value", other)),
            None => Value::error("Syntax Error: The bracket is empty"),
        }
    }

    fn eval_call(&mut self, name: &str, args: &[Expr]) -> Value {
        let args: Vec<Value> = args.iter().map(|arg| self.eval_expression(arg)).collect();
        match self.env.get_function(name) {
            Some(function) => function.invoke(args),
            None => Value::error(format!("The name '{}' is not a valid function", name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn eval(source: &str, env: &mut Environment) -> Value {
        let expr = parse(source).unwrap();
        Evaluator::new(env).eval_expression(&expr)
    }

    #[test]
    fn test_assignment_is_visible_to_right_operand() {
        let mut env = Environment::new();
        assert_eq!(eval("(x = 3) + x", &mut env), Value::Number(6.0));
    }

    #[test]
    fn test_unknown_function() {
        let mut env = Environment::new();
        assert_eq!(
            eval("nope(1)", &mut env),
            Value::error("The name 'nope' is not a valid function")
        );
    }

    #[test]
    fn test_argument_errors_reach_user_functions() {
        let mut env = Environment::new();
        env.register_function("count", |args: Vec<Value>| Value::Number(args.len() as f64));
        assert_eq!(eval("count(1, missing, 3)", &mut env), Value::Number(3.0));
    }
}
