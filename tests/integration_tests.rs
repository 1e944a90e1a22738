// tests/integration_tests.rs

use pretty_assertions::assert_eq;
use ptms_lang::{Environment, Value, evaluate};

fn eval_expr(source: &str) -> Value {
    evaluate(source, &mut Environment::new())
}

fn error_message(value: Value) -> String {
    match value {
        Value::Error(message) => message,
        other => panic!("expected an error value, got {:?}", other),
    }
}

// ============================================================================
// Arithmetic
// ============================================================================

#[test]
fn test_number_arithmetic() {
    let test_cases = vec![
        ("1 + 2", 3.0),
        ("7 - 10", -3.0),
        ("2 * 3.5", 7.0),
        ("9 / 2", 4.5),
        ("10 % 4", 2.0),
        ("2 + 3 * 4", 14.0),
        ("(2 + 3) * 4", 20.0),
        ("2 ** 10", 1024.0),
        ("2 ** 3 ** 2", 64.0),
        ("1 - 2 - 3", -4.0),
        ("3 - -5", 8.0),
        ("-5", -5.0),
        ("-(2 + 3)", -5.0),
        ("1.", 1.0),
    ];

    for (input, expected) in test_cases {
        assert_eq!(eval_expr(input), Value::Number(expected), "Failed for input: {}", input);
    }
}

#[test]
fn test_division_follows_floating_point() {
    assert_eq!(eval_expr("1 / 0"), Value::Number(f64::INFINITY));
    assert!(matches!(eval_expr("0 / 0"), Value::Number(n) if n.is_nan()));
}

#[test]
fn test_prefix_power_negates() {
    assert_eq!(eval_expr("^5"), Value::Number(-5.0));
    assert_eq!(eval_expr("^0"), Value::Number(0.0));

    let message = error_message(eval_expr("^-5"));
    assert!(message.starts_with("Out Of Range Error"), "{message}");
}

// ============================================================================
// Comparisons
// ============================================================================

#[test]
fn test_number_comparisons() {
    let test_cases = vec![
        ("1 < 2", true),
        ("2 < 1", false),
        ("2 <= 2", true),
        ("3 > 2", true),
        ("3 >= 4", false),
        ("1 + 1 == 2", true),
        ("1 != 1", false),
    ];

    for (input, expected) in test_cases {
        assert_eq!(eval_expr(input), Value::Boolean(expected), "Failed for input: {}", input);
    }
}

#[test]
fn test_boolean_is_not_arithmetic() {
    let message = error_message(eval_expr("(1 < 2) + 1"));
    assert_eq!(
        message,
        "Type Error: Operator '+' accepts [Number/Mat] + [Number/Mat]. However, the first argument received is 'true' which is neither of those."
    );
}

// ============================================================================
// Functions and Method Calls
// ============================================================================

#[test]
fn test_method_call_matches_function_call() {
    let test_cases = vec![
        ("4.abs()", "abs(4)"),
        ("-4.abs()", "abs(-4)"),
        ("5.clamp(0, 1)", "clamp(5, 0, 1)"),
        ("3.min(1, 2)", "min(3, 1, 2)"),
    ];

    for (method, function) in test_cases {
        assert_eq!(eval_expr(method), eval_expr(function), "Failed for {} vs {}", method, function);
    }
}

#[test]
fn test_numeric_builtins() {
    let test_cases = vec![
        ("abs(-4)", 4.0),
        ("clamp(5, 0, 1)", 1.0),
        ("clamp(-5, 0, 1)", 0.0),
        ("clamp(0.25, 0, 1)", 0.25),
        ("min(3, 1, 2)", 1.0),
        ("max(3, 1, 2)", 3.0),
        ("max(4)", 4.0),
    ];

    for (input, expected) in test_cases {
        assert_eq!(eval_expr(input), Value::Number(expected), "Failed for input: {}", input);
    }
}

#[test]
fn test_builtin_names_ignore_case() {
    assert_eq!(eval_expr("ABS(-2)"), Value::Number(2.0));
    assert_eq!(eval_expr("Abs(-2)"), Value::Number(2.0));
    assert_eq!(eval_expr("(-2).aBs()"), Value::Number(2.0));
}

#[test]
fn test_builtin_arity_error() {
    let message = error_message(eval_expr("abs(1, 2)"));
    assert!(message.starts_with("Parameter Error: Function"), "{message}");
    assert!(message.contains("but 2 was/were given"), "{message}");
}

#[test]
fn test_unknown_function() {
    assert_eq!(
        eval_expr("nope(1)"),
        Value::error("The name 'nope' is not a valid function")
    );
}

#[test]
fn test_user_function() {
    let mut env = Environment::new();
    env.register_function("count", |args: Vec<Value>| Value::Number(args.len() as f64));

    assert_eq!(evaluate("count(1, 2, 3)", &mut env), Value::Number(3.0));
    assert_eq!(evaluate("7.count(1)", &mut env), Value::Number(2.0));
    assert_eq!(evaluate("count()", &mut env), Value::Number(0.0));
}

#[test]
fn test_builtin_shadows_user_function() {
    let mut env = Environment::new();
    env.register_function("abs", |_args: Vec<Value>| Value::Number(99.0));
    assert_eq!(evaluate("abs(-1)", &mut env), Value::Number(1.0));
}

// ============================================================================
// Variables and Assignment
// ============================================================================

#[test]
fn test_assignment_returns_value_and_persists() {
    let mut env = Environment::new();
    assert_eq!(evaluate("x = 5", &mut env), Value::Number(5.0));
    assert_eq!(evaluate("x * 2", &mut env), Value::Number(10.0));
    assert_eq!(evaluate("x = x + 1", &mut env), Value::Number(6.0));
    assert_eq!(env.variable("x"), Some(&Value::Number(6.0)));

    assert_eq!(env.remove_variable("x").and_then(|v| v.as_number()), Some(6.0));
    assert!(evaluate("x", &mut env).is_error());
}

#[test]
fn test_assignment_visible_later_in_expression() {
    let mut env = Environment::new();
    assert_eq!(evaluate("(x = 3) + x", &mut env), Value::Number(6.0));
}

#[test]
fn test_assignment_binds_loosest() {
    let mut env = Environment::new();
    assert_eq!(evaluate("y = 1 < 2", &mut env), Value::Boolean(true));
    assert_eq!(env.variable("y"), Some(&Value::Boolean(true)));
}

#[test]
fn test_assignment_needs_a_name() {
    let message = error_message(eval_expr("1 = 2"));
    assert!(message.starts_with("Type Error: Operator '='"), "{message}");
}

#[test]
fn test_unknown_variable() {
    assert_eq!(eval_expr("y + 1"), Value::error("The name 'y' is not a valid value"));
}

#[test]
fn test_failed_assignment_does_not_bind() {
    let mut env = Environment::new();
    assert!(evaluate("x = nope", &mut env).is_error());
    assert_eq!(env.variable("x"), None);
}

// ============================================================================
// Error Propagation
// ============================================================================

#[test]
fn test_left_error_wins() {
    assert_eq!(eval_expr("a + b"), Value::error("The name 'a' is not a valid value"));
    assert_eq!(eval_expr("1 + b * a"), Value::error("The name 'b' is not a valid value"));
}

#[test]
fn test_error_passes_through_functions() {
    assert_eq!(
        eval_expr("clamp(1, q, r)"),
        Value::error("The name 'q' is not a valid value")
    );
    assert_eq!(
        eval_expr("q.nope()"),
        Value::error("The name 'nope' is not a valid function")
    );
}

#[test]
fn test_syntax_errors_become_values() {
    let test_cases = vec![
        ("", "Syntax Error: The expression is empty"),
        ("1 2", "Syntax Error: The token parsed unsuccessfully"),
        ("()", "Syntax Error: The bracket is empty"),
        ("(1, 2)", "Syntax Error: The content inside the bracket is more than one value."),
        ("!1", "Syntax Error: '!' is not currently supported"),
    ];

    for (input, expected) in test_cases {
        assert_eq!(eval_expr(input), Value::error(expected), "Failed for input: {}", input);
    }
}

#[test]
fn test_syntax_error_leaves_environment_untouched() {
    let mut env = Environment::new();
    assert!(evaluate("x = (1 + 2", &mut env).is_error());
    assert_eq!(env.variable("x"), None);
}

// ============================================================================
// Ranges
// ============================================================================

#[test]
fn test_range_values_display() {
    let test_cases = vec![
        ("1..3", "1..3"),
        ("..", ".."),
        ("2:", "2.."),
        ("..^1", "..^1"),
        ("-2..", "^2.."),
    ];

    for (input, expected) in test_cases {
        let value = eval_expr(input);
        assert!(matches!(value, Value::Range(_)), "Failed for input: {}", input);
        assert_eq!(value.to_string(), expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_range_needs_numbers() {
    let message = error_message(eval_expr("(1 < 2)..3"));
    assert!(message.contains("first argument"), "{message}");
}
