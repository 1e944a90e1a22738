// tests/lexer_tests.rs

use pretty_assertions::assert_eq;
use ptms_lang::SyntaxError;
use ptms_lang::ast::{Bracket, OperatorKind, Token};
use ptms_lang::lexer::Lexer;

fn name(s: &str) -> Token {
    Token::Name(s.to_string())
}

fn op(kind: OperatorKind) -> Token {
    Token::Operator(kind)
}

// ============================================================================
// Single Tokens
// ============================================================================

#[test]
fn test_single_tokens() {
    let test_cases = vec![
        ("(", Token::Bracket(Bracket::OpenParen)),
        (")", Token::Bracket(Bracket::CloseParen)),
        ("[", Token::Bracket(Bracket::OpenSquare)),
        ("]", Token::Bracket(Bracket::CloseSquare)),
        (",", Token::Comma),
        (".", Token::Dot),
        ("+", op(OperatorKind::Plus)),
        ("-", op(OperatorKind::Minus)),
        ("*", op(OperatorKind::Times)),
        ("/", op(OperatorKind::Divide)),
        ("%", op(OperatorKind::Mod)),
        ("=", op(OperatorKind::Assign)),
        ("<", op(OperatorKind::LessThan)),
        (">", op(OperatorKind::GreaterThan)),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap();
        assert_eq!(token, expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

#[test]
fn test_operator_spellings() {
    let test_cases = vec![
        ("**", op(OperatorKind::Power)),
        ("^", op(OperatorKind::Power)),
        ("..", op(OperatorKind::Range)),
        (":", op(OperatorKind::Range)),
        ("==", op(OperatorKind::Equal)),
        ("!=", op(OperatorKind::NotEqual)),
        (">=", op(OperatorKind::GreaterThanOrEqual)),
        ("<=", op(OperatorKind::LessThanOrEqual)),
    ];

    for (input, expected) in test_cases {
        assert_eq!(Lexer::tokenize(input).unwrap(), vec![expected], "Failed for input: {}", input);
    }
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn test_number_literals() {
    let test_cases = vec![
        ("42", 42.0),
        ("3.14", 3.14),
        ("0.5", 0.5),
        ("1.", 1.0),
        ("-7", -7.0),
        ("-2.5", -2.5),
    ];

    for (input, expected) in test_cases {
        assert_eq!(
            Lexer::tokenize(input).unwrap(),
            vec![Token::Number(expected)],
            "Failed for input: {}",
            input
        );
    }
}

#[test]
fn test_trailing_dot_is_consumed() {
    assert_eq!(
        Lexer::tokenize("1. + 2").unwrap(),
        vec![Token::Number(1.0), op(OperatorKind::Plus), Token::Number(2.0)]
    );
}

#[test]
fn test_range_between_numbers() {
    assert_eq!(
        Lexer::tokenize("1..5").unwrap(),
        vec![Token::Number(1.0), op(OperatorKind::Range), Token::Number(5.0)]
    );
    assert_eq!(
        Lexer::tokenize("1:5").unwrap(),
        vec![Token::Number(1.0), op(OperatorKind::Range), Token::Number(5.0)]
    );
}

#[test]
fn test_dot_before_name_is_method_call() {
    assert_eq!(
        Lexer::tokenize("2.5.abs()").unwrap(),
        vec![
            Token::Number(2.5),
            Token::Dot,
            name("abs"),
            Token::Bracket(Bracket::OpenParen),
            Token::Bracket(Bracket::CloseParen),
        ]
    );
}

// ============================================================================
// Minus Sign
// ============================================================================

#[test]
fn test_minus_after_value_is_subtraction() {
    let test_cases = vec![
        ("3-1", vec![Token::Number(3.0), op(OperatorKind::Minus), Token::Number(1.0)]),
        ("x-1", vec![name("x"), op(OperatorKind::Minus), Token::Number(1.0)]),
        (
            "(x)-1",
            vec![
                Token::Bracket(Bracket::OpenParen),
                name("x"),
                Token::Bracket(Bracket::CloseParen),
                op(OperatorKind::Minus),
                Token::Number(1.0),
            ],
        ),
    ];

    for (input, expected) in test_cases {
        assert_eq!(Lexer::tokenize(input).unwrap(), expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_minus_without_value_is_sign() {
    let test_cases = vec![
        ("-1", vec![Token::Number(-1.0)]),
        ("3 - -1", vec![Token::Number(3.0), op(OperatorKind::Minus), Token::Number(-1.0)]),
        ("^-5", vec![op(OperatorKind::Power), Token::Number(-5.0)]),
        (
            "f(-1)",
            vec![
                name("f"),
                Token::Bracket(Bracket::OpenParen),
                Token::Number(-1.0),
                Token::Bracket(Bracket::CloseParen),
            ],
        ),
    ];

    for (input, expected) in test_cases {
        assert_eq!(Lexer::tokenize(input).unwrap(), expected, "Failed for input: {}", input);
    }
}

#[test]
fn test_minus_before_name_stays_operator() {
    assert_eq!(
        Lexer::tokenize("-x").unwrap(),
        vec![op(OperatorKind::Minus), name("x")]
    );
}

// ============================================================================
// Names and Whitespace
// ============================================================================

#[test]
fn test_names_are_letters_only() {
    assert_eq!(
        Lexer::tokenize("GetChannel(img,0)").unwrap(),
        vec![
            name("GetChannel"),
            Token::Bracket(Bracket::OpenParen),
            name("img"),
            Token::Comma,
            Token::Number(0.0),
            Token::Bracket(Bracket::CloseParen),
        ]
    );
    assert_eq!(
        Lexer::tokenize("ab12").unwrap(),
        vec![name("ab"), Token::Number(12.0)]
    );
}

#[test]
fn test_spaces_are_skipped() {
    assert_eq!(
        Lexer::tokenize("   x  *   2   ").unwrap(),
        vec![name("x"), op(OperatorKind::Times), Token::Number(2.0)]
    );
    assert_eq!(Lexer::tokenize("").unwrap(), Vec::<Token>::new());
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unsupported_logic_operators() {
    let test_cases = vec![
        ("!x", "!"),
        ("a & b", "&"),
        ("a && b", "&&"),
        ("a | b", "|"),
        ("a || b", "||"),
    ];

    for (input, symbol) in test_cases {
        assert_eq!(
            Lexer::tokenize(input),
            Err(SyntaxError::Unsupported(symbol)),
            "Failed for input: {}",
            input
        );
    }
}

#[test]
fn test_unsupported_message() {
    let err = Lexer::tokenize("a && b").unwrap_err();
    assert_eq!(err.to_string(), "Syntax Error: '&&' is not currently supported");
}

#[test]
fn test_unexpected_characters() {
    for (input, ch) in [("1 # 2", '#'), ("x\t+ 1", '\t'), ("$x", '$')] {
        assert_eq!(
            Lexer::tokenize(input),
            Err(SyntaxError::UnexpectedCharacter(ch)),
            "Failed for input: {:?}",
            input
        );
    }
}
