//! Syntax errors raised while lexing, grouping and folding.
//!
//! These never escape [`evaluate`](crate::evaluate): the message becomes a
//! [`Value::Error`](crate::Value::Error). [`parse`](crate::parse) returns
//! them directly for syntax checking.

use thiserror::Error;

use crate::ast::{Bracket, OperatorKind};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxError {
    #[error("Syntax Error: '{0}' is not currently supported")]
    Unsupported(&'static str),

    #[error("Syntax Error: Unexpected character '{0}'")]
    UnexpectedCharacter(char),

    #[error("Syntax Error: '{0}' is not a valid number")]
    MalformedNumber(String),

    #[error(
        "Syntax Error: Unmatched Bracket (starts with '{open}' but ends with '{found}' instead of '{expected}')"
    )]
    MismatchedBracket {
        open: Bracket,
        expected: Bracket,
        found: Bracket,
    },

    #[error(
        "Syntax Error: It's the end of the expression, but the bracket '{open}' is not closed properly (expecting '{expected}') at the end"
    )]
    UnclosedBracket { open: Bracket, expected: Bracket },

    #[error("Syntax Error: The closing bracket '{0}' does not have a matching opening bracket")]
    UnopenedBracket(Bracket),

    #[error("Syntax Error: There is no value before dot '.' character")]
    NothingBeforeDot,

    #[error("Syntax Error: The token '{0}' before dot '.' is not a value")]
    NotAValueBeforeDot(String),

    #[error("Syntax Error: the operator '{0}' does not see anything to the left")]
    MissingLeftOperand(OperatorKind),

    #[error(
        "Syntax Error: the operator '{op}' sees the invalid token to the left '{token}' (The token is not a value)"
    )]
    InvalidLeftOperand { op: OperatorKind, token: String },

    #[error(
        "Syntax Error: It's the end of the expression. However, the operator '{0}' does not see the value to its right"
    )]
    MissingRightOperand(OperatorKind),

    #[error(
        "Syntax Error: the operator '{op}' sees the invalid token to the right '{token}' (The token is not a value)"
    )]
    InvalidRightOperand { op: OperatorKind, token: String },

    #[error("Syntax Error: The expression is empty")]
    Empty,

    #[error("Syntax Error: The token parsed unsuccessfully")]
    Unresolved,
}
