use std::fmt;

use crate::ast::Expr;

/// Binary operators understood by the expression language.
///
/// Every operator is binary after folding. Unary forms (`-x`, `^5`, `..3`)
/// are produced by an implicit left operand supplied during folding, see
/// [`OperatorKind::implicit_left`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorKind {
    /// Addition (`+`)
    Plus,
    /// Subtraction (`-`)
    Minus,
    /// Multiplication (`*`)
    Times,
    /// Division (`/`)
    Divide,
    /// Remainder (`%`)
    Mod,
    /// Exponentiation (`**` or `^`)
    Power,
    /// Index range (`..` or `:`)
    Range,
    /// Equality (`==`)
    Equal,
    /// Inequality (`!=`)
    NotEqual,
    /// Greater than (`>`)
    GreaterThan,
    /// Greater than or equal (`>=`)
    GreaterThanOrEqual,
    /// Less than (`<`)
    LessThan,
    /// Less than or equal (`<=`)
    LessThanOrEqual,
    /// Variable assignment (`=`)
    Assign,
}

impl OperatorKind {
    pub fn symbol(self) -> &'static str {
        match self {
            OperatorKind::Plus => "+",
            OperatorKind::Minus => "-",
            OperatorKind::Times => "*",
            OperatorKind::Divide => "/",
            OperatorKind::Mod => "%",
            OperatorKind::Power => "**",
            OperatorKind::Range => "..",
            OperatorKind::Equal => "==",
            OperatorKind::NotEqual => "!=",
            OperatorKind::GreaterThan => ">",
            OperatorKind::GreaterThanOrEqual => ">=",
            OperatorKind::LessThan => "<",
            OperatorKind::LessThanOrEqual => "<=",
            OperatorKind::Assign => "=",
        }
    }

    /// Operand used when nothing valid sits to the left of the operator.
    ///
    /// `-5` folds as `0 - 5`, `^5` as `<nothing> ^ 5` and `..3` as
    /// `<nothing> .. 3`. Operators without a default require a left operand.
    pub fn implicit_left(self) -> Option<Expr> {
        match self {
            OperatorKind::Plus | OperatorKind::Minus => Some(Expr::Number(0.0)),
            OperatorKind::Power | OperatorKind::Range => Some(Expr::Nothing),
            _ => None,
        }
    }

    /// Operand used when no value follows the operator. The following item,
    /// if any, stays in place. Only ranges may be open on the right (`2..`).
    pub fn implicit_right(self) -> Option<Expr> {
        match self {
            OperatorKind::Range => Some(Expr::Nothing),
            _ => None,
        }
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperatorKind::Power => f.write_str("**' or '^"),
            OperatorKind::Range => f.write_str("..' or ':"),
            other => f.write_str(other.symbol()),
        }
    }
}

/// One folding pass of the precedence resolver.
#[derive(Debug, Clone, Copy)]
pub struct Tier {
    pub operators: &'static [OperatorKind],
    /// Fold only operators that have no value on their left.
    pub prefix_only: bool,
}

/// Folding passes, applied strictly in this order.
///
/// Power appears twice: the first pass claims prefix uses (`^5`) before
/// ranges fold, so `100..^25` reads as a range ending 25 from the end.
pub const TIERS: [Tier; 7] = [
    Tier { operators: &[OperatorKind::Power], prefix_only: true },
    Tier { operators: &[OperatorKind::Range], prefix_only: false },
    Tier { operators: &[OperatorKind::Power], prefix_only: false },
    Tier {
        operators: &[OperatorKind::Times, OperatorKind::Divide, OperatorKind::Mod],
        prefix_only: false,
    },
    Tier { operators: &[OperatorKind::Plus, OperatorKind::Minus], prefix_only: false },
    Tier {
        operators: &[
            OperatorKind::Equal,
            OperatorKind::NotEqual,
            OperatorKind::GreaterThan,
            OperatorKind::GreaterThanOrEqual,
            OperatorKind::LessThan,
            OperatorKind::LessThanOrEqual,
        ],
        prefix_only: false,
    },
    Tier { operators: &[OperatorKind::Assign], prefix_only: false },
];
