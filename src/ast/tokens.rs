use std::fmt;

use crate::ast::OperatorKind;

/// Bracket characters, opening and closing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `[` (index sugar for `.SubMat(...)`)
    OpenSquare,
    /// `]`
    CloseSquare,
}

impl Bracket {
    pub fn is_open(self) -> bool {
        matches!(self, Bracket::OpenParen | Bracket::OpenSquare)
    }

    /// The closing bracket matching an opening one.
    pub fn closing(self) -> Bracket {
        match self {
            Bracket::OpenParen | Bracket::CloseParen => Bracket::CloseParen,
            Bracket::OpenSquare | Bracket::CloseSquare => Bracket::CloseSquare,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Bracket::OpenParen => '(',
            Bracket::CloseParen => ')',
            Bracket::OpenSquare => '[',
            Bracket::CloseSquare => ']',
        }
    }
}

impl fmt::Display for Bracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Grouping bracket
    ///
    /// # Examples
    /// ```text
    /// (1 + 2) * 3
    /// x[0, 1]
    /// ```
    Bracket(Bracket),

    /// Argument separator inside brackets
    Comma,

    /// Method-call separator
    ///
    /// The value before the dot becomes the first argument of the call.
    ///
    /// # Examples
    /// ```text
    /// 1234.abs()
    /// x.clamp(0, 1)
    /// ```
    Dot,

    /// Operator symbol, not yet bound to operands
    ///
    /// # Examples
    /// ```text
    /// +  -  *  /  %  **  ^  ..  :  ==  !=  >  >=  <  <=  =
    /// ```
    Operator(OperatorKind),

    /// Numeric literal
    ///
    /// A leading `-` belongs to the literal only when no value precedes it.
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 3.14
    /// -1
    /// 1.
    /// ```
    Number(f64),

    /// Variable or function name (letters only)
    ///
    /// # Examples
    /// ```text
    /// x
    /// clamp
    /// GetChannel
    /// ```
    Name(String),

    /// End of input
    Eof,
}

impl Token {
    /// Whether the token can end an operand, which decides if a following
    /// `-` is subtraction or the sign of a literal.
    pub fn ends_value(&self) -> bool {
        match self {
            Token::Number(_) | Token::Name(_) => true,
            Token::Bracket(b) => !b.is_open(),
            _ => false,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Bracket(b) => write!(f, "{}", b),
            Token::Comma => f.write_str(","),
            Token::Dot => f.write_str("."),
            Token::Operator(op) => f.write_str(op.symbol()),
            Token::Number(n) => write!(f, "{}", n),
            Token::Name(name) => f.write_str(name),
            Token::Eof => f.write_str("<end>"),
        }
    }
}
