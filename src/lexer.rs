use crate::ast::{Bracket, OperatorKind, Token};
use crate::error::SyntaxError;

pub struct Lexer {
    input: Vec<char>,
    position: usize,
    /// Set when the last token can end an operand, so a following `-` is
    /// subtraction rather than a sign.
    after_value: bool,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            after_value: false,
        }
    }

    /// Lexes the whole input, stopping at the first error. The trailing
    /// [`Token::Eof`] is not included.
    pub fn tokenize(input: &str) -> Result<Vec<Token>, SyntaxError> {
        let mut lexer = Lexer::new(input);
        let mut tokens = Vec::new();
        loop {
            match lexer.next_token()? {
                Token::Eof => break,
                token => tokens.push(token),
            }
        }
        tracing::debug!(tokens = tokens.len(), "lexed expression");
        Ok(tokens)
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_spaces(&mut self) {
        while self.current_char() == Some(' ') {
            self.advance();
        }
    }

    fn read_name(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_alphabetic() {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    /// Reads a numeric literal starting at the current position, which may
    /// hold a leading `-`.
    ///
    /// A dot after the integer digits continues the fraction only when a
    /// digit follows it. `1..5` leaves the dots for the range operator and
    /// `1.abs()` leaves the dot for the method call. Any other trailing dot
    /// belongs to the literal (`1.` is 1).
    fn read_number(&mut self) -> Result<Token, SyntaxError> {
        let mut number = String::new();
        if self.current_char() == Some('-') {
            number.push('-');
            self.advance();
        }

        while let Some(ch) = self.current_char().filter(char::is_ascii_digit) {
            number.push(ch);
            self.advance();
        }

        if self.current_char() == Some('.') {
            match self.peek_char(1) {
                Some(ch) if ch.is_ascii_digit() => {
                    number.push('.');
                    self.advance();
                    while let Some(ch) = self.current_char().filter(char::is_ascii_digit) {
                        number.push(ch);
                        self.advance();
                    }
                }
                Some(ch) if ch == '.' || ch.is_alphabetic() => {}
                _ => self.advance(),
            }
        }

        number
            .parse::<f64>()
            .map(Token::Number)
            .map_err(|_| SyntaxError::MalformedNumber(number))
    }

    pub fn next_token(&mut self) -> Result<Token, SyntaxError> {
        let token = self.scan_token()?;
        self.after_value = token.ends_value();
        Ok(token)
    }

    fn scan_token(&mut self) -> Result<Token, SyntaxError> {
        self.skip_spaces();

        let token = match self.current_char() {
            None => Token::Eof,
            Some('(') => {
                self.advance();
                Token::Bracket(Bracket::OpenParen)
            }
            Some(')') => {
                self.advance();
                Token::Bracket(Bracket::CloseParen)
            }
            Some('[') => {
                self.advance();
                Token::Bracket(Bracket::OpenSquare)
            }
            Some(']') => {
                self.advance();
                Token::Bracket(Bracket::CloseSquare)
            }
            Some(',') => {
                self.advance();
                Token::Comma
            }
            Some('.') => {
                if self.peek_char(1) == Some('.') {
                    self.advance();
                    self.advance();
                    Token::Operator(OperatorKind::Range)
                } else {
                    self.advance();
                    Token::Dot
                }
            }
            Some(':') => {
                self.advance();
                Token::Operator(OperatorKind::Range)
            }
            Some('+') => {
                self.advance();
                Token::Operator(OperatorKind::Plus)
            }
            Some('-') => {
                if !self.after_value && self.peek_char(1).is_some_and(|c| c.is_ascii_digit()) {
                    return self.read_number();
                }
                self.advance();
                Token::Operator(OperatorKind::Minus)
            }
            Some('*') => {
                if self.peek_char(1) == Some('*') {
                    self.advance();
                    self.advance();
                    Token::Operator(OperatorKind::Power)
                } else {
                    self.advance();
                    Token::Operator(OperatorKind::Times)
                }
            }
            Some('^') => {
                self.advance();
                Token::Operator(OperatorKind::Power)
            }
            Some('/') => {
                self.advance();
                Token::Operator(OperatorKind::Divide)
            }
            Some('%') => {
                self.advance();
                Token::Operator(OperatorKind::Mod)
            }
            Some('>') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Token::Operator(OperatorKind::GreaterThanOrEqual)
                } else {
                    self.advance();
                    Token::Operator(OperatorKind::GreaterThan)
                }
            }
            Some('<') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Token::Operator(OperatorKind::LessThanOrEqual)
                } else {
                    self.advance();
                    Token::Operator(OperatorKind::LessThan)
                }
            }
            Some('=') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Token::Operator(OperatorKind::Equal)
                } else {
                    self.advance();
                    Token::Operator(OperatorKind::Assign)
                }
            }
            Some('!') => {
                if self.peek_char(1) == Some('=') {
                    self.advance();
                    self.advance();
                    Token::Operator(OperatorKind::NotEqual)
                } else {
                    return Err(SyntaxError::Unsupported("!"));
                }
            }
            Some('&') => {
                return Err(if self.peek_char(1) == Some('&') {
                    SyntaxError::Unsupported("&&")
                } else {
                    SyntaxError::Unsupported("&")
                });
            }
            Some('|') => {
                return Err(if self.peek_char(1) == Some('|') {
                    SyntaxError::Unsupported("||")
                } else {
                    SyntaxError::Unsupported("|")
                });
            }
            Some(ch) if ch.is_alphabetic() => Token::Name(self.read_name()),
            Some(ch) if ch.is_ascii_digit() => return self.read_number(),
            Some(ch) => return Err(SyntaxError::UnexpectedCharacter(ch)),
        };
        Ok(token)
    }
}

#[test]
fn test_method_call_on_literal() {
    let mut lexer = Lexer::new("1234.abs()");
    assert_eq!(lexer.next_token().unwrap(), Token::Number(1234.0));
    assert_eq!(lexer.next_token().unwrap(), Token::Dot);
    assert_eq!(lexer.next_token().unwrap(), Token::Name("abs".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Bracket(Bracket::OpenParen));
    assert_eq!(lexer.next_token().unwrap(), Token::Bracket(Bracket::CloseParen));
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

#[test]
fn test_sign_after_value() {
    let mut lexer = Lexer::new("x-1");
    assert_eq!(lexer.next_token().unwrap(), Token::Name("x".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Operator(OperatorKind::Minus));
    assert_eq!(lexer.next_token().unwrap(), Token::Number(1.0));

    let mut lexer = Lexer::new("(-1)");
    assert_eq!(lexer.next_token().unwrap(), Token::Bracket(Bracket::OpenParen));
    assert_eq!(lexer.next_token().unwrap(), Token::Number(-1.0));
}
