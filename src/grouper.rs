//! Bracket grouping.
//!
//! Turns the flat token stream into nested [`Group`]s, checking that every
//! bracket is closed by its own kind. Index brackets are rewritten on the
//! way: `x[a, b]` becomes `x . SubMat (a, b)`, which the call fold later
//! turns into `SubMat(x, a, b)`.

use std::mem;

use crate::ast::{Bracket, Expr, Group, Item, Token};
use crate::error::SyntaxError;

/// Function that index brackets desugar to.
pub const INDEX_FUNCTION: &str = "SubMat";

/// Groups a token stream as if it were wrapped in one outer pair of
/// parentheses. The returned group is that outer level.
pub fn group(tokens: Vec<Token>) -> Result<Group, SyntaxError> {
    let mut grouper = Grouper {
        tokens: tokens.into_iter(),
    };
    let outer = grouper.group_level(None)?;
    tracing::debug!(items = outer.items.len(), "grouped expression");
    Ok(outer)
}

struct Grouper<I> {
    tokens: I,
}

impl<I: Iterator<Item = Token>> Grouper<I> {
    /// Collects tokens until the bracket closing `open`, or until the end of
    /// input for the outer level (`open == None`).
    fn group_level(&mut self, open: Option<Bracket>) -> Result<Group, SyntaxError> {
        let mut current = Vec::new();
        let mut segments = Vec::new();

        loop {
            let token = match self.tokens.next() {
                None | Some(Token::Eof) => {
                    return match open {
                        None => Ok(finish(current, segments)),
                        Some(open) => Err(SyntaxError::UnclosedBracket {
                            open,
                            expected: open.closing(),
                        }),
                    };
                }
                Some(token) => token,
            };

            match token {
                Token::Bracket(bracket) if bracket.is_open() => {
                    let inner = self.group_level(Some(bracket))?;
                    if bracket == Bracket::OpenSquare {
                        current.push(Item::Dot);
                        current.push(Item::Expr(Expr::Name(INDEX_FUNCTION.to_string())));
                    }
                    current.push(Item::Expr(Expr::Group(inner)));
                }
                Token::Bracket(found) => {
                    return match open {
                        Some(open) if open.closing() == found => Ok(finish(current, segments)),
                        Some(open) => Err(SyntaxError::MismatchedBracket {
                            open,
                            expected: open.closing(),
                            found,
                        }),
                        None => Err(SyntaxError::UnopenedBracket(found)),
                    };
                }
                Token::Comma => {
                    segments.push(Item::Expr(Expr::Group(Group::new(mem::take(&mut current)))));
                    segments.push(Item::Comma);
                }
                Token::Dot => current.push(Item::Dot),
                Token::Operator(op) => current.push(Item::Operator(op)),
                Token::Number(n) => current.push(Item::Expr(Expr::Number(n))),
                Token::Name(name) => current.push(Item::Expr(Expr::Name(name))),
                Token::Eof => unreachable!("end of input is handled before dispatch"),
            }
        }
    }
}

/// Closes a level. Without commas the level's items are the group; with
/// commas the last segment is flushed and the group holds the segments.
fn finish(current: Vec<Item>, mut segments: Vec<Item>) -> Group {
    if segments.is_empty() {
        return Group::new(current);
    }
    segments.push(Item::Expr(Expr::Group(Group::new(current))));
    Group {
        items: segments,
        has_comma: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::OperatorKind;
    use crate::lexer::Lexer;

    fn group_source(source: &str) -> Result<Group, SyntaxError> {
        group(Lexer::tokenize(source).unwrap())
    }

    #[test]
    fn test_index_bracket_desugars_to_submat() {
        let outer = group_source("x[1]").unwrap();
        assert_eq!(
            outer.items,
            vec![
                Item::Expr(Expr::Name("x".to_string())),
                Item::Dot,
                Item::Expr(Expr::Name("SubMat".to_string())),
                Item::Expr(Expr::Group(Group::new(vec![Item::Expr(Expr::Number(1.0))]))),
            ]
        );
    }

    #[test]
    fn test_commas_split_segments() {
        let outer = group_source("(1, 2 + 3)").unwrap();
        let Item::Expr(Expr::Group(inner)) = &outer.items[0] else {
            panic!("expected a group, got {:?}", outer.items[0]);
        };
        assert!(inner.has_comma);
        assert_eq!(inner.items.len(), 3);
        assert_eq!(inner.items[1], Item::Comma);
        assert_eq!(
            inner.items[2],
            Item::Expr(Expr::Group(Group::new(vec![
                Item::Expr(Expr::Number(2.0)),
                Item::Operator(OperatorKind::Plus),
                Item::Expr(Expr::Number(3.0)),
            ])))
        );
    }

    #[test]
    fn test_stray_closing_bracket() {
        assert_eq!(
            group_source("1 + 2)"),
            Err(SyntaxError::UnopenedBracket(Bracket::CloseParen))
        );
    }
}
