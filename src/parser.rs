//! Precedence resolution.
//!
//! Folding runs bottom-up over the grouped tree. Inside each group, calls
//! fold first (`name (args)` and `value . name (args)`), then operators fold
//! one [`Tier`] at a time in a single left-to-right pass per tier. Each
//! operator binds the already folded expression on its left and the raw
//! item on its right, which makes every tier left-associative.

use crate::ast::{Expr, Group, Item, OperatorKind, TIERS, Tier};
use crate::error::SyntaxError;
use crate::grouper;
use crate::lexer::Lexer;

/// Lexes, groups and folds `source` into a single expression.
///
/// This checks syntax only; names are not resolved.
///
/// # Examples
///
/// ```
/// use ptms_lang::parse;
///
/// assert!(parse("(1 + x).clamp(0, 1)").is_ok());
/// assert!(parse("(1 + 2").is_err());
/// ```
pub fn parse(source: &str) -> Result<Expr, SyntaxError> {
    let tokens = Lexer::tokenize(source)?;
    let outer = grouper::group(tokens)?;
    let mut resolved = resolve_group(outer)?;

    if resolved.has_comma || resolved.items.len() > 1 {
        return Err(SyntaxError::Unresolved);
    }
    match resolved.items.pop() {
        None => Err(SyntaxError::Empty),
        Some(Item::Expr(expr)) => {
            tracing::debug!(%expr, "resolved expression");
            Ok(expr)
        }
        Some(_) => Err(SyntaxError::Unresolved),
    }
}

/// Resolves nested groups first, then folds this group's own items.
pub fn resolve_group(group: Group) -> Result<Group, SyntaxError> {
    let items = group
        .items
        .into_iter()
        .map(|item| match item {
            Item::Expr(Expr::Group(inner)) => resolve_group(inner).map(|g| Item::Expr(Expr::Group(g))),
            other => Ok(other),
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut items = fold_calls(items)?;
    for tier in &TIERS {
        items = fold_tier(items, tier)?;
    }

    Ok(Group {
        items,
        has_comma: group.has_comma,
    })
}

/// Folds every group that directly follows a name into a call. A dot and a
/// value before the name make that value the first argument.
fn fold_calls(items: Vec<Item>) -> Result<Vec<Item>, SyntaxError> {
    let mut output = Vec::with_capacity(items.len());

    for item in items {
        let Item::Expr(Expr::Group(group)) = item else {
            output.push(item);
            continue;
        };
        let name = match output.pop() {
            Some(Item::Expr(Expr::Name(name))) => name,
            previous => {
                output.extend(previous);
                output.push(Item::Expr(Expr::Group(group)));
                continue;
            }
        };

        let mut args = Vec::new();
        if matches!(output.last(), Some(Item::Dot)) {
            output.pop();
            match output.pop() {
                Some(Item::Expr(receiver)) => args.push(receiver),
                Some(other) => return Err(SyntaxError::NotAValueBeforeDot(other.to_string())),
                None => return Err(SyntaxError::NothingBeforeDot),
            }
        }
        args.extend(arguments(group));

        tracing::trace!(%name, args = args.len(), "folded call");
        output.push(Item::Expr(Expr::Call { name, args }));
    }

    Ok(output)
}

/// Splits a call's bracket group into argument expressions.
fn arguments(group: Group) -> Vec<Expr> {
    if group.has_comma {
        group
            .items
            .into_iter()
            .filter_map(|item| match item {
                Item::Comma => None,
                Item::Expr(expr) => Some(expr),
                other => unreachable!("comma-separated groups only hold segments, found '{other}'"),
            })
            .collect()
    } else if group.items.is_empty() {
        Vec::new()
    } else {
        vec![Expr::Group(group)]
    }
}

fn fold_tier(items: Vec<Item>, tier: &Tier) -> Result<Vec<Item>, SyntaxError> {
    let mut output: Vec<Item> = Vec::with_capacity(items.len());
    let mut rest = items.into_iter().peekable();

    while let Some(item) = rest.next() {
        let op = match item {
            Item::Operator(op) if tier.operators.contains(&op) => op,
            other => {
                output.push(other);
                continue;
            }
        };

        let left = match output.pop() {
            Some(Item::Expr(left)) if tier.prefix_only => {
                output.push(Item::Expr(left));
                output.push(Item::Operator(op));
                continue;
            }
            Some(Item::Expr(left)) => left,
            previous => {
                let Some(implicit) = op.implicit_left() else {
                    return Err(match previous {
                        None => SyntaxError::MissingLeftOperand(op),
                        Some(token) => SyntaxError::InvalidLeftOperand {
                            op,
                            token: token.to_string(),
                        },
                    });
                };
                output.extend(previous);
                implicit
            }
        };

        // An implicit right operand leaves the following item in place.
        let right = if let Some(Item::Expr(right)) = rest.next_if(|item| matches!(item, Item::Expr(_))) {
            right
        } else if let Some(implicit) = op.implicit_right() {
            implicit
        } else {
            return Err(match rest.peek() {
                None => SyntaxError::MissingRightOperand(op),
                Some(token) => SyntaxError::InvalidRightOperand {
                    op,
                    token: token.to_string(),
                },
            });
        };

        let left = match (op, left) {
            (OperatorKind::Assign, Expr::Name(name)) => Expr::VariableReference(name),
            (_, left) => left,
        };

        tracing::trace!(op = op.symbol(), "folded operator");
        output.push(Item::Expr(Expr::operation(op, left, right)));
    }

    Ok(output)
}
