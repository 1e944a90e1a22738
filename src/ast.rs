//! # PTMS Expression Language - Syntax Tree
//!
//! This module defines the tokens and tree nodes of the PTMS expression
//! language, a small infix language over numbers and multi-channel image
//! matrices.
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Groups, folding items and expression nodes
//! - **[operators]** - Operator kinds, implicit operands and folding tiers
//!
//! ## Quick Start
//!
//! ```text
//! (1234.abs() + x + 10 ** 50).clamp(-1, 1) * 2 / 4
//! ```
//!
//! Adds a variable to two constants, clamps the result into `[-1, 1]` and
//! scales it. When `x` is a matrix the scalars broadcast over every channel.
//!
//! ## Pipeline
//!
//! Source text passes through four stages:
//!
//! 1. **Lexing** - characters become [`Token`]s
//! 2. **Grouping** - brackets become nested [`Group`]s, `x[i]` becomes
//!    `x.SubMat(i)`
//! 3. **Folding** - calls fold first, then operators tier by tier
//!    (see [`TIERS`])
//! 4. **Evaluation** - the folded [`Expr`] reduces to a [`Value`](crate::Value)
//!
//! ## Precedence
//!
//! Each tier folds in a single left-to-right pass, so operators inside one
//! tier associate to the left:
//!
//! ```text
//! 2 + 3 * 4      // 14
//! 2 ** 3 ** 2    // (2 ** 3) ** 2 = 64
//! 1 + 2..5       // 1 + (2..5)
//! ```
//!
//! ## Implicit Operands
//!
//! ```text
//! -x       // 0 - x
//! ^5       // -5, prefix power negates
//! ..3      // open-start range
//! 2..      // open-end range
//! ```

pub mod expressions;
pub mod operators;
pub mod tokens;

pub use expressions::{Expr, Group, Item};
pub use operators::{OperatorKind, TIERS, Tier};
pub use tokens::{Bracket, Token};
