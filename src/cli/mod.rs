//! CLI support for ptms-lang
//!
//! Provides programmatic access to the `ptms` command-line functionality so
//! other tools can bind variables from JSON and evaluate expressions the
//! same way the binary does.

mod convert;
mod docs;
mod eval;
mod session;

pub use convert::{json_to_value, value_to_json};
pub use docs::{DocCategory, get_doc_category, get_docs_overview};
pub use eval::{EvalOptions, EvalOutcome, bind_input, execute_eval, parse_binding};
pub use session::run_session;

use std::io;

use thiserror::Error;

use crate::error::SyntaxError;
use crate::matrix::MatrixError;

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Expression failed to parse
    #[error("{0}")]
    Syntax(#[from] SyntaxError),

    /// Expression evaluated to an error value
    #[error("{0}")]
    Evaluation(String),

    /// JSON parsing error
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Malformed `--var` argument or input key
    #[error("Invalid variable binding '{0}' (expected NAME=VALUE where NAME is made of letters)")]
    InvalidBinding(String),

    /// JSON value that cannot become a variable
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// Matrix description with inconsistent shape or type
    #[error("Invalid matrix: {0}")]
    Matrix(#[from] MatrixError),

    /// Binding pattern failed to compile
    #[error("Invalid binding pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Unknown documentation category
    #[error("Unknown category: '{0}'\nRun 'ptms docs' to see available categories.")]
    UnknownCategory(String),
}
