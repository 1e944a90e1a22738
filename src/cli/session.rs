//! Line-by-line evaluation against one environment

use std::io::{BufRead, Write};

use super::CliError;
use crate::output::{render, render_pretty};
use crate::{Environment, evaluate};

/// Evaluates each non-blank input line and writes one result per line.
///
/// Error values are written like any other result and do not stop the
/// session. Assignments carry over to later lines.
pub fn run_session<R: BufRead, W: Write>(
    env: &mut Environment,
    input: R,
    mut output: W,
    pretty: bool,
) -> Result<(), CliError> {
    for line in input.lines() {
        let line = line?;
        let source = line.trim();
        if source.is_empty() {
            continue;
        }

        let value = evaluate(source, env);
        let text = if pretty {
            render_pretty(&value)
        } else {
            render(&value)
        };
        writeln!(output, "{}", text)?;
    }
    output.flush()?;
    Ok(())
}
