use clap::{Parser as ClapParser, Subcommand};
use ptms_lang::cli::{self, CliError, EvalOptions, EvalOutcome};
use ptms_lang::{Environment, render, render_pretty};
use std::io::{self, Read};
use std::sync::Once;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "ptms")]
#[command(about = "PTMS - An expression language over numbers and image matrices")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a single expression
    Eval {
        /// The expression to evaluate
        expression: String,

        /// Bind a variable, VALUE being JSON (repeatable)
        #[arg(short, long = "var", value_name = "NAME=VALUE")]
        vars: Vec<String>,

        /// JSON object of variables (reads from stdin if not provided)
        #[arg(short, long)]
        input: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't evaluate
        #[arg(long)]
        syntax_only: bool,
    },

    /// Evaluate stdin line by line, sharing variables between lines
    Repl {
        /// JSON object of variables bound before the first line
        #[arg(short, long)]
        input: Option<String>,

        /// Pretty-print matrices
        #[arg(short, long)]
        pretty: bool,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'ptms docs' to list categories)
        category: String,
    },
}

static TRACING: Once = Once::new();

/// Installs a stderr subscriber when `RUST_LOG` is set.
fn init_tracing() {
    TRACING.call_once(|| {
        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .with_writer(io::stderr)
                .with_target(false)
                .init();
        }
    });
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Eval {
            expression,
            vars,
            input,
            json,
            pretty,
            syntax_only,
        } => run_eval(
            EvalOptions {
                expression,
                bindings: vars,
                input,
                syntax_only,
            },
            json,
            pretty,
        ),
        Commands::Repl { input, pretty } => run_repl(input, pretty),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| print!("{}", content)),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_eval(mut options: EvalOptions, json: bool, pretty: bool) -> Result<(), CliError> {
    if options.input.is_none() && !options.syntax_only && !atty::is(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        if !buffer.trim().is_empty() {
            options.input = Some(buffer);
        }
    }

    match cli::execute_eval(&options)? {
        EvalOutcome::SyntaxValid => println!("Syntax is valid"),
        EvalOutcome::Value(value) if json => {
            let output = cli::value_to_json(&value);
            let text = if pretty {
                serde_json::to_string_pretty(&output)?
            } else {
                serde_json::to_string(&output)?
            };
            println!("{}", text);
        }
        EvalOutcome::Value(value) if pretty => println!("{}", render_pretty(&value)),
        EvalOutcome::Value(value) => println!("{}", render(&value)),
    }
    Ok(())
}

fn run_repl(input: Option<String>, pretty: bool) -> Result<(), CliError> {
    let mut env = Environment::new();
    if let Some(input) = input {
        cli::bind_input(&mut env, &input)?;
    }
    cli::run_session(&mut env, io::stdin().lock(), io::stdout().lock(), pretty)
}
