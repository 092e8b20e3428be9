//! filter-sql CLI
//!
//! Command-line tool for compiling inventory filter expressions into SQL
//! predicates.

mod columns;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

use filter_sql_core::{Lexer, ParseError};

/// Compile filter expressions into SQL `WHERE` predicates.
#[derive(Parser)]
#[command(name = "filter-sql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file mapping filter identifiers to SQL columns.
    #[arg(short, long, env = "FILTER_SQL_COLUMNS", global = true)]
    columns: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the SQL predicate for a filter expression.
    Compile {
        /// The filter expression.
        expression: String,
    },

    /// Print the token stream of a filter expression.
    Tokens {
        /// The filter expression.
        expression: String,
    },

    /// Print the parsed expression tree.
    Parse {
        /// The filter expression.
        expression: String,

        /// Emit the tree as JSON instead of the bracketed debug form.
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Compile { expression } => {
            let columns = columns::load(cli.columns.as_deref())?;
            let sql = filter_sql_core::compile(&expression, &columns)
                .map_err(|err| diagnostic(&expression, &err))?;
            println!("{sql}");
        }

        Commands::Tokens { expression } => {
            for token in Lexer::new(&expression) {
                println!("{:>4} {:<10} {}", token.position(), token.kind, token.lexeme);
            }
        }

        Commands::Parse { expression, json } => {
            let expr = filter_sql_core::parse(&expression)
                .map_err(|err| diagnostic(&expression, &err))?;
            debug!("parsed {expr:?}");
            if json {
                println!("{}", serde_json::to_string_pretty(&expr)?);
            } else {
                println!("{expr}");
            }
        }
    }

    Ok(())
}

/// Turns a parse failure into a caret diagnostic for the terminal.
fn diagnostic(expression: &str, err: &ParseError) -> anyhow::Error {
    anyhow::anyhow!(
        "invalid filter at position {}\n{}",
        err.position,
        err.render(expression)
    )
}
