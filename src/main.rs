//! fsmsh - Deterministic Finite Automaton Shell
//!
//! Define an automaton incrementally with a small command language, run
//! input strings against it, and persist/reload the definition.

mod repl;

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fsmsh")]
#[command(about = "Interactive shell for defining and running deterministic finite automata")]
#[command(version)]
struct Cli {
    /// Definition script replayed through the interpreter before the prompt
    script: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    repl::run(cli.script.as_deref())
}
