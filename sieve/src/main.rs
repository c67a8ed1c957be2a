// sieve/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the progress lines and tables.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { project_dir } => commands::run::execute(project_dir),
        Commands::Clean { project_dir } => commands::clean::execute(project_dir),
        Commands::Query {
            query,
            project_dir,
            limit,
        } => commands::query::execute(project_dir, query, limit),
    }
}
