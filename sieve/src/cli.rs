// sieve/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sieve")]
#[command(about = "Batch cleaning & reporting pipeline for retail datasets", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🚀 Runs the pipeline (Load -> Clean -> Reports)
    Run {
        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// 🧹 Removes generated reports (output/ folder)
    Clean {
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,
    },

    /// ⚡ Executes a SQL query against the cleaned tables (Ad-hoc)
    Query {
        query: String,

        /// Project directory
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Maximum number of rows to print
        #[arg(long, default_value = "20")]
        limit: usize,
    },
}
