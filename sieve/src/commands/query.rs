// sieve/src/commands/query.rs
//
// USE CASE: Execute a SQL query against the cleaned tables (ad-hoc).

use std::path::PathBuf;

use anyhow::Context;
use comfy_table::{Table as PrettyTable, presets::UTF8_FULL};
use sieve_core::application::query_project;
use sieve_core::domain::Table;
use sieve_core::infrastructure::config::load_project_config;

use super::report_error;

fn render(result: &Table, limit: usize) -> PrettyTable {
    let mut pretty = PrettyTable::new();
    pretty.load_preset(UTF8_FULL).set_header(result.column_names());
    for row in result.rows.iter().take(limit) {
        pretty.add_row(row.iter().map(|v| v.to_string()));
    }
    pretty
}

pub fn execute(project_dir: PathBuf, query: String, limit: usize) -> anyhow::Result<()> {
    let config = load_project_config(&project_dir).with_context(|| {
        format!(
            "Failed to load project configuration from {:?}",
            project_dir
        )
    })?;

    match query_project(&project_dir, &config, &query) {
        Ok(result) => {
            println!("{}", render(&result, limit));
            println!("   {} row(s)", result.len());
        }
        Err(e) => {
            report_error("❌ Query failed:", e);
            std::process::exit(1);
        }
    }
    Ok(())
}
