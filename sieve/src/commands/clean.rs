// sieve/src/commands/clean.rs
//
// USE CASE: Remove generated reports.

use std::path::PathBuf;

use sieve_core::application::clean_project;

use super::report_error;

pub fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    match clean_project(&project_dir) {
        Ok(removed) if removed.is_empty() => println!("✨ Nothing to clean."),
        Ok(removed) => println!("✨ Removed {} target(s).", removed.len()),
        Err(e) => {
            report_error("❌ Clean failed:", e);
            std::process::exit(1);
        }
    }
    Ok(())
}
