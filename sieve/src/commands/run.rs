// sieve/src/commands/run.rs
//
// USE CASE: Run the cleaning & reporting pipeline.

use std::path::PathBuf;

use anyhow::Context;
use comfy_table::{Table, presets::UTF8_FULL};
use sieve_core::application::{RunResult, run_pipeline};
use sieve_core::domain::cleaning::CleaningReport;
use sieve_core::infrastructure::config::load_project_config;

use super::report_error;

fn summary_table(result: &RunResult) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["dataset", "before", "after", "dropped"]);

    let rows: [(&str, &CleaningReport); 3] = [
        ("customers", &result.cleaning.customers),
        ("products", &result.cleaning.products),
        ("transactions", &result.cleaning.transactions),
    ];
    for (name, report) in rows {
        table.add_row(vec![
            name.to_string(),
            report.before_count.to_string(),
            report.after_count.to_string(),
            report.dropped().to_string(),
        ]);
    }
    table
}

pub fn execute(project_dir: PathBuf) -> anyhow::Result<()> {
    let start = std::time::Instant::now();
    tracing::debug!(project_dir = ?project_dir, "run command");

    println!("⚙️  Loading configuration...");
    let config = load_project_config(&project_dir).with_context(|| {
        format!(
            "Failed to load project configuration from {:?}",
            project_dir
        )
    })?;
    println!("   Project: {}", config.name);

    match run_pipeline(&project_dir, &config) {
        Ok(result) => {
            println!("\n🧽 Cleaning summary");
            println!("{}", summary_table(&result));
            println!(
                "\n✨ SUCCESS! {} reports in {} ({:.2?})",
                result.files_written(),
                result.output_dir.display(),
                start.elapsed()
            );
        }
        Err(e) => {
            report_error("\n💥 CRITICAL PIPELINE ERROR:", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
