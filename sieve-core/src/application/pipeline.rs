// sieve-core/src/application/pipeline.rs

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, instrument};

use crate::application::context::PipelineContext;
use crate::application::stages::{self, Report, Stage};
use crate::domain::model::CleaningSummary;
use crate::domain::project::ProjectConfig;
use crate::error::SieveError;
use crate::infrastructure::reporter::CsvReporter;

pub const RUN_REPORT_FILE: &str = "cleaning_report.json";

#[derive(Debug, Clone, Serialize)]
pub struct StageResult {
    pub stage: Stage,
    pub dir: &'static str,
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub project: String,
    pub cleaning: CleaningSummary,
    pub stages: Vec<StageResult>,
    #[serde(skip)]
    pub output_dir: PathBuf,
}

impl RunResult {
    pub fn files_written(&self) -> usize {
        self.stages.iter().map(|s| s.files.len()).sum()
    }
}

/// Load -> clean -> report. Every table is computed before the first file is
/// written, so a failing stage leaves no partial report set behind.
#[instrument(skip_all, fields(project = %config.name))]
pub fn run_pipeline(project_dir: &Path, config: &ProjectConfig) -> Result<RunResult, SieveError> {
    println!("🚀 Starting sieve pipeline...");
    let start_time = Instant::now();

    // 1. SNAPSHOTS
    println!("📥 Loading sources from '{}'...", config.input_path);
    let ctx = PipelineContext::load(project_dir, config)?;

    // 2. REPORTS (in memory)
    println!("🧠 Building reports...");
    let cleaned_engine = ctx.cleaned_engine()?;
    let raw_engine = ctx.raw_engine()?;

    let mut reports: Vec<Report> = stages::transform_reports(&ctx);
    reports.extend(stages::analytics_reports(&ctx, config)?);
    reports.extend(stages::sql_reports(&cleaned_engine, config)?);
    reports.extend(stages::quality_reports(&cleaned_engine, &raw_engine)?);

    // 3. WRITE
    let output_dir = project_dir.join(&config.output_path);
    let reporter = CsvReporter::new(&output_dir);

    let mut results = Vec::with_capacity(Stage::ALL.len());
    for stage in Stage::ALL {
        println!("  🔹 {} -> {}/", stage.label(), stage.dir());
        let mut files = Vec::new();
        for report in reports.iter().filter(|r| r.stage == stage) {
            let relative = report.relative_path();
            reporter.write(&relative, &report.table)?;
            println!("    ✅ {} ({} rows)", relative, report.table.len());
            files.push(relative);
        }
        results.push(StageResult {
            stage,
            dir: stage.dir(),
            files,
        });
    }

    let result = RunResult {
        project: config.name.clone(),
        cleaning: ctx.summary,
        stages: results,
        output_dir,
    };
    reporter.write_json(RUN_REPORT_FILE, &result)?;

    let duration = start_time.elapsed();
    info!(files = result.files_written(), "Pipeline finished");
    println!(
        "✨ Done in {:.2}s. Wrote {} reports.",
        duration.as_secs_f64(),
        result.files_written()
    );

    Ok(result)
}
