// sieve-core/src/application/mod.rs

pub mod clean;
pub mod context;
pub mod engine;
pub mod pipeline;
pub mod sql;
pub mod stages;

// --- RE-EXPORTS (FACADE PATTERN) ---
// `use sieve_core::application::{run_pipeline, clean_project};`

pub use clean::clean_project;
pub use context::PipelineContext;
pub use engine::{execute_query, query_project};
pub use pipeline::{RunResult, run_pipeline};
pub use stages::{Report, Stage};
