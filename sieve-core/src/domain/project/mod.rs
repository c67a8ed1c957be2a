// sieve-core/src/domain/project/mod.rs

pub mod configuration;
pub use configuration::{AnomalyConfig, ProjectConfig, ReportsConfig, SourcesConfig};
