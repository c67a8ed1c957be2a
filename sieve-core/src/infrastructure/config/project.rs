// sieve-core/src/infrastructure/config/project.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::project::configuration::ProjectConfig;
use crate::infrastructure::error::InfrastructureError;

pub const CONFIG_CANDIDATES: [&str; 2] = ["sieve.yaml", "sieve.yml"];

fn find_main_config(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|filename| root.join(filename))
        .find(|p| p.exists())
}

/// Loads `sieve.yaml` from `project_dir`, or the defaults when the project
/// has no config file. The result is always validated.
#[instrument(skip(project_dir))]
pub fn load_project_config(project_dir: &Path) -> Result<ProjectConfig, InfrastructureError> {
    let config = match find_main_config(project_dir) {
        Some(config_path) => {
            info!(path = ?config_path, "Loading project config");
            let content = fs::read_to_string(&config_path)?;
            parse_project_config(&content)?
        }
        None => {
            info!("No sieve.yaml found, using defaults");
            ProjectConfig::default()
        }
    };

    config
        .validate()
        .map_err(|e| InfrastructureError::ConfigError(e.to_string()))?;

    Ok(config)
}

fn parse_project_config(content: &str) -> Result<ProjectConfig, InfrastructureError> {
    // An empty file deserializes to `null`, which means "all defaults".
    if content.trim().is_empty() {
        return Ok(ProjectConfig::default());
    }
    Ok(serde_yaml::from_str(content)?)
}
