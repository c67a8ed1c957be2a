// sieve-core/src/application/clean.rs

use std::fs;
use std::path::{Component, Path};

use crate::error::SieveError;
use crate::infrastructure::config::project::load_project_config;

/// Relative, and never climbing out of the project directory.
fn is_contained(target: &Path) -> bool {
    target
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Removes the configured clean targets (the output directory by default).
/// Returns the targets that existed and were removed.
pub fn clean_project(project_dir: &Path) -> Result<Vec<String>, SieveError> {
    tracing::info!("🧹 Initializing sieve cleanup sequence...");

    let config = load_project_config(project_dir)?;

    let targets = if config.clean_targets.is_empty() {
        vec![config.output_path.clone()]
    } else {
        config.clean_targets
    };

    let mut removed = Vec::new();
    for target_rel_path in targets {
        // Zero-Trust Path Traversal Guard
        if !is_contained(Path::new(&target_rel_path)) {
            return Err(SieveError::UnsafePath(target_rel_path));
        }
        let full_path = project_dir.join(&target_rel_path);

        if full_path.exists() {
            if full_path.is_dir() {
                fs::remove_dir_all(&full_path)?;
            } else {
                fs::remove_file(&full_path)?;
            }
            println!("   🗑️  Artifact removed: {}", target_rel_path);
            removed.push(target_rel_path);
        }
    }

    Ok(removed)
}
