// sieve-core/src/infrastructure/fs.rs

use crate::infrastructure::error::InfrastructureError;
use std::fs;
use std::io::Write;
use std::path::Path;

/// Writes `content` to `path` through a sibling temp file and a rename, so a
/// report is either complete or absent. Missing parent directories are created.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    // Same directory as the target: rename never crosses filesystems.
    let mut temp_file = tempfile::NamedTempFile::new_in(parent)?;
    temp_file.write_all(content.as_ref())?;
    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_atomic_write_creates_parents() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("output").join("task2").join("report.csv");

        atomic_write(&file_path, "a,b\n1,2\n")?;

        assert_eq!(fs::read_to_string(file_path)?, "a,b\n1,2\n");
        Ok(())
    }

    #[test]
    fn test_atomic_write_replaces_previous_run() -> Result<()> {
        let dir = tempdir()?;
        let file_path = dir.path().join("report.csv");

        atomic_write(&file_path, "old\n")?;
        atomic_write(&file_path, "new\n")?;

        assert_eq!(fs::read_to_string(&file_path)?, "new\n");
        // No temp files left behind
        assert_eq!(fs::read_dir(dir.path())?.count(), 1);
        Ok(())
    }
}
