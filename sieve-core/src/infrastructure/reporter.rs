// sieve-core/src/infrastructure/reporter.rs

use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

use crate::domain::table::Table;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::fs::atomic_write;

/// Writes report tables as comma-delimited UTF-8 files under `root`.
pub struct CsvReporter {
    root: PathBuf,
}

impl CsvReporter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Renders `table` (header row first) without touching the disk.
    pub fn render(table: &Table) -> Result<Vec<u8>, InfrastructureError> {
        let to_err = |source| InfrastructureError::Csv {
            path: table.name.clone(),
            source,
        };

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(table.column_names()).map_err(to_err)?;
        for row in &table.rows {
            writer
                .write_record(row.iter().map(|v| v.to_string()))
                .map_err(to_err)?;
        }

        writer
            .into_inner()
            .map_err(|e| InfrastructureError::Io(e.into_error()))
    }

    /// Writes `table` to `<root>/<relative>`, returning the full path.
    pub fn write(&self, relative: &str, table: &Table) -> Result<PathBuf, InfrastructureError> {
        let path = self.root.join(relative);
        atomic_write(&path, Self::render(table)?)?;
        debug!(path = %path.display(), rows = table.len(), "Report written");
        Ok(path)
    }

    pub fn write_json<T: Serialize>(
        &self,
        relative: &str,
        value: &T,
    ) -> Result<PathBuf, InfrastructureError> {
        let path = self.root.join(relative);
        let content = serde_json::to_string_pretty(value)?;
        atomic_write(&path, content)?;
        Ok(path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::table::{DataType, Field, Value};
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    fn table() -> Table {
        let mut t = Table::new(
            "revenue",
            vec![
                Field::new("category", DataType::Text),
                Field::new("total_revenue", DataType::Float),
            ],
        );
        t.push_row(vec![Value::Text("Tools, Hand".into()), Value::Float(23.5)])
            .unwrap();
        t.push_row(vec![Value::Null, Value::Float(10.0)]).unwrap();
        t
    }

    #[test]
    fn test_render_quotes_and_formats() -> Result<()> {
        let bytes = CsvReporter::render(&table())?;
        assert_eq!(
            String::from_utf8(bytes)?,
            "category,total_revenue\n\"Tools, Hand\",23.5\n,10.0\n"
        );
        Ok(())
    }

    #[test]
    fn test_empty_table_keeps_header() -> Result<()> {
        let empty = Table::new("empty", table().fields);
        assert_eq!(
            String::from_utf8(CsvReporter::render(&empty)?)?,
            "category,total_revenue\n"
        );
        Ok(())
    }

    #[test]
    fn test_write_creates_stage_directory() -> Result<()> {
        let dir = tempdir()?;
        let reporter = CsvReporter::new(dir.path().join("output"));

        let path = reporter.write("task3/revenue_by_category.csv", &table())?;

        assert!(path.ends_with("output/task3/revenue_by_category.csv"));
        assert!(fs::read_to_string(path)?.starts_with("category,total_revenue\n"));
        Ok(())
    }
}
