// sieve-core/src/infrastructure/source.rs
//
// CSV sources -> raw snapshots.

use csv::{ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{info, instrument};

use crate::domain::model::{RawCustomer, RawDataset, RawProduct, RawTransaction};
use crate::domain::project::ProjectConfig;
use crate::domain::table::Record;
use crate::infrastructure::error::InfrastructureError;

fn csv_error(path: &Path, source: csv::Error) -> InfrastructureError {
    InfrastructureError::Csv {
        path: path.display().to_string(),
        source,
    }
}

/// Reads every row of `path` as `R`.
///
/// The header is checked against `R::FIELDS` before the first row is read,
/// so a missing column fails the load once, naming the file and the column.
/// Extra columns are ignored.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_records<R>(path: &Path) -> Result<Vec<R>, InfrastructureError>
where
    R: DeserializeOwned + Record,
{
    let mut reader = ReaderBuilder::new()
        .trim(Trim::Headers)
        .from_path(path)
        .map_err(|e| csv_error(path, e))?;

    let headers = reader.headers().map_err(|e| csv_error(path, e))?.clone();
    for (column, _) in R::FIELDS {
        if !headers.iter().any(|h| h == *column) {
            return Err(InfrastructureError::MissingColumn {
                path: path.display().to_string(),
                column: column.to_string(),
            });
        }
    }

    let records = reader
        .deserialize::<R>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| csv_error(path, e))?;

    info!(rows = records.len(), "Source loaded");
    Ok(records)
}

/// Loads the three configured sources from `<project>/<input-path>/`.
pub fn load_raw_dataset(
    project_dir: &Path,
    config: &ProjectConfig,
) -> Result<RawDataset, InfrastructureError> {
    let input_dir = project_dir.join(&config.input_path);

    Ok(RawDataset {
        customers: load_records::<RawCustomer>(&input_dir.join(&config.sources.customers))?,
        products: load_records::<RawProduct>(&input_dir.join(&config.sources.products))?,
        transactions: load_records::<RawTransaction>(
            &input_dir.join(&config.sources.transactions),
        )?,
    })
}
