// sieve-core/src/application/engine.rs

use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, instrument};

use crate::application::context::PipelineContext;
use crate::domain::project::ProjectConfig;
use crate::domain::table::Table;
use crate::error::SieveError;
use crate::ports::connector::Connector;

/// Runs a query through `connector`, logging its duration.
#[instrument(skip(connector), fields(engine = connector.engine_name(), query.len = query.len()))]
pub fn execute_query(connector: &dyn Connector, query: &str) -> Result<Table, SieveError> {
    let start = Instant::now();
    debug!("⚡ Executing Query: {}", query);

    let result = connector.query(query);
    let duration = start.elapsed();

    match result {
        Ok(table) => {
            debug!(rows = table.len(), "✅ Query finished in {:.2?}", duration);
            Ok(table)
        }
        Err(e) => {
            error!("❌ Query failed after {:.2?}: {}", duration, e);
            Err(e)
        }
    }
}

/// Ad-hoc SQL over the cleaned `customers`, `products` and `transactions`
/// tables of a project.
pub fn query_project(
    project_dir: &Path,
    config: &ProjectConfig,
    query: &str,
) -> Result<Table, SieveError> {
    let ctx = PipelineContext::load(project_dir, config)?;
    let engine = ctx.cleaned_engine()?;
    execute_query(&engine, query)
}
