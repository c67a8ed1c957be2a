// sieve-core/src/ports/connector.rs

// What the report stages need from a SQL engine. Implemented by the
// in-memory DuckDB adapter.

use crate::domain::table::Table;
use crate::error::SieveError;

pub trait Connector {
    fn execute(&self, query: &str) -> Result<(), SieveError>;

    /// (Re)creates `table.name` with the table's schema and inserts its rows.
    fn load_table(&self, table: &Table) -> Result<(), SieveError>;

    /// Runs a query and returns the full result set.
    fn query(&self, query: &str) -> Result<Table, SieveError>;

    fn engine_name(&self) -> &str;
}
