// sieve-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Column '{column}' not found in table '{table}'")]
    #[diagnostic(
        code(sieve::domain::column_not_found),
        help("Check the column names declared by the record schema.")
    )]
    ColumnNotFound { table: String, column: String },

    #[error("Row width mismatch in table '{table}': expected {expected} values, got {actual}")]
    #[diagnostic(code(sieve::domain::row_width))]
    RowWidth {
        table: String,
        expected: usize,
        actual: usize,
    },

    #[error("Schema Error: {0}")]
    #[diagnostic(code(sieve::domain::schema))]
    SchemaError(String),
}
