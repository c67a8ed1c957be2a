// sieve-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SieveError {
    // --- DOMAIN ERRORS (schemas, report shapes) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE ERRORS (IO, CSV, SQL engine) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- APPLICATION ERRORS ---
    #[error("Unsafe path traversal detected: {0}")]
    UnsafePath(String),
}

// Manual implementation to avoid duplicate enum variant but keep ergonomics
impl From<std::io::Error> for SieveError {
    fn from(err: std::io::Error) -> Self {
        SieveError::Infrastructure(InfrastructureError::Io(err))
    }
}

impl From<duckdb::Error> for SieveError {
    fn from(err: duckdb::Error) -> Self {
        SieveError::Infrastructure(InfrastructureError::from(err))
    }
}
