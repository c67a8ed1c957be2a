// sieve-core/src/infrastructure/mod.rs

pub mod adapters;
pub mod config;
pub mod error;
pub mod fs;
pub mod reporter;
pub mod source;

pub use adapters::DuckDBConnector;
pub use reporter::CsvReporter;
