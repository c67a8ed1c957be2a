// sieve-core/src/infrastructure/adapters/mod.rs

pub mod duckdb;

pub use self::duckdb::DuckDBConnector;
