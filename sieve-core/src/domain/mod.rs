// sieve-core/src/domain/mod.rs

pub mod aggregate;
pub mod cleaning;
pub mod compliance;
pub mod error;
pub mod model;
pub mod project;
pub mod table;
pub mod transform;

// Handy re-exports to keep imports short elsewhere
pub use error::DomainError;
pub use table::{DataType, Field, Record, Table, Value};
