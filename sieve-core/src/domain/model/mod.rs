// sieve-core/src/domain/model/mod.rs

pub mod dataset;
pub mod entities;
pub mod fact;
pub mod raw;

pub use dataset::{CleanedDataset, CleaningSummary, RawDataset};
pub use entities::{Customer, Product, Transaction};
pub use fact::CentralTransaction;
pub use raw::{RawCustomer, RawProduct, RawTransaction};
