// sieve-core/src/application/context.rs

use std::path::Path;
use tracing::{info, instrument};

use crate::domain::model::{CleanedDataset, CleaningSummary, RawDataset};
use crate::domain::project::ProjectConfig;
use crate::domain::table::Table;
use crate::error::SieveError;
use crate::infrastructure::adapters::DuckDBConnector;
use crate::infrastructure::source::load_raw_dataset;

pub const CUSTOMERS_TABLE: &str = "customers";
pub const PRODUCTS_TABLE: &str = "products";
pub const TRANSACTIONS_TABLE: &str = "transactions";

/// Raw and cleaned snapshots of one run. Built once; every stage reads from
/// it and nothing re-reads the source files.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    pub raw: RawDataset,
    pub cleaned: CleanedDataset,
    pub summary: CleaningSummary,
}

impl PipelineContext {
    pub fn new(raw: RawDataset) -> Self {
        let (cleaned, summary) = CleanedDataset::from_raw(&raw);
        Self {
            raw,
            cleaned,
            summary,
        }
    }

    #[instrument(skip_all, fields(project = %config.name))]
    pub fn load(project_dir: &Path, config: &ProjectConfig) -> Result<Self, SieveError> {
        let raw = load_raw_dataset(project_dir, config)?;
        let ctx = Self::new(raw);
        info!(
            customers = ctx.cleaned.customers.len(),
            products = ctx.cleaned.products.len(),
            transactions = ctx.cleaned.transactions.len(),
            "Snapshots cleaned"
        );
        Ok(ctx)
    }

    pub fn raw_tables(&self) -> [Table; 3] {
        [
            Table::from_records(CUSTOMERS_TABLE, &self.raw.customers),
            Table::from_records(PRODUCTS_TABLE, &self.raw.products),
            Table::from_records(TRANSACTIONS_TABLE, &self.raw.transactions),
        ]
    }

    pub fn cleaned_tables(&self) -> [Table; 3] {
        [
            Table::from_records(CUSTOMERS_TABLE, &self.cleaned.customers),
            Table::from_records(PRODUCTS_TABLE, &self.cleaned.products),
            Table::from_records(TRANSACTIONS_TABLE, &self.cleaned.transactions),
        ]
    }

    /// In-memory engine holding the raw snapshot (all columns text).
    pub fn raw_engine(&self) -> Result<DuckDBConnector, SieveError> {
        let [customers, products, transactions] = self.raw_tables();
        DuckDBConnector::with_tables(&[&customers, &products, &transactions])
    }

    /// In-memory engine holding the cleaned snapshot.
    pub fn cleaned_engine(&self) -> Result<DuckDBConnector, SieveError> {
        let [customers, products, transactions] = self.cleaned_tables();
        DuckDBConnector::with_tables(&[&customers, &products, &transactions])
    }
}
