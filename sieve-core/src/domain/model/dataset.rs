// sieve-core/src/domain/model/dataset.rs

use serde::{Deserialize, Serialize};

use crate::domain::cleaning::{CleaningReport, clean_customers, clean_products, clean_transactions};
use crate::domain::model::entities::{Customer, Product, Transaction};
use crate::domain::model::raw::{RawCustomer, RawProduct, RawTransaction};

/// The three sources as loaded, before any rule is applied.
#[derive(Debug, Clone, Default)]
pub struct RawDataset {
    pub customers: Vec<RawCustomer>,
    pub products: Vec<RawProduct>,
    pub transactions: Vec<RawTransaction>,
}

#[derive(Debug, Clone, Default)]
pub struct CleanedDataset {
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub transactions: Vec<Transaction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CleaningSummary {
    pub customers: CleaningReport,
    pub products: CleaningReport,
    pub transactions: CleaningReport,
}

impl CleanedDataset {
    pub fn from_raw(raw: &RawDataset) -> (Self, CleaningSummary) {
        let (customers, customers_report) = clean_customers(&raw.customers);
        let (products, products_report) = clean_products(&raw.products);
        let (transactions, transactions_report) = clean_transactions(&raw.transactions);

        (
            Self {
                customers,
                products,
                transactions,
            },
            CleaningSummary {
                customers: customers_report,
                products: products_report,
                transactions: transactions_report,
            },
        )
    }
}
