// sieve-core/src/domain/model/fact.rs

use chrono::NaiveDate;

use crate::domain::model::entities::iso_date;
use crate::domain::table::{DataType, Record, Value};

/// One row of the central transaction-fact table.
#[derive(Debug, Clone, PartialEq)]
pub struct CentralTransaction {
    pub transaction_id: Option<String>,
    pub customer_id: Option<String>,
    pub customer_name: String,
    pub product_id: Option<String>,
    pub product_name: String,
    pub category: String,
    pub quantity: i64,
    pub price: f64,
    pub transaction_date: Option<NaiveDate>,
    pub store_id: Option<String>,
    pub profit: f64,
}

impl Record for CentralTransaction {
    const FIELDS: &'static [(&'static str, DataType)] = &[
        ("transaction_id", DataType::Text),
        ("customer_id", DataType::Text),
        ("customer_name", DataType::Text),
        ("product_id", DataType::Text),
        ("product_name", DataType::Text),
        ("category", DataType::Text),
        ("quantity", DataType::Integer),
        ("price", DataType::Float),
        ("transaction_date", DataType::Text),
        ("store_id", DataType::Text),
        ("profit", DataType::Float),
    ];

    fn to_row(&self) -> Vec<Value> {
        vec![
            Value::text(self.transaction_id.as_deref()),
            Value::text(self.customer_id.as_deref()),
            Value::Text(self.customer_name.clone()),
            Value::text(self.product_id.as_deref()),
            Value::Text(self.product_name.clone()),
            Value::Text(self.category.clone()),
            Value::Integer(self.quantity),
            Value::Float(self.price),
            iso_date(self.transaction_date),
            Value::text(self.store_id.as_deref()),
            Value::Float(self.profit),
        ]
    }
}
