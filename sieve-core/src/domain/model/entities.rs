// sieve-core/src/domain/model/entities.rs
//
// Cleaned entities. Built only by the cleaners in `domain::cleaning`.

use chrono::NaiveDate;

use crate::domain::table::{DataType, Record, Value};

pub(crate) fn iso_date(date: Option<NaiveDate>) -> Value {
    match date {
        Some(d) => Value::Text(d.format("%Y-%m-%d").to_string()),
        None => Value::Null,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub customer_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Never absent: defaults to "Unknown".
    pub region: String,
    pub signup_date: Option<NaiveDate>,
}

impl Record for Customer {
    const FIELDS: &'static [(&'static str, DataType)] = &[
        ("customer_id", DataType::Text),
        ("first_name", DataType::Text),
        ("last_name", DataType::Text),
        ("region", DataType::Text),
        ("signup_date", DataType::Text),
    ];

    fn to_row(&self) -> Vec<Value> {
        vec![
            Value::text(self.customer_id.as_deref()),
            Value::text(self.first_name.as_deref()),
            Value::text(self.last_name.as_deref()),
            Value::Text(self.region.clone()),
            iso_date(self.signup_date),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub category: Option<String>,
    pub stock_quantity: i64,
    pub cost_price: f64,
}

impl Record for Product {
    const FIELDS: &'static [(&'static str, DataType)] = &[
        ("product_id", DataType::Text),
        ("product_name", DataType::Text),
        ("category", DataType::Text),
        ("stock_quantity", DataType::Integer),
        ("cost_price", DataType::Float),
    ];

    fn to_row(&self) -> Vec<Value> {
        vec![
            Value::text(self.product_id.as_deref()),
            Value::text(self.product_name.as_deref()),
            Value::text(self.category.as_deref()),
            Value::Integer(self.stock_quantity),
            Value::Float(self.cost_price),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub transaction_id: Option<String>,
    pub customer_id: Option<String>,
    pub product_id: Option<String>,
    pub quantity: i64,
    pub price: f64,
    pub transaction_date: Option<NaiveDate>,
    pub store_id: Option<String>,
}

impl Transaction {
    pub fn revenue(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

impl Record for Transaction {
    const FIELDS: &'static [(&'static str, DataType)] = &[
        ("transaction_id", DataType::Text),
        ("customer_id", DataType::Text),
        ("product_id", DataType::Text),
        ("quantity", DataType::Integer),
        ("price", DataType::Float),
        ("transaction_date", DataType::Text),
        ("store_id", DataType::Text),
    ];

    fn to_row(&self) -> Vec<Value> {
        vec![
            Value::text(self.transaction_id.as_deref()),
            Value::text(self.customer_id.as_deref()),
            Value::text(self.product_id.as_deref()),
            Value::Integer(self.quantity),
            Value::Float(self.price),
            iso_date(self.transaction_date),
            Value::text(self.store_id.as_deref()),
        ]
    }
}
