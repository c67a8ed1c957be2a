// sieve-core/src/domain/model/raw.rs
//
// Raw snapshots, exactly as loaded: every cell is an optional string.

use serde::{Deserialize, Deserializer};

use crate::domain::table::{DataType, Record, Value};

/// Cells that load as "absent", in line with what spreadsheet exports and
/// pandas-style tooling write for missing values.
const NA_TOKENS: [&str; 10] = [
    "NA", "N/A", "NaN", "nan", "null", "NULL", "None", "<NA>", "#N/A", "-NaN",
];

pub fn is_na(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || NA_TOKENS.contains(&trimmed)
}

// No `default` on purpose: a column missing from the header must fail the load.
fn na_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|v| !is_na(v)))
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RawCustomer {
    #[serde(deserialize_with = "na_string")]
    pub customer_id: Option<String>,
    #[serde(deserialize_with = "na_string")]
    pub first_name: Option<String>,
    #[serde(deserialize_with = "na_string")]
    pub last_name: Option<String>,
    #[serde(deserialize_with = "na_string")]
    pub region: Option<String>,
    #[serde(deserialize_with = "na_string")]
    pub signup_date: Option<String>,
}

impl RawCustomer {
    pub fn has_missing_field(&self) -> bool {
        self.customer_id.is_none()
            || self.first_name.is_none()
            || self.last_name.is_none()
            || self.region.is_none()
            || self.signup_date.is_none()
    }
}

impl Record for RawCustomer {
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
            Value::text(self.region.as_deref()),
            Value::text(self.signup_date.as_deref()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RawProduct {
    #[serde(deserialize_with = "na_string")]
    pub product_id: Option<String>,
    #[serde(deserialize_with = "na_string")]
    pub product_name: Option<String>,
    #[serde(deserialize_with = "na_string")]
    pub category: Option<String>,
    #[serde(deserialize_with = "na_string")]
    pub stock_quantity: Option<String>,
    #[serde(deserialize_with = "na_string")]
    pub cost_price: Option<String>,
}

impl Record for RawProduct {
    const FIELDS: &'static [(&'static str, DataType)] = &[
        ("product_id", DataType::Text),
        ("product_name", DataType::Text),
        ("category", DataType::Text),
        ("stock_quantity", DataType::Text),
        ("cost_price", DataType::Text),
    ];

    fn to_row(&self) -> Vec<Value> {
        vec![
            Value::text(self.product_id.as_deref()),
            Value::text(self.product_name.as_deref()),
            Value::text(self.category.as_deref()),
            Value::text(self.stock_quantity.as_deref()),
            Value::text(self.cost_price.as_deref()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RawTransaction {
    #[serde(deserialize_with = "na_string")]
    pub transaction_id: Option<String>,
    #[serde(deserialize_with = "na_string")]
    pub customer_id: Option<String>,
    #[serde(deserialize_with = "na_string")]
    pub product_id: Option<String>,
    #[serde(deserialize_with = "na_string")]
    pub quantity: Option<String>,
    #[serde(deserialize_with = "na_string")]
    pub price: Option<String>,
    #[serde(deserialize_with = "na_string")]
    pub transaction_date: Option<String>,
    #[serde(deserialize_with = "na_string")]
    pub store_id: Option<String>,
}

impl Record for RawTransaction {
    const FIELDS: &'static [(&'static str, DataType)] = &[
        ("transaction_id", DataType::Text),
        ("customer_id", DataType::Text),
        ("product_id", DataType::Text),
        ("quantity", DataType::Text),
        ("price", DataType::Text),
        ("transaction_date", DataType::Text),
        ("store_id", DataType::Text),
    ];

    fn to_row(&self) -> Vec<Value> {
        vec![
            Value::text(self.transaction_id.as_deref()),
            Value::text(self.customer_id.as_deref()),
            Value::text(self.product_id.as_deref()),
            Value::text(self.quantity.as_deref()),
            Value::text(self.price.as_deref()),
            Value::text(self.transaction_date.as_deref()),
            Value::text(self.store_id.as_deref()),
        ]
    }
}
