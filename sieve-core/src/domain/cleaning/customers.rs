// sieve-core/src/domain/cleaning/customers.rs

use tracing::debug;

use crate::domain::cleaning::{
    CleaningReport, dedup_by_key, normalize_key, normalize_text, parse_date,
};
use crate::domain::model::{Customer, RawCustomer};

pub const UNKNOWN_REGION: &str = "Unknown";

/// Customer rules:
/// - drop duplicate `customer_id` (first occurrence wins)
/// - trim + title-case names and region
/// - absent region -> "Unknown" (before casing)
/// - `signup_date` -> ISO date, unparseable -> absent
pub fn clean_customers(raw: &[RawCustomer]) -> (Vec<Customer>, CleaningReport) {
    let before_count = raw.len();

    let cleaned: Vec<Customer> = dedup_by_key(raw, |c| c.customer_id.as_deref())
        .into_iter()
        .map(|c| Customer {
            customer_id: normalize_key(c.customer_id.as_deref()),
            first_name: normalize_text(c.first_name.as_deref()),
            last_name: normalize_text(c.last_name.as_deref()),
            region: normalize_text(Some(c.region.as_deref().unwrap_or(UNKNOWN_REGION)))
                .unwrap_or_else(|| UNKNOWN_REGION.to_string()),
            signup_date: parse_date(c.signup_date.as_deref()),
        })
        .collect();

    let report = CleaningReport {
        before_count,
        after_count: cleaned.len(),
    };
    debug!(?report, "customers cleaned");
    (cleaned, report)
}
