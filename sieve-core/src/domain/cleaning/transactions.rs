// sieve-core/src/domain/cleaning/transactions.rs

use tracing::debug;

use crate::domain::cleaning::{
    CleaningReport, coerce_number, dedup_by_key, normalize_key, parse_date,
};
use crate::domain::model::{RawTransaction, Transaction};

/// Transaction rules:
/// - drop duplicate `transaction_id` (first occurrence wins)
/// - drop rows whose `quantity` or `price` is missing or not numeric
/// - `quantity` truncated to an integer; non-positive quantities are dropped
/// - `transaction_date` -> ISO date, unparseable -> absent
///
/// `before_count` is taken before dedup, `after_count` after every filter.
pub fn clean_transactions(raw: &[RawTransaction]) -> (Vec<Transaction>, CleaningReport) {
    let before_count = raw.len();

    let cleaned: Vec<Transaction> = dedup_by_key(raw, |t| t.transaction_id.as_deref())
        .into_iter()
        .filter_map(|t| {
            let quantity = coerce_number(t.quantity.as_deref())?.trunc() as i64;
            let price = coerce_number(t.price.as_deref())?;
            if quantity <= 0 {
                return None;
            }
            Some(Transaction {
                transaction_id: normalize_key(t.transaction_id.as_deref()),
                customer_id: normalize_key(t.customer_id.as_deref()),
                product_id: normalize_key(t.product_id.as_deref()),
                quantity,
                price,
                transaction_date: parse_date(t.transaction_date.as_deref()),
                store_id: normalize_key(t.store_id.as_deref()),
            })
        })
        .collect();

    let report = CleaningReport {
        before_count,
        after_count: cleaned.len(),
    };
    debug!(?report, "transactions cleaned");
    (cleaned, report)
}
