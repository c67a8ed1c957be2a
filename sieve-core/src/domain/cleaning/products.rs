// sieve-core/src/domain/cleaning/products.rs

use tracing::debug;

use crate::domain::cleaning::{
    CleaningReport, coerce_number, dedup_by_key, normalize_key, normalize_text,
};
use crate::domain::model::{Product, RawProduct};

/// Product rules:
/// - drop duplicate `product_id` (first occurrence wins)
/// - trim + title-case name and category
/// - `stock_quantity`: missing -> 0, truncated to an integer, negative -> 0
/// - `cost_price`: missing -> 0.0, negative -> 0.0
pub fn clean_products(raw: &[RawProduct]) -> (Vec<Product>, CleaningReport) {
    let before_count = raw.len();

    let cleaned: Vec<Product> = dedup_by_key(raw, |p| p.product_id.as_deref())
        .into_iter()
        .map(|p| Product {
            product_id: normalize_key(p.product_id.as_deref()),
            product_name: normalize_text(p.product_name.as_deref()),
            category: normalize_text(p.category.as_deref()),
            stock_quantity: (coerce_number(p.stock_quantity.as_deref())
                .unwrap_or(0.0)
                .trunc() as i64)
                .max(0),
            cost_price: coerce_number(p.cost_price.as_deref())
                .unwrap_or(0.0)
                .max(0.0),
        })
        .collect();

    let report = CleaningReport {
        before_count,
        after_count: cleaned.len(),
    };
    debug!(?report, "products cleaned");
    (cleaned, report)
}
