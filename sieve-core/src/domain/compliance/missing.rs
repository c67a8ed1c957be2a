// sieve-core/src/domain/compliance/missing.rs

use crate::domain::model::RawCustomer;

/// Raw customer rows with at least one absent field, audited before the
/// cleaners fill or drop anything.
pub fn customers_with_missing(raw: &[RawCustomer]) -> Vec<RawCustomer> {
    raw.iter().filter(|c| c.has_missing_field()).cloned().collect()
}
