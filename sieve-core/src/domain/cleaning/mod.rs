// sieve-core/src/domain/cleaning/mod.rs
//
// Deterministic normalization of the raw snapshots. Every cleaner is a pure
// function: raw records in, cleaned records + row-count report out.

pub mod customers;
pub mod dates;
pub mod products;
pub mod text;
pub mod transactions;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub use customers::clean_customers;
pub use dates::parse_date;
pub use products::clean_products;
pub use text::{normalize_text, title_case};
pub use transactions::clean_transactions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CleaningReport {
    pub before_count: usize,
    pub after_count: usize,
}

impl CleaningReport {
    pub fn dropped(&self) -> usize {
        self.before_count.saturating_sub(self.after_count)
    }
}

pub(crate) fn normalize_key(value: Option<&str>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

/// Keeps the first row of every key, in original order.
/// Absent keys are equal to each other, so at most one of them survives.
pub(crate) fn dedup_by_key<'a, T, F>(rows: &'a [T], key: F) -> Vec<&'a T>
where
    F: Fn(&T) -> Option<&str>,
{
    let mut seen: HashSet<Option<&'a str>> = HashSet::with_capacity(rows.len());
    let mut kept = Vec::with_capacity(rows.len());
    for row in rows {
        if seen.insert(key(row).map(str::trim)) {
            kept.push(row);
        }
    }
    kept
}

/// Lenient numeric parsing: anything that is not a finite number is missing.
pub fn coerce_number(value: Option<&str>) -> Option<f64> {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(Some(" 4.5 ")), Some(4.5));
        assert_eq!(coerce_number(Some("-3")), Some(-3.0));
        assert_eq!(coerce_number(Some("1e2")), Some(100.0));
        assert_eq!(coerce_number(Some("abc")), None);
        assert_eq!(coerce_number(Some("inf")), None);
        assert_eq!(coerce_number(None), None);
    }

    #[test]
    fn test_dedup_keeps_first_occurrence() {
        let rows = vec![
            (Some("1"), "a"),
            (Some(" 1"), "b"),
            (None, "c"),
            (Some("2"), "d"),
            (None, "e"),
        ];
        let kept: Vec<&str> = dedup_by_key(&rows, |r| r.0).into_iter().map(|r| r.1).collect();
        assert_eq!(kept, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_report_dropped() {
        let report = CleaningReport {
            before_count: 10,
            after_count: 7,
        };
        assert_eq!(report.dropped(), 3);
    }
}
