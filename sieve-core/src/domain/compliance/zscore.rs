// sieve-core/src/domain/compliance/zscore.rs

use serde::Serialize;

use crate::domain::error::DomainError;
use crate::domain::table::{DataType, Field, Record, Table, Value};

pub const ZSCORE_COLUMN: &str = "_zscore";

/// Running population statistics (ddof = 0) for one numeric column.
#[derive(Debug, Serialize, Clone, Default, PartialEq)]
pub struct MetricState {
    pub mean: f64,
    pub variance: f64,
    pub count: u64,
}

impl MetricState {
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        values
            .into_iter()
            .fold(MetricState::default(), |s, v| ZScoreCheck::update_state(v, Some(s)))
    }

    /// `None` on an empty column, like a NaN sigma.
    pub fn stddev(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        Some(self.variance.sqrt()).filter(|s| s.is_finite())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Outlier {
    pub index: usize,
    pub z_score: f64,
}

pub struct ZScoreCheck;

impl ZScoreCheck {
    /// Updates the rolling state with a new value using Welford's online algorithm.
    pub fn update_state(current_value: f64, state: Option<MetricState>) -> MetricState {
        let mut s = state.unwrap_or_default();
        s.count += 1;
        if s.count == 1 {
            s.mean = current_value;
            s.variance = 0.0;
        } else {
            let old_mean = s.mean;
            s.mean += (current_value - old_mean) / (s.count as f64);
            // Welford: M2_new = M2_old + (x - old_mean) * (x - new_mean)
            let prev_m2 = s.variance * (s.count - 1) as f64;
            let new_m2 = prev_m2 + (current_value - old_mean) * (current_value - s.mean);
            s.variance = new_m2 / s.count as f64;
        }
        s
    }

    /// Signed z-score of `value`. `None` when sigma is zero or undefined.
    pub fn score(value: f64, state: &MetricState) -> Option<f64> {
        let stddev = state.stddev().filter(|s| *s != 0.0)?;
        Some((value - state.mean) / stddev)
    }

    /// Indexes (and scores) of the values with `|z| > threshold`.
    /// Absent values neither feed the statistics nor get flagged.
    pub fn detect(values: &[Option<f64>], threshold: f64) -> Vec<Outlier> {
        let state = MetricState::from_values(values.iter().flatten().copied());

        values
            .iter()
            .enumerate()
            .filter_map(|(index, v)| {
                let z_score = Self::score((*v)?, &state)?;
                (z_score.abs() > threshold).then_some(Outlier { index, z_score })
            })
            .collect()
    }
}

/// Rows of `records` whose `column` is a z-score outlier, with the score
/// appended as `_zscore`. Zero or undefined sigma gives an empty table with
/// the same header.
pub fn detect_anomalies<R: Record>(
    name: &str,
    records: &[R],
    column: &str,
    threshold: f64,
) -> Result<Table, DomainError> {
    let source = Table::from_records(name, records);
    let idx = source.column_index(column)?;

    let values: Vec<Option<f64>> = source.rows.iter().map(|row| row[idx].as_f64()).collect();

    let mut fields = source.fields.clone();
    fields.push(Field::new(ZSCORE_COLUMN, DataType::Float));
    let mut anomalies = Table::new(name, fields);

    for outlier in ZScoreCheck::detect(&values, threshold) {
        let mut row = source.rows[outlier.index].clone();
        row.push(Value::Float(outlier.z_score));
        anomalies.push_row(row)?;
    }

    Ok(anomalies)
}
