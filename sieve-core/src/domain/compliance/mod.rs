// sieve-core/src/domain/compliance/mod.rs

pub mod missing;
pub mod zscore;

pub use missing::customers_with_missing;
pub use zscore::{MetricState, ZScoreCheck, detect_anomalies};
