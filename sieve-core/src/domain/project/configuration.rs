// sieve-core/src/domain/project/configuration.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Project settings, read from `sieve.yaml` when present.
/// Every field has a default, so a bare data directory runs as-is.
#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct ProjectConfig {
    #[serde(default = "default_name")]
    #[validate(length(min = 1, message = "Project name cannot be empty"))]
    pub name: String,

    #[serde(rename = "input-path", default = "default_input_path")]
    #[validate(length(min = 1))]
    pub input_path: String,

    #[serde(rename = "output-path", default = "default_output_path")]
    #[validate(length(min = 1))]
    pub output_path: String,

    #[serde(default)]
    #[validate(nested)]
    pub sources: SourcesConfig,

    #[serde(default)]
    #[validate(nested)]
    pub anomaly: AnomalyConfig,

    #[serde(default)]
    #[validate(nested)]
    pub reports: ReportsConfig,

    #[serde(rename = "clean-targets", default = "default_clean_targets")]
    pub clean_targets: Vec<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            input_path: default_input_path(),
            output_path: default_output_path(),
            sources: SourcesConfig::default(),
            anomaly: AnomalyConfig::default(),
            reports: ReportsConfig::default(),
            clean_targets: default_clean_targets(),
        }
    }
}

/// File names of the three inputs, relative to `input-path`.
#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct SourcesConfig {
    #[serde(default = "default_customers")]
    #[validate(length(min = 1))]
    pub customers: String,
    #[serde(default = "default_products")]
    #[validate(length(min = 1))]
    pub products: String,
    #[serde(default = "default_transactions")]
    #[validate(length(min = 1))]
    pub transactions: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            customers: default_customers(),
            products: default_products(),
            transactions: default_transactions(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct AnomalyConfig {
    #[serde(rename = "z-threshold", default = "default_z_threshold")]
    #[validate(range(exclusive_min = 0.0, message = "z-threshold must be positive"))]
    pub z_threshold: f64,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            z_threshold: default_z_threshold(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Validate)]
pub struct ReportsConfig {
    #[serde(rename = "top-products", default = "default_top_products")]
    #[validate(range(min = 1))]
    pub top_products: usize,

    #[serde(rename = "top-regions", default = "default_top_regions")]
    #[validate(range(min = 1))]
    pub top_regions: usize,

    /// Products whose average-price margin is below this percentage are
    /// listed in the low-margin report.
    #[serde(rename = "low-margin-percent", default = "default_low_margin_percent")]
    pub low_margin_percent: f64,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            top_products: default_top_products(),
            top_regions: default_top_regions(),
            low_margin_percent: default_low_margin_percent(),
        }
    }
}

fn default_name() -> String {
    "retail".to_string()
}
fn default_input_path() -> String {
    "Preprocessed Datasets".to_string()
}
fn default_output_path() -> String {
    "output".to_string()
}
fn default_clean_targets() -> Vec<String> {
    vec!["output".to_string()]
}
fn default_customers() -> String {
    "customer_dataset.csv".to_string()
}
fn default_products() -> String {
    "product_dataset.csv".to_string()
}
fn default_transactions() -> String {
    "transaction_dataset.csv".to_string()
}
fn default_z_threshold() -> f64 {
    3.0
}
fn default_top_products() -> usize {
    5
}
fn default_top_regions() -> usize {
    3
}
fn default_low_margin_percent() -> f64 {
    10.0
}
