// sieve-core/src/application/sql.rs
//
// SQL report catalogue. Every ordering carries the group key as a
// secondary sort so reruns write byte-identical files.

use crate::domain::error::DomainError;
use crate::domain::project::ReportsConfig;
use crate::domain::table::{DataType, Field, Table, Value};

/// Row-shaped reports are written as returned. Metric reports are a single
/// aggregate row, transposed to `metric,value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportShape {
    Rows,
    Metrics,
}

#[derive(Debug, Clone)]
pub struct SqlReport {
    pub name: &'static str,
    pub sql: String,
    pub shape: ReportShape,
}

impl SqlReport {
    fn rows(name: &'static str, sql: impl Into<String>) -> Self {
        Self {
            name,
            sql: sql.into(),
            shape: ReportShape::Rows,
        }
    }

    fn metrics(name: &'static str, sql: impl Into<String>) -> Self {
        Self {
            name,
            sql: sql.into(),
            shape: ReportShape::Metrics,
        }
    }
}

/// Business reports over the cleaned `customers`, `products` and
/// `transactions` tables.
pub fn business_reports(reports: &ReportsConfig) -> Vec<SqlReport> {
    vec![
        SqlReport::rows(
            "transactions_per_store_sql",
            "SELECT store_id, COUNT(*) AS num_transactions
             FROM transactions
             GROUP BY store_id
             ORDER BY num_transactions DESC, store_id ASC",
        ),
        SqlReport::rows(
            "low_margin_products_sql",
            format!(
                "SELECT * FROM (
                     SELECT p.product_id, p.product_name, p.cost_price,
                            AVG(t.price) AS avg_price,
                            ((AVG(t.price) - p.cost_price) / NULLIF(AVG(t.price), 0)) * 100 AS margin_percent
                     FROM products p
                     JOIN transactions t ON p.product_id = t.product_id
                     GROUP BY p.product_id, p.product_name, p.cost_price
                 )
                 WHERE margin_percent < {}
                 ORDER BY margin_percent ASC, product_id ASC",
                reports.low_margin_percent
            ),
        ),
        SqlReport::rows(
            "top_regions_sql",
            format!(
                "SELECT c.region, SUM(t.price * t.quantity) AS revenue
                 FROM transactions t
                 JOIN customers c ON t.customer_id = c.customer_id
                 GROUP BY c.region
                 ORDER BY revenue DESC, c.region ASC
                 LIMIT {}",
                reports.top_regions
            ),
        ),
    ]
}

/// Summary reports over the cleaned tables.
pub fn summary_reports() -> Vec<SqlReport> {
    vec![
        SqlReport::rows(
            "record_count",
            "SELECT
                 (SELECT COUNT(*) FROM customers) AS total_customers,
                 (SELECT COUNT(*) FROM products) AS total_products,
                 (SELECT COUNT(*) FROM transactions) AS total_transactions",
        ),
        SqlReport::metrics(
            "avg_rng_cols",
            "SELECT
                 COUNT(*) AS total_transactions,
                 AVG(quantity) AS avg_quantity,
                 MIN(quantity) AS min_quantity,
                 MAX(quantity) AS max_quantity,
                 AVG(price) AS avg_price,
                 MIN(price) AS min_price,
                 MAX(price) AS max_price,
                 SUM(quantity * price) AS total_revenue
             FROM transactions",
        ),
        SqlReport::metrics(
            "product_stock_summary",
            "SELECT
                 COUNT(DISTINCT product_id) AS total_products,
                 AVG(cost_price) AS avg_cost_price,
                 AVG(stock_quantity) AS avg_stock_quantity,
                 SUM(stock_quantity) AS total_stock
             FROM products",
        ),
        SqlReport::rows(
            "customer_region_summary",
            "SELECT region, COUNT(*) AS num_customers
             FROM customers
             GROUP BY region
             ORDER BY num_customers DESC, region ASC",
        ),
    ]
}

/// Checks over the raw tables (every column text, absent cells NULL).
pub fn validation_reports() -> Vec<SqlReport> {
    let duplicates = |name, table: &str, key: &str| {
        SqlReport::rows(
            name,
            format!(
                "SELECT {key}, COUNT(*) AS cnt
                 FROM {table}
                 GROUP BY {key}
                 HAVING COUNT(*) > 1
                 ORDER BY {key} ASC"
            ),
        )
    };

    vec![
        duplicates("customer_duplicates_validation", "customers", "customer_id"),
        duplicates("product_duplicates_validation", "products", "product_id"),
        duplicates("transaction_duplicates_validation", "transactions", "transaction_id"),
        SqlReport::rows(
            "missing_regions_validation",
            "SELECT COUNT(*) AS missing_regions
             FROM customers
             WHERE region IS NULL OR region = ''",
        ),
        SqlReport::rows(
            "missing_price_qty_validation",
            "SELECT COUNT(*) AS missing_price_qty
             FROM transactions
             WHERE price IS NULL OR quantity IS NULL",
        ),
        SqlReport::rows(
            "negative_stock_validation",
            "SELECT *
             FROM products
             WHERE TRY_CAST(stock_quantity AS DOUBLE) < 0",
        ),
    ]
}

/// Two decimals, exact halves to the even digit: `4.125 -> 4.12`.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Turns a one-row aggregate into `metric,value` rows, every value a float
/// rounded to two decimals.
pub fn transpose_metrics(name: &str, aggregate: &Table) -> Result<Table, DomainError> {
    let mut metrics = Table::new(
        name,
        vec![
            Field::new("metric", DataType::Text),
            Field::new("value", DataType::Float),
        ],
    );

    let Some(row) = aggregate.rows.first() else {
        return Ok(metrics);
    };
    if aggregate.len() > 1 {
        return Err(DomainError::SchemaError(format!(
            "metric report '{}' expects one row, got {}",
            name,
            aggregate.len()
        )));
    }

    for (field, value) in aggregate.fields.iter().zip(row) {
        metrics.push_row(vec![
            Value::Text(field.name.clone()),
            Value::from(value.as_f64().map(round2)),
        ])?;
    }
    Ok(metrics)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_transpose_rounds_and_floats_everything() {
        let mut aggregate = Table::new(
            "agg",
            vec![
                Field::new("total_transactions", DataType::Integer),
                Field::new("avg_price", DataType::Float),
                Field::new("avg_quantity", DataType::Float),
            ],
        );
        aggregate
            .push_row(vec![Value::Integer(5), Value::Float(10.456), Value::Null])
            .unwrap();

        let metrics = transpose_metrics("avg_rng_cols", &aggregate).unwrap();
        assert_eq!(metrics.column_names(), vec!["metric", "value"]);
        assert_eq!(
            metrics.rows,
            vec![
                vec![Value::Text("total_transactions".into()), Value::Float(5.0)],
                vec![Value::Text("avg_price".into()), Value::Float(10.46)],
                vec![Value::Text("avg_quantity".into()), Value::Null],
            ]
        );
    }

    #[test]
    fn test_round2_ties_to_even() {
        assert_eq!(round2(4.125), 4.12);
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(0.375), 0.38);
        assert_eq!(round2(26.75), 26.75);
        assert_eq!(round2(-4.125), -4.12);
    }

    #[test]
    fn test_transpose_rejects_multi_row_input() {
        let mut aggregate = Table::new("agg", vec![Field::new("n", DataType::Integer)]);
        aggregate.push_row(vec![Value::Integer(1)]).unwrap();
        aggregate.push_row(vec![Value::Integer(2)]).unwrap();
        assert!(transpose_metrics("x", &aggregate).is_err());
    }

    #[test]
    fn test_catalogue_names_are_unique() {
        let mut names: Vec<&str> = business_reports(&ReportsConfig::default())
            .iter()
            .chain(summary_reports().iter())
            .chain(validation_reports().iter())
            .map(|r| r.name)
            .collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
        assert_eq!(total, 13);
    }

    #[test]
    fn test_thresholds_are_rendered_into_sql() {
        let reports = ReportsConfig {
            top_products: 5,
            top_regions: 7,
            low_margin_percent: 12.5,
        };
        let catalogue = business_reports(&reports);
        assert!(catalogue[1].sql.contains("margin_percent < 12.5"));
        assert!(catalogue[2].sql.contains("LIMIT 7"));
    }
}
