// sieve-core/src/application/stages.rs

use serde::Serialize;
use tracing::instrument;

use crate::application::context::PipelineContext;
use crate::application::engine::execute_query;
use crate::application::sql::{self, ReportShape, SqlReport};
use crate::domain::aggregate;
use crate::domain::compliance::{customers_with_missing, detect_anomalies};
use crate::domain::project::ProjectConfig;
use crate::domain::table::Table;
use crate::domain::transform::build_central_transactions;
use crate::error::SieveError;
use crate::ports::connector::Connector;

/// Output groups, one directory each under the output root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Transform,
    Analytics,
    SqlReports,
    Quality,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::Transform,
        Stage::Analytics,
        Stage::SqlReports,
        Stage::Quality,
    ];

    pub fn dir(self) -> &'static str {
        match self {
            Stage::Transform => "task2",
            Stage::Analytics => "task3",
            Stage::SqlReports => "task4",
            Stage::Quality => "task5",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::Transform => "Transform",
            Stage::Analytics => "Analytics",
            Stage::SqlReports => "SQL reports",
            Stage::Quality => "Quality & summary",
        }
    }
}

/// A finished report table. `table.name` is the file stem.
#[derive(Debug, Clone)]
pub struct Report {
    pub stage: Stage,
    pub table: Table,
}

impl Report {
    pub fn new(stage: Stage, table: Table) -> Self {
        Self { stage, table }
    }

    pub fn relative_path(&self) -> String {
        format!("{}/{}.csv", self.stage.dir(), self.table.name)
    }
}

/// Runs one catalogue entry and shapes the result for writing.
pub fn run_sql_report(connector: &dyn Connector, report: &SqlReport) -> Result<Table, SieveError> {
    let mut result = execute_query(connector, &report.sql)?;
    match report.shape {
        ReportShape::Rows => {
            result.name = report.name.to_string();
            Ok(result)
        }
        ReportShape::Metrics => Ok(sql::transpose_metrics(report.name, &result)?),
    }
}

fn run_catalogue(
    stage: Stage,
    connector: &dyn Connector,
    catalogue: &[SqlReport],
) -> Result<Vec<Report>, SieveError> {
    catalogue
        .iter()
        .map(|report| run_sql_report(connector, report).map(|table| Report::new(stage, table)))
        .collect()
}

#[instrument(skip_all)]
pub fn transform_reports(ctx: &PipelineContext) -> Vec<Report> {
    let cleaned = &ctx.cleaned;
    let facts =
        build_central_transactions(&cleaned.transactions, &cleaned.customers, &cleaned.products);

    vec![
        Report::new(
            Stage::Transform,
            Table::from_records("cleaned_transactions", &facts),
        ),
        Report::new(
            Stage::Transform,
            Table::from_records(
                "aggregated_stock",
                &aggregate::aggregated_stock(&cleaned.products),
            ),
        ),
    ]
}

#[instrument(skip_all)]
pub fn analytics_reports(
    ctx: &PipelineContext,
    config: &ProjectConfig,
) -> Result<Vec<Report>, SieveError> {
    let cleaned = &ctx.cleaned;
    let threshold = config.anomaly.z_threshold;

    let tables = vec![
        Table::from_records(
            "transactions_per_region",
            &aggregate::transactions_per_region(&cleaned.transactions, &cleaned.customers),
        ),
        Table::from_records(
            "revenue_by_category",
            &aggregate::revenue_by_category(&cleaned.transactions, &cleaned.products),
        ),
        Table::from_records(
            "top_products",
            &aggregate::top_products(
                &cleaned.transactions,
                &cleaned.products,
                config.reports.top_products,
            ),
        ),
        Table::from_records(
            "customers_with_missing_before",
            &customers_with_missing(&ctx.raw.customers),
        ),
        detect_anomalies(
            "quantity_anomalies",
            &cleaned.transactions,
            "quantity",
            threshold,
        )?,
        detect_anomalies("price_anomalies", &cleaned.transactions, "price", threshold)?,
    ];

    Ok(tables
        .into_iter()
        .map(|t| Report::new(Stage::Analytics, t))
        .collect())
}

#[instrument(skip_all)]
pub fn sql_reports(
    cleaned_engine: &dyn Connector,
    config: &ProjectConfig,
) -> Result<Vec<Report>, SieveError> {
    run_catalogue(
        Stage::SqlReports,
        cleaned_engine,
        &sql::business_reports(&config.reports),
    )
}

/// Summaries run on the cleaned snapshot, validations on the raw one.
#[instrument(skip_all)]
pub fn quality_reports(
    cleaned_engine: &dyn Connector,
    raw_engine: &dyn Connector,
) -> Result<Vec<Report>, SieveError> {
    let mut reports = run_catalogue(Stage::Quality, cleaned_engine, &sql::summary_reports())?;
    reports.extend(run_catalogue(
        Stage::Quality,
        raw_engine,
        &sql::validation_reports(),
    )?);
    Ok(reports)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::domain::model::{RawDataset, RawProduct, RawTransaction};
    use crate::domain::table::Value;
    use anyhow::Result;

    fn raw_product(id: &str, category: &str, stock: &str, cost: &str) -> RawProduct {
        RawProduct {
            product_id: Some(id.into()),
            product_name: Some(format!("item {id}")),
            category: Some(category.into()),
            stock_quantity: Some(stock.into()),
            cost_price: Some(cost.into()),
        }
    }

    fn raw_tx(id: &str, product: &str, qty: &str, price: &str) -> RawTransaction {
        RawTransaction {
            transaction_id: Some(id.into()),
            customer_id: Some("1".into()),
            product_id: Some(product.into()),
            quantity: Some(qty.into()),
            price: Some(price.into()),
            transaction_date: Some("2023-01-01".into()),
            store_id: Some("S1".into()),
        }
    }

    fn context() -> PipelineContext {
        PipelineContext::new(RawDataset {
            customers: vec![],
            products: vec![
                raw_product("1", "tools", "5", "1.0"),
                raw_product("2", "toys", "-3", "2.0"),
                raw_product("3", "tools", "1", "0.5"),
            ],
            transactions: vec![
                raw_tx("a", "1", "2", "3.25"),
                raw_tx("b", "2", "1", "4.1"),
                raw_tx("c", "3", "7", "0.3"),
                raw_tx("d", "404", "1", "9.0"),
                raw_tx("e", "2", "abc", "1.0"),
            ],
        })
    }

    #[test]
    fn test_stage_directories() {
        let dirs: Vec<&str> = Stage::ALL.iter().map(|s| s.dir()).collect();
        assert_eq!(dirs, vec!["task2", "task3", "task4", "task5"]);
        let report = Report::new(Stage::SqlReports, Table::new("top_regions_sql", vec![]));
        assert_eq!(report.relative_path(), "task4/top_regions_sql.csv");
    }

    #[test]
    fn test_revenue_by_category_matches_sql() -> Result<()> {
        let ctx = context();
        let engine = ctx.cleaned_engine()?;

        let sql = execute_query(
            &engine,
            "SELECT p.category, SUM(t.price * t.quantity) AS total_revenue
             FROM transactions t JOIN products p ON t.product_id = p.product_id
             GROUP BY p.category ORDER BY p.category",
        )?;
        let native =
            aggregate::revenue_by_category(&ctx.cleaned.transactions, &ctx.cleaned.products);

        assert_eq!(sql.len(), native.len());
        for (row, expected) in sql.rows.iter().zip(&native) {
            assert_eq!(row[0], expected.category.value());
            let total = row[1].as_f64().expect("numeric revenue");
            assert!((total - expected.total_revenue).abs() < 1e-9);
        }
        Ok(())
    }

    #[test]
    fn test_analytics_reports_shapes() -> Result<()> {
        let ctx = context();
        let reports = analytics_reports(&ctx, &ProjectConfig::default())?;

        let names: Vec<&str> = reports.iter().map(|r| r.table.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "transactions_per_region",
                "revenue_by_category",
                "top_products",
                "customers_with_missing_before",
                "quantity_anomalies",
                "price_anomalies",
            ]
        );
        let anomalies = &reports[4].table;
        assert_eq!(anomalies.column_names().last(), Some(&"_zscore"));
        Ok(())
    }

    #[test]
    fn test_quality_reports_use_raw_snapshot() -> Result<()> {
        let ctx = context();
        let reports = quality_reports(&ctx.cleaned_engine()?, &ctx.raw_engine()?)?;

        let find = |name: &str| {
            reports
                .iter()
                .find(|r| r.table.name == name)
                .map(|r| &r.table)
                .expect("report present")
        };

        // Cleaned products never go negative, the raw ones still do.
        let negative = find("negative_stock_validation");
        assert_eq!(negative.len(), 1);
        assert_eq!(negative.rows[0][0], Value::Text("2".into()));

        let counts = find("record_count");
        assert_eq!(
            counts.rows[0],
            vec![Value::Integer(0), Value::Integer(3), Value::Integer(4)]
        );

        let summary = find("avg_rng_cols");
        assert_eq!(summary.len(), 8);
        assert_eq!(summary.rows[0][1], Value::Float(4.0));
        Ok(())
    }
}
