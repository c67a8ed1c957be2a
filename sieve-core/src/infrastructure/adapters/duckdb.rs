// sieve-core/src/infrastructure/adapters/duckdb.rs

use chrono::{DateTime, NaiveTime};
use duckdb::types::{TimeUnit, Value as DuckValue};
use duckdb::{Config, Connection, params_from_iter};
use tracing::{debug, instrument};

use crate::domain::table::{DataType, Field, Table, Value};
use crate::error::SieveError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::connector::Connector;

/// Ephemeral, process-local DuckDB instance. Dropped with the run.
pub struct DuckDBConnector {
    conn: Connection,
}

impl DuckDBConnector {
    pub fn in_memory() -> Result<Self, InfrastructureError> {
        let conn = Connection::open_in_memory_with_flags(Config::default())?;
        Ok(Self { conn })
    }

    /// Fresh instance holding the given tables.
    pub fn with_tables(tables: &[&Table]) -> Result<Self, SieveError> {
        let connector = Self::in_memory()?;
        for table in tables {
            connector.load_table(table)?;
        }
        Ok(connector)
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn to_duck(value: &Value) -> DuckValue {
    match value {
        Value::Null => DuckValue::Null,
        Value::Integer(i) => DuckValue::BigInt(*i),
        Value::Float(f) => DuckValue::Double(*f),
        Value::Text(s) => DuckValue::Text(s.clone()),
    }
}

const SECONDS_PER_DAY: i64 = 86_400;

fn date_text(days: i32) -> Value {
    DateTime::from_timestamp(i64::from(days) * SECONDS_PER_DAY, 0)
        .map(|dt| Value::Text(dt.date_naive().format("%Y-%m-%d").to_string()))
        .unwrap_or(Value::Null)
}

fn timestamp_text(unit: TimeUnit, value: i64) -> Value {
    DateTime::from_timestamp_micros(unit.to_micros(value))
        .map(|dt| Value::Text(dt.naive_utc().to_string()))
        .unwrap_or(Value::Null)
}

fn time_text(unit: TimeUnit, value: i64) -> Value {
    let micros = unit.to_micros(value);
    let (secs, sub_micros) = (micros.div_euclid(1_000_000), micros.rem_euclid(1_000_000));
    u32::try_from(secs)
        .ok()
        .and_then(|s| NaiveTime::from_num_seconds_from_midnight_opt(s, sub_micros as u32 * 1_000))
        .map(|t| Value::Text(t.to_string()))
        .unwrap_or(Value::Null)
}

fn from_duck(value: DuckValue) -> Value {
    match value {
        DuckValue::Null => Value::Null,
        DuckValue::Boolean(b) => Value::Integer(i64::from(b)),
        DuckValue::TinyInt(i) => Value::Integer(i64::from(i)),
        DuckValue::SmallInt(i) => Value::Integer(i64::from(i)),
        DuckValue::Int(i) => Value::Integer(i64::from(i)),
        DuckValue::BigInt(i) => Value::Integer(i),
        DuckValue::HugeInt(i) => i64::try_from(i)
            .map(Value::Integer)
            .unwrap_or(Value::Float(i as f64)),
        DuckValue::UTinyInt(i) => Value::Integer(i64::from(i)),
        DuckValue::USmallInt(i) => Value::Integer(i64::from(i)),
        DuckValue::UInt(i) => Value::Integer(i64::from(i)),
        DuckValue::UBigInt(i) => i64::try_from(i)
            .map(Value::Integer)
            .unwrap_or(Value::Float(i as f64)),
        DuckValue::Float(f) => Value::Float(f64::from(f)),
        DuckValue::Double(f) => Value::Float(f),
        // Numeric literals such as `100.0` are DECIMAL in DuckDB
        DuckValue::Decimal(d) => d
            .to_string()
            .parse()
            .map(Value::Float)
            .unwrap_or(Value::Null),
        DuckValue::Text(s) => Value::Text(s),
        DuckValue::Date32(days) => date_text(days),
        DuckValue::Timestamp(unit, v) => timestamp_text(unit, v),
        DuckValue::Time64(unit, v) => time_text(unit, v),
        other => Value::Text(format!("{:?}", other)),
    }
}

impl Connector for DuckDBConnector {
    fn execute(&self, query: &str) -> Result<(), SieveError> {
        self.conn.execute_batch(query)?;
        Ok(())
    }

    #[instrument(skip(self, table), fields(table = %table.name, rows = table.len()))]
    fn load_table(&self, table: &Table) -> Result<(), SieveError> {
        let columns: Vec<String> = table
            .fields
            .iter()
            .map(|f| format!("{} {}", quote_ident(&f.name), f.data_type.sql_type()))
            .collect();
        self.execute(&format!(
            "CREATE OR REPLACE TABLE {} ({})",
            quote_ident(&table.name),
            columns.join(", ")
        ))?;

        let placeholders = vec!["?"; table.fields.len()].join(", ");
        let insert = format!(
            "INSERT INTO {} VALUES ({})",
            quote_ident(&table.name),
            placeholders
        );

        self.execute("BEGIN TRANSACTION")?;
        let inserted = self.conn.prepare(&insert).and_then(|mut stmt| {
            for row in &table.rows {
                stmt.execute(params_from_iter(row.iter().map(to_duck)))?;
            }
            Ok(())
        });
        if let Err(e) = inserted {
            // Leave the connection usable for the next load
            self.execute("ROLLBACK")?;
            return Err(e.into());
        }
        self.execute("COMMIT")?;

        debug!("table registered");
        Ok(())
    }

    fn query(&self, query: &str) -> Result<Table, SieveError> {
        let mut stmt = self.conn.prepare(query)?;
        let mut rows = stmt.query([])?;

        let names: Vec<String> = rows
            .as_ref()
            .map(|s| s.column_names())
            .unwrap_or_default();

        let mut values: Vec<Vec<Value>> = Vec::new();
        while let Some(row) = rows.next()? {
            let mut out = Vec::with_capacity(names.len());
            for i in 0..names.len() {
                out.push(from_duck(row.get::<_, DuckValue>(i)?));
            }
            values.push(out);
        }

        // Result sets carry no declared schema here: infer each column from
        // its first non-null value.
        let fields = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                let data_type = values
                    .iter()
                    .find_map(|row| row[i].data_type())
                    .unwrap_or(DataType::Text);
                Field::new(name, data_type)
            })
            .collect();

        Ok(Table {
            name: String::new(),
            fields,
            rows: values,
        })
    }

    fn engine_name(&self) -> &str {
        "duckdb"
    }
}
