// sieve-core/src/domain/table.rs
//
// The tabular currency shared by records, the SQL engine and the reporter.

use std::cmp::Ordering;
use std::fmt;

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Text,
    Integer,
    Float,
}

impl DataType {
    pub fn sql_type(self) -> &'static str {
        match self {
            DataType::Text => "VARCHAR",
            DataType::Integer => "BIGINT",
            DataType::Float => "DOUBLE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Value {
    pub fn text(value: Option<&str>) -> Self {
        match value {
            Some(v) => Value::Text(v.to_string()),
            None => Value::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Text(s) => s.trim().parse().ok(),
            Value::Null => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Value::Null => None,
            Value::Integer(_) => Some(DataType::Integer),
            Value::Float(_) => Some(DataType::Float),
            Value::Text(_) => Some(DataType::Text),
        }
    }
}

impl From<Option<f64>> for Value {
    fn from(value: Option<f64>) -> Self {
        value.map(Value::Float).unwrap_or(Value::Null)
    }
}

/// Cell rendering used by the CSV reporter.
///
/// Integral floats keep a trailing `.0` so a float column never reads back
/// as an integer column; `NaN` renders as an empty cell like a null.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(x) if x.is_nan() => Ok(()),
            Value::Float(x) if x.is_infinite() => {
                write!(f, "{}", if *x > 0.0 { "inf" } else { "-inf" })
            }
            Value::Float(x) if x.fract() == 0.0 && x.abs() < 1e16 => write!(f, "{:.1}", x),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub data_type: DataType,
}

impl Field {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// A typed row schema. Implemented by every raw, cleaned and report record so
/// the SQL loader and the reporter never rely on loose column-name literals.
pub trait Record {
    const FIELDS: &'static [(&'static str, DataType)];

    fn to_row(&self) -> Vec<Value>;

    fn fields() -> Vec<Field> {
        Self::FIELDS
            .iter()
            .map(|(name, data_type)| Field::new(*name, *data_type))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub name: String,
    pub fields: Vec<Field>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
            rows: Vec::new(),
        }
    }

    pub fn from_records<R: Record>(name: impl Into<String>, records: &[R]) -> Self {
        Self {
            name: name.into(),
            fields: R::fields(),
            rows: records.iter().map(Record::to_row).collect(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> Result<(), DomainError> {
        if row.len() != self.fields.len() {
            return Err(DomainError::RowWidth {
                table: self.name.clone(),
                expected: self.fields.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn column_index(&self, column: &str) -> Result<usize, DomainError> {
        self.fields
            .iter()
            .position(|f| f.name == column)
            .ok_or_else(|| DomainError::ColumnNotFound {
                table: self.name.clone(),
                column: column.to_string(),
            })
    }

    pub fn column(&self, column: &str) -> Result<Vec<&Value>, DomainError> {
        let idx = self.column_index(column)?;
        Ok(self.rows.iter().map(|row| &row[idx]).collect())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// --- KEY ORDERING ---

fn numeric_key(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Orders identifiers the way a reader expects: numeric keys first, compared
/// as numbers (`"2" < "10"`), then every other key in lexicographic order.
/// Equal only for equal strings, so it is a total order and safe as a map
/// key ordering even when numeric and text keys mix.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    match (numeric_key(a), numeric_key(b)) {
        (Some(x), Some(y)) => x.total_cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// A group-by key. Absent keys form their own group, sorted last.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey(pub Option<String>);

impl GroupKey {
    pub fn of(value: Option<&str>) -> Self {
        GroupKey(value.map(str::to_string))
    }

    pub fn value(&self) -> Value {
        Value::text(self.0.as_deref())
    }
}

impl Ord for GroupKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => natural_cmp(a, b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl PartialOrd for GroupKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_float_rendering_keeps_decimal_point() {
        assert_eq!(Value::Float(10.0).to_string(), "10.0");
        assert_eq!(Value::Float(13.5).to_string(), "13.5");
        assert_eq!(Value::Float(0.1 + 0.2).to_string(), "0.30000000000000004");
        assert_eq!(Value::Float(f64::NAN).to_string(), "");
        assert_eq!(Value::Integer(3).to_string(), "3");
        assert_eq!(Value::Null.to_string(), "");
    }

    #[test]
    fn test_natural_cmp() {
        assert_eq!(natural_cmp("2", "10"), Ordering::Less);
        assert_eq!(natural_cmp("b", "a"), Ordering::Greater);
        assert_eq!(natural_cmp("1", "1.0"), Ordering::Less);
        assert_eq!(natural_cmp("7", "7"), Ordering::Equal);
        assert_eq!(natural_cmp("10", "1a"), Ordering::Less);
        assert_eq!(natural_cmp("1a", "9"), Ordering::Greater);
    }

    #[test]
    fn test_mixed_keys_group_once() {
        let mut groups: BTreeMap<GroupKey, i64> = BTreeMap::new();
        for key in ["10", "1a", "9", "1a", "b", "10", "-3"] {
            *groups.entry(GroupKey::of(Some(key))).or_insert(0) += 1;
        }
        let keys: Vec<&str> = groups.keys().filter_map(|k| k.0.as_deref()).collect();
        assert_eq!(keys, vec!["-3", "9", "10", "1a", "b"]);
        assert_eq!(groups[&GroupKey::of(Some("1a"))], 2);
        assert_eq!(groups[&GroupKey::of(Some("10"))], 2);
    }

    #[test]
    fn test_group_key_absent_sorts_last() {
        let mut keys = vec![GroupKey::of(None), GroupKey::of(Some("10")), GroupKey::of(Some("9"))];
        keys.sort();
        assert_eq!(
            keys,
            vec![GroupKey::of(Some("9")), GroupKey::of(Some("10")), GroupKey::of(None)]
        );
    }

    #[test]
    fn test_push_row_checks_width() {
        let mut table = Table::new("t", vec![Field::new("a", DataType::Integer)]);
        assert!(table.push_row(vec![Value::Integer(1)]).is_ok());
        let err = table
            .push_row(vec![Value::Integer(1), Value::Null])
            .unwrap_err();
        assert!(matches!(err, DomainError::RowWidth { expected: 1, actual: 2, .. }));
    }

    #[test]
    fn test_column_lookup() {
        let mut table = Table::new(
            "t",
            vec![Field::new("a", DataType::Integer), Field::new("b", DataType::Text)],
        );
        table
            .push_row(vec![Value::Integer(1), Value::Text("x".into())])
            .unwrap();
        assert_eq!(table.column("b").unwrap(), vec![&Value::Text("x".into())]);
        assert!(matches!(
            table.column("zz"),
            Err(DomainError::ColumnNotFound { .. })
        ));
    }
}
