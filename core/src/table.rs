//! In-memory result tables: named columns over rows of typed values.

use crate::error::{ReportError, ReportResult};
use chrono::{NaiveDate, NaiveDateTime};

/// One cell of a materialised query result.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Timestamp(NaiveDateTime),
}

const TEXT_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Timestamp(_) => "timestamp",
        }
    }

    pub fn as_i64(&self, column: &str) -> ReportResult<i64> {
        match self {
            Value::Int(v) => Ok(*v),
            other => Err(unexpected(column, "integer", other)),
        }
    }

    pub fn as_opt_i64(&self, column: &str) -> ReportResult<Option<i64>> {
        match self {
            Value::Null => Ok(None),
            other => other.as_i64(column).map(Some),
        }
    }

    /// Integers widen to floats; SQLite hands back whole-number REALs as
    /// integers when the column has no declared type.
    pub fn as_f64(&self, column: &str) -> ReportResult<f64> {
        match self {
            Value::Float(v) => Ok(*v),
            Value::Int(v) => Ok(*v as f64),
            other => Err(unexpected(column, "number", other)),
        }
    }

    /// Native timestamps pass through; text is parsed as an ISO-8601 date or
    /// date-time, which is how SQLite stores them.
    pub fn as_timestamp(&self, column: &str) -> ReportResult<NaiveDateTime> {
        match self {
            Value::Timestamp(ts) => Ok(*ts),
            Value::Text(s) => parse_timestamp(s).ok_or_else(|| ReportError::UnexpectedType {
                column: column.to_string(),
                expected: "timestamp",
                found: format!("text '{s}'"),
            }),
            other => Err(unexpected(column, "timestamp", other)),
        }
    }
}

fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    TEXT_TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn unexpected(column: &str, expected: &'static str, found: &Value) -> ReportError {
    ReportError::UnexpectedType {
        column: column.to_string(),
        expected,
        found: found.kind().to_string(),
    }
}

/// A materialised result set. Every row has one value per column.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    source: String,
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// `source` names where the rows came from (usually the SQL text) and is
    /// only used in error messages.
    pub fn new(source: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            source: source.into(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> ReportResult<()> {
        if row.len() != self.columns.len() {
            return Err(ReportError::RaggedRow {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Position of `name`, compared case-insensitively.
    pub fn column(&self, name: &str) -> ReportResult<usize> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(name))
            .ok_or_else(|| ReportError::MissingColumn {
                table: self.source.clone(),
                column: name.to_string(),
            })
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Value]> {
        self.rows.iter().map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut t = Table::new("inventory", vec!["ProductID".into(), "quantity".into()]);
        t.push_row(vec![Value::Int(1), Value::Int(5)]).unwrap();
        t.push_row(vec![Value::Int(2), Value::Null]).unwrap();
        t
    }

    #[test]
    fn column_lookup_ignores_case() {
        let t = sample();
        assert_eq!(t.column("productid").unwrap(), 0);
        assert_eq!(t.column("QUANTITY").unwrap(), 1);
    }

    #[test]
    fn missing_column_is_reported() {
        let err = sample().column("locationid").unwrap_err();
        assert!(matches!(err, ReportError::MissingColumn { ref column, .. } if column == "locationid"));
    }

    #[test]
    fn ragged_row_is_rejected() {
        let mut t = sample();
        let err = t.push_row(vec![Value::Int(3)]).unwrap_err();
        assert!(matches!(err, ReportError::RaggedRow { expected: 2, actual: 1 }));
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn nullable_integer() {
        let t = sample();
        let rows: Vec<_> = t.rows().collect();
        assert_eq!(rows[0][1].as_opt_i64("quantity").unwrap(), Some(5));
        assert_eq!(rows[1][1].as_opt_i64("quantity").unwrap(), None);
        assert!(rows[1][1].as_i64("quantity").is_err());
    }

    #[test]
    fn text_timestamps_parse() {
        let expected = NaiveDate::from_ymd_opt(2013, 7, 31)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        for text in ["2013-07-31", "2013-07-31 00:00:00", "2013-07-31T00:00:00.000"] {
            let v = Value::Text(text.into());
            assert_eq!(v.as_timestamp("transactiondate").unwrap(), expected, "{text}");
        }
        assert!(Value::Text("31/07/2013".into()).as_timestamp("d").is_err());
    }

    #[test]
    fn integers_widen_to_float() {
        assert_eq!(Value::Int(3).as_f64("qty").unwrap(), 3.0);
        assert!(Value::Text("3".into()).as_f64("qty").is_err());
    }
}
