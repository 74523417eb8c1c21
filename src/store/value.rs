//! Column values and untyped rows exchanged with the store.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::core::error::{AppError, Result};

/// The closed set of column types the store understands.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
    Decimal(Decimal),
    Timestamp(DateTime<Utc>),
}

/// Type tag for a column, used when decoding store rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Int,
    Float,
    Text,
    Decimal,
    Timestamp,
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Text(_) => ValueKind::Text,
            Value::Decimal(_) => ValueKind::Decimal,
            Value::Timestamp(_) => ValueKind::Timestamp,
        }
    }

    /// Order within the same kind; values of different kinds do not compare.
    pub fn partial_cmp(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
            (Value::Decimal(a), Value::Decimal(b)) => Some(a.cmp(b)),
            (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Timestamp(v)
    }
}

/// An untyped row: column name to value.
///
/// Column iteration order is the sorted column name order, which keeps the
/// generated SQL deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    columns: BTreeMap<&'static str, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, column: &'static str, value: impl Into<Value>) -> Self {
        self.columns.insert(column, value.into());
        self
    }

    pub fn insert(&mut self, column: &'static str, value: impl Into<Value>) {
        self.columns.insert(column, value.into());
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.columns.iter().map(|(k, v)| (*k, v))
    }

    pub fn int(&self, column: &str) -> Result<i64> {
        match self.get(column) {
            Some(Value::Int(v)) => Ok(*v),
            other => Err(decode_error(column, "integer", other)),
        }
    }

    pub fn float(&self, column: &str) -> Result<f64> {
        match self.get(column) {
            Some(Value::Float(v)) => Ok(*v),
            other => Err(decode_error(column, "float", other)),
        }
    }

    pub fn text(&self, column: &str) -> Result<String> {
        match self.get(column) {
            Some(Value::Text(v)) => Ok(v.clone()),
            other => Err(decode_error(column, "text", other)),
        }
    }

    pub fn decimal(&self, column: &str) -> Result<Decimal> {
        match self.get(column) {
            Some(Value::Decimal(v)) => Ok(*v),
            other => Err(decode_error(column, "decimal", other)),
        }
    }

    pub fn timestamp(&self, column: &str) -> Result<DateTime<Utc>> {
        match self.get(column) {
            Some(Value::Timestamp(v)) => Ok(*v),
            other => Err(decode_error(column, "timestamp", other)),
        }
    }
}

fn decode_error(column: &str, expected: &str, found: Option<&Value>) -> AppError {
    match found {
        Some(value) => AppError::internal(format!(
            "column `{}`: expected {}, found {:?}",
            column, expected, value
        )),
        None => AppError::internal(format!("column `{}` missing from store row", column)),
    }
}
