//! In-memory tabular data
//!
//! The statistical core is agnostic to where rows came from. A [`Table`] is an
//! ordered list of [`Record`]s; each record knows its row position, which the
//! explicit identifier override table is keyed by.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{BTreeSet, HashMap};

/// Typed cell values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

/// Fields of one row
pub type Fields = HashMap<String, FieldValue>;

impl FieldValue {
    /// Text form of the value. `Null` and NaN are missing.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            FieldValue::Null => None,
            FieldValue::Float(f) if f.is_nan() => None,
            FieldValue::String(s) => Some(Cow::Borrowed(s.as_str())),
            FieldValue::Int(i) => Some(Cow::Owned(i.to_string())),
            FieldValue::Float(f) => Some(Cow::Owned(f.to_string())),
            FieldValue::Bool(b) => Some(Cow::Owned(b.to_string())),
        }
    }

    /// Interpret the value as a non-negative integer identifier.
    ///
    /// Integral floats (`81.0`) are accepted since spreadsheet exports
    /// often widen integer columns.
    pub fn as_unsigned(&self) -> Option<u64> {
        match self {
            FieldValue::Int(i) => u64::try_from(*i).ok(),
            FieldValue::Float(f) if f.is_finite() && *f >= 0.0 && f.fract() == 0.0 => {
                Some(*f as u64)
            }
            FieldValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        self.as_text().is_none()
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Int(value.into())
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// One row of a table
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Zero-based row position within its table
    pub position: usize,
    pub fields: Fields,
}

impl Record {
    pub fn new(position: usize) -> Self {
        Self {
            position,
            fields: HashMap::new(),
        }
    }

    /// Add a field to the record
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Text of a field; absent, null and NaN fields are `None`.
    pub fn text(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).and_then(FieldValue::as_text)
    }
}

/// An ordered collection of records with a known column set
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Vec<Fields>")]
pub struct Table {
    columns: BTreeSet<String>,
    records: Vec<Record>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from rows; positions follow input order.
    pub fn from_rows(rows: impl IntoIterator<Item = Fields>) -> Self {
        let mut table = Self::new();
        for fields in rows {
            table.push_fields(fields);
        }
        table
    }

    /// Append a row, assigning it the next position.
    pub fn push_fields(&mut self, fields: Fields) -> usize {
        let position = self.records.len();
        self.columns.extend(fields.keys().cloned());
        self.records.push(Record { position, fields });
        position
    }

    /// Append a prepared record. Its position is reassigned to keep
    /// positions contiguous.
    pub fn push(&mut self, record: Record) -> usize {
        self.push_fields(record.fields)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains(name)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<Fields>> for Table {
    fn from(rows: Vec<Fields>) -> Self {
        Self::from_rows(rows)
    }
}

impl FromIterator<Record> for Table {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut table = Table::new();
        for record in iter {
            table.push(record);
        }
        table
    }
}
