//! Core table types for delimited text data

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A single row keyed by field name
pub type Record = BTreeMap<String, String>;

/// Rows keyed by the value of a designated field
pub type KeyedTable = BTreeMap<String, Record>;

/// Separator and quote characters of a delimited file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    pub separator: char,
    pub quote: char,
}

impl Dialect {
    /// Create a dialect from separator and quote characters
    pub fn new(separator: char, quote: char) -> Self {
        Self { separator, quote }
    }

    /// Separator as a single byte, as required by the csv crate
    pub fn separator_byte(&self) -> Result<u8> {
        ascii_byte("separator", self.separator)
    }

    /// Quote character as a single byte
    pub fn quote_byte(&self) -> Result<u8> {
        ascii_byte("quote", self.quote)
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::new(',', '"')
    }
}

fn ascii_byte(field: &'static str, value: char) -> Result<u8> {
    if value.is_ascii() {
        Ok(value as u8)
    } else {
        Err(Error::InvalidDialect { field, value })
    }
}

/// A parsed table from a single delimited file
#[derive(Debug, Clone)]
pub struct Table {
    /// Column definitions, in header order
    pub columns: Vec<Column>,
    /// Row data, in file order
    pub rows: Vec<Row>,
    /// Source file path
    pub source_path: PathBuf,
}

impl Table {
    /// Create a new empty table
    pub fn new(source_path: PathBuf) -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            source_path,
        }
    }

    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Header names in order
    pub fn field_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Find a column by name
    pub fn find_column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Find a column by name, failing with `MissingColumn` when absent
    pub fn require_column(&self, name: &str) -> Result<&Column> {
        self.find_column(name)
            .ok_or_else(|| Error::missing_column(&self.source_path, name))
    }

    /// Convert a row into a field name -> value record
    pub fn record(&self, row: &Row) -> Record {
        self.columns
            .iter()
            .map(|col| {
                let value = row.get(col.index).unwrap_or_default();
                (col.name.clone(), value.to_string())
            })
            .collect()
    }

    /// All rows as records, preserving file order
    pub fn to_records(&self) -> Vec<Record> {
        self.rows.iter().map(|row| self.record(row)).collect()
    }

    /// Rows keyed by the value in `key_field`; a later duplicate key replaces
    /// the earlier row.
    pub fn to_keyed(&self, key_field: &str) -> Result<KeyedTable> {
        self.to_keyed_by(key_field, |key| key)
    }

    /// Like [`Table::to_keyed`], with each key passed through `key_fn` first.
    /// Rows whose keys collide after `key_fn` resolve in file order, so the
    /// last one wins.
    pub fn to_keyed_by<F>(&self, key_field: &str, key_fn: F) -> Result<KeyedTable>
    where
        F: Fn(&str) -> &str,
    {
        let key_col = self.require_column(key_field)?.index;

        Ok(self
            .rows
            .iter()
            .map(|row| {
                let key = key_fn(row.get(key_col).unwrap_or_default()).to_string();
                (key, self.record(row))
            })
            .collect())
    }

    /// Map one column to another, trimming whitespace around both values.
    /// A later duplicate key replaces the earlier pair.
    pub fn column_pairs(&self, key_field: &str, value_field: &str) -> Result<BTreeMap<String, String>> {
        let key_col = self.require_column(key_field)?.index;
        let value_col = self.require_column(value_field)?.index;

        Ok(self
            .rows
            .iter()
            .map(|row| {
                let key = row.get(key_col).unwrap_or_default().trim().to_string();
                let value = row.get(value_col).unwrap_or_default().trim().to_string();
                (key, value)
            })
            .collect())
    }
}

/// A column definition
#[derive(Debug, Clone)]
pub struct Column {
    /// Column name from the header row
    pub name: String,
    /// Column index (0-based)
    pub index: usize,
}

impl Column {
    /// Create a new column
    pub fn new(name: String, index: usize) -> Self {
        Self { name, index }
    }
}

/// A row of raw field values, aligned with the table columns
#[derive(Debug, Clone, Default)]
pub struct Row {
    pub cells: Vec<String>,
}

impl Row {
    /// Create a new row
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Get a cell value by column index
    pub fn get(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }
}

/// A typed value for the write path. Numbers are written bare, text is
/// wrapped in the dialect's quote character.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    /// Infer a typed value from raw text: integer, then float, else text.
    /// Only a bare number counts as numeric; a cell with surrounding
    /// whitespace stays text, verbatim.
    pub fn infer(s: &str) -> Self {
        if let Ok(i) = s.parse::<i64>() {
            return FieldValue::Integer(i);
        }

        match s.parse::<f64>() {
            Ok(f) if f.is_finite() => FieldValue::Float(f),
            _ => FieldValue::Text(s.to_string()),
        }
    }

    /// Whether the value is written without quoting
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldValue::Integer(_) | FieldValue::Float(_))
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Integer(i)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => f.write_str(&format_float(*fl)),
            FieldValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Shortest round-trip form of a float. Decimal exponents below -4 or at
/// least 16 use scientific notation with a signed two-digit exponent
/// (`1e-05`, `1.5e+20`); whole values otherwise keep a trailing `.0`.
fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let scientific = format!("{:e}", value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if (-4..16).contains(&exponent) {
        let plain = value.to_string();
        if plain.contains('.') {
            plain
        } else {
            format!("{}.0", plain)
        }
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exponent.abs())
    }
}
