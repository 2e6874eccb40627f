//! Delimited-file reader

use crate::error::{Error, Result};
use crate::table::{Column, Dialect, KeyedTable, Record, Row, Table};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Parse a delimited file into a Table. The first row is the header.
pub fn parse_csv<P: AsRef<Path>>(path: P, dialect: Dialect) -> Result<Table> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_reader(BufReader::new(file), dialect, path.to_path_buf())
}

/// Parse delimited text from a string (useful for testing)
pub fn parse_csv_str(content: &str, source_name: &str, dialect: Dialect) -> Result<Table> {
    parse_reader(content.as_bytes(), dialect, PathBuf::from(source_name))
}

fn parse_reader<R: Read>(reader: R, dialect: Dialect, path: PathBuf) -> Result<Table> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // Allow varying number of fields
        .delimiter(dialect.separator_byte()?)
        .quote(dialect.quote_byte()?)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(|e| Error::Csv {
        path: path.clone(),
        source: e,
    })?;

    let columns: Vec<Column> = headers
        .iter()
        .enumerate()
        .map(|(i, name)| Column::new(name.to_string(), i))
        .collect();

    let mut rows = Vec::new();
    for (row_idx, result) in csv_reader.records().enumerate() {
        let record = result.map_err(|e| Error::Csv {
            path: path.clone(),
            source: e,
        })?;

        let mut cells: Vec<String> = record.iter().map(str::to_string).collect();

        // Pad with empty cells if row is shorter than header
        if cells.len() < columns.len() {
            cells.resize(columns.len(), String::new());
        }

        if cells.len() > columns.len() {
            warn!(
                row = row_idx + 1,
                path = %path.display(),
                "row has more cells than columns, truncating"
            );
            cells.truncate(columns.len());
        }

        rows.push(Row::new(cells));
    }

    debug!(
        path = %path.display(),
        columns = columns.len(),
        rows = rows.len(),
        "parsed table"
    );

    Ok(Table {
        columns,
        rows,
        source_path: path,
    })
}

/// Read only the header row of a delimited file
pub fn read_fieldnames<P: AsRef<Path>>(path: P, dialect: Dialect) -> Result<Vec<String>> {
    Ok(parse_csv(path, dialect)?.field_names())
}

/// Read a delimited file as a list of records, one per row, in file order
pub fn read_as_records<P: AsRef<Path>>(path: P, dialect: Dialect) -> Result<Vec<Record>> {
    Ok(parse_csv(path, dialect)?.to_records())
}

/// Read a delimited file as records keyed by `key_field`. When a key repeats,
/// the last row with that key is kept.
pub fn read_as_keyed<P: AsRef<Path>>(path: P, key_field: &str, dialect: Dialect) -> Result<KeyedTable> {
    parse_csv(path, dialect)?.to_keyed(key_field)
}
