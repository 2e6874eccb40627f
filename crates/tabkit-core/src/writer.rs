//! Delimited-file writer
//!
//! Output follows a fixed convention that downstream consumers rely on:
//! - every header name is written as a quoted field
//! - numeric values are written bare
//! - any other value is wrapped in a literal quote character on both sides
//!   and the result is then written as a quoted field, with embedded quote
//!   characters doubled
//!
//! With `"` as the quote character the text `Alice` is therefore written as
//! `"""Alice"""` and reads back as `"Alice"`.

use crate::error::{Error, Result};
use crate::table::{Dialect, FieldValue};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// A record of typed values to be written
pub type TypedRecord = BTreeMap<String, FieldValue>;

const LINE_TERMINATOR: &str = "\r\n";

/// Write `table` to `path`: header first, then one row per record with the
/// fields in `fieldnames` order.
pub fn write_csv<P, S>(path: P, table: &[TypedRecord], fieldnames: &[S], dialect: Dialect) -> Result<()>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    write_records(&mut writer, path, table, fieldnames, dialect)?;
    writer.flush()?;

    Ok(())
}

/// Render `table` to a string using the same convention as [`write_csv`]
pub fn write_csv_string<S: AsRef<str>>(
    table: &[TypedRecord],
    fieldnames: &[S],
    dialect: Dialect,
) -> Result<String> {
    let mut buf = Vec::new();
    write_records(&mut buf, Path::new("<memory>"), table, fieldnames, dialect)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

fn write_records<W: Write, S: AsRef<str>>(
    writer: &mut W,
    path: &Path,
    table: &[TypedRecord],
    fieldnames: &[S],
    dialect: Dialect,
) -> Result<()> {
    // Validate up front so the header is never written for a bad dialect
    dialect.separator_byte()?;
    dialect.quote_byte()?;

    let separator = dialect.separator.to_string();

    let header: Vec<String> = fieldnames
        .iter()
        .map(|name| quote_field(name.as_ref(), dialect.quote))
        .collect();
    write!(writer, "{}{}", header.join(&separator), LINE_TERMINATOR)?;

    for record in table {
        let mut cells = Vec::with_capacity(fieldnames.len());
        for name in fieldnames {
            let name = name.as_ref();
            let value = record
                .get(name)
                .ok_or_else(|| Error::missing_column(PathBuf::from(path), name))?;
            cells.push(format_value(value, dialect.quote));
        }
        write!(writer, "{}{}", cells.join(&separator), LINE_TERMINATOR)?;
    }

    Ok(())
}

/// Format one value according to the write convention
fn format_value(value: &FieldValue, quote: char) -> String {
    if value.is_numeric() {
        value.to_string()
    } else {
        let wrapped = format!("{quote}{value}{quote}");
        quote_field(&wrapped, quote)
    }
}

/// Quote a field, doubling any embedded quote characters
fn quote_field(s: &str, quote: char) -> String {
    let doubled: String = [quote, quote].iter().collect();
    format!("{quote}{}{quote}", s.replace(quote, &doubled))
}
