use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("Failed to create '{path}': {source}", path = path.display())]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write table: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Field separator of a derived table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    fn byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Tab => b'\t',
        }
    }
}

fn writer_for<W: Write>(writer: W, delimiter: Delimiter) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(delimiter.byte())
        .has_headers(true)
        .from_writer(writer)
}

/// Writes a header row followed by pre-formatted rows.
pub fn write_rows<W, R>(
    writer: W,
    delimiter: Delimiter,
    header: &[String],
    rows: R,
) -> Result<(), TableError>
where
    W: Write,
    R: IntoIterator<Item = Vec<String>>,
{
    let mut wtr = writer_for(writer, delimiter);
    wtr.write_record(header)?;
    for row in rows {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes serializable records; the header comes from the record's field names.
pub fn write_records<W, T>(writer: W, delimiter: Delimiter, records: &[T]) -> Result<(), TableError>
where
    W: Write,
    T: Serialize,
{
    let mut wtr = writer_for(writer, delimiter);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn create(path: &Path) -> Result<File, TableError> {
    File::create(path).map_err(|e| TableError::Create {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Formats a DDG value the way the tables print it.
pub fn format_value(value: f64) -> String {
    format!("{:.3}", value)
}

/// `serialize_with` helper printing a float with [`format_value`].
pub fn rounded<S: serde::Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_value(*value))
}

/// Like [`rounded`]; `None` becomes an empty field.
pub fn rounded_opt<S: serde::Serializer>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(v) => serializer.serialize_str(&format_value(*v)),
        None => serializer.serialize_str(""),
    }
}
