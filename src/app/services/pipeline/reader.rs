//! Lazy, single-pass row sequence over one input file
//!
//! The header is read as a plain line and validated; the remainder of the
//! same buffered stream is handed to a headerless CSV reader. Each record
//! is projected through the file's [`HeaderIndex`] into schema order.

use crate::app::models::{ColumnSchema, Row};
use crate::app::services::header_validator::{HeaderIndex, HeaderValidator, read_header_line};
use crate::{Error, Result};
use csv::StringRecord;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Rows of one input file, in file order
pub struct FileRows<'a, R: BufRead> {
    path: PathBuf,
    schema: &'a ColumnSchema,
    header_index: HeaderIndex,
    // Source position of each schema column, resolved once per file
    source_positions: Vec<Option<usize>>,
    records: csv::StringRecordsIntoIter<R>,
}

impl<'a> FileRows<'a, BufReader<File>> {
    /// Open a file, validate its header, and prepare to stream its rows
    pub fn open(path: &Path, schema: &'a ColumnSchema) -> Result<Self> {
        let file = File::open(path)
            .map_err(|e| Error::io(format!("Failed to open {}", path.display()), e))?;
        Self::from_reader(path, BufReader::new(file), schema)
    }
}

impl<'a, R: BufRead> FileRows<'a, R> {
    /// Validate the header from `reader` and stream the remaining records
    pub fn from_reader(path: &Path, mut reader: R, schema: &'a ColumnSchema) -> Result<Self> {
        let header_line = read_header_line(&mut reader)
            .map_err(|e| Error::io(format!("Failed to read header of {}", path.display()), e))?;

        let header_index = HeaderValidator::new(schema)
            .validate(header_line.as_deref())
            .map_err(|e| match e {
                Error::Schema {
                    file: None,
                    message,
                } => Error::schema_in(path, message),
                other => other,
            })?;

        let source_positions = schema
            .columns()
            .iter()
            .map(|column| header_index.index_of(column))
            .collect();

        let records = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(reader)
            .into_records();

        Ok(Self {
            path: path.to_path_buf(),
            schema,
            header_index,
            source_positions,
            records,
        })
    }

    pub fn header_index(&self) -> &HeaderIndex {
        &self.header_index
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn schema(&self) -> &ColumnSchema {
        self.schema
    }

    fn project(&self, record: &StringRecord) -> Row {
        let values = self
            .source_positions
            .iter()
            .map(|position| {
                position
                    .and_then(|i| record.get(i))
                    .map(|value| value.trim().to_string())
                    .unwrap_or_default()
            })
            .collect();
        Row::new(values)
    }
}

impl<R: BufRead> Iterator for FileRows<'_, R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        Some(match record {
            Ok(record) => Ok(self.project(&record)),
            Err(e) => Err(record_error(&self.path, e)),
        })
    }
}

fn record_error(path: &Path, error: csv::Error) -> Error {
    // Data records start on line 2; the headerless reader counts from 1
    let message = match error.position() {
        Some(position) => format!("Malformed record at line {}", position.line() + 1),
        None => "Malformed record".to_string(),
    };
    Error::csv_parsing(path.display().to_string(), message, Some(error))
}
