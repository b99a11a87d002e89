//! Header validation for yearly match-data exports
//!
//! Parses a raw header line, builds a case- and whitespace-insensitive
//! column index, and confirms every required column is present. Each
//! input file gets its own [`HeaderIndex`] because exports from different
//! years may order their columns differently.

use crate::app::models::ColumnSchema;
use crate::constants::BYTE_ORDER_MARK;
use crate::{Error, Result};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

/// Normalized column name to position mapping for one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderIndex {
    headers: Vec<String>,
    index_by_name: HashMap<String, usize>,
}

impl HeaderIndex {
    /// Position of a column in the source file, looked up by normalized name
    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.index_by_name.get(&normalize(column)).copied()
    }

    /// Raw header names as they appear in the source, BOM removed
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of columns in the source header
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

/// Validates input headers against a column schema
#[derive(Debug, Clone)]
pub struct HeaderValidator<'a> {
    schema: &'a ColumnSchema,
}

impl<'a> HeaderValidator<'a> {
    pub fn new(schema: &'a ColumnSchema) -> Self {
        Self { schema }
    }

    /// Read the first line of a file and validate it
    pub fn validate_path(&self, csv_path: &Path) -> Result<HeaderIndex> {
        if !csv_path.exists() {
            return Err(Error::schema_in(csv_path, "CSV path does not exist"));
        }

        let file = File::open(csv_path).map_err(|e| {
            Error::io(format!("Failed to open {}", csv_path.display()), e)
        })?;
        let mut reader = BufReader::new(file);
        let header_line = read_header_line(&mut reader).map_err(|e| {
            Error::io(format!("Failed to read header of {}", csv_path.display()), e)
        })?;

        self.validate(header_line.as_deref()).map_err(|e| match e {
            Error::Schema { file: None, message } => Error::schema_in(csv_path, message),
            other => other,
        })
    }

    /// Validate a raw header line
    ///
    /// `None`, empty and blank input all mean the header is missing. The
    /// failure for missing columns names every absent column in schema order.
    pub fn validate(&self, header_line: Option<&str>) -> Result<HeaderIndex> {
        let header_line = match header_line {
            Some(line) if !line.trim().is_empty() => line,
            _ => return Err(Error::schema("CSV header row is missing")),
        };

        let headers = parse_header(strip_bom(header_line))?;
        let index_by_name = build_index(&headers);

        let missing: Vec<&str> = self
            .schema
            .columns()
            .iter()
            .filter(|column| self.schema.required().contains(column.as_str()))
            .filter(|column| !index_by_name.contains_key(&normalize(column)))
            .map(String::as_str)
            .collect();

        if !missing.is_empty() {
            return Err(Error::schema(format!(
                "Missing required columns: {}",
                missing.join(", ")
            )));
        }

        debug!(
            "Validated header with {} columns ({} required)",
            headers.len(),
            self.schema.required().len()
        );

        Ok(HeaderIndex {
            headers,
            index_by_name,
        })
    }
}

/// Read one line, without its terminator; `None` at end of input
pub(crate) fn read_header_line<R: BufRead>(reader: &mut R) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(Some(line))
}

/// Trimmed, lower-cased column name used for all lookups
pub fn normalize(header: &str) -> String {
    header.trim().to_lowercase()
}

fn strip_bom(header_line: &str) -> &str {
    header_line
        .strip_prefix(BYTE_ORDER_MARK)
        .unwrap_or(header_line)
}

fn parse_header(header_line: &str) -> Result<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(header_line.as_bytes());

    match reader.records().next() {
        Some(record) => {
            let record = record.map_err(|e| {
                Error::schema(format!("CSV header row could not be parsed: {}", e))
            })?;
            Ok(record.iter().map(str::to_string).collect())
        }
        None => Ok(Vec::new()),
    }
}

fn build_index(headers: &[String]) -> HashMap<String, usize> {
    // Later duplicates win, matching a plain map insert per column
    headers
        .iter()
        .enumerate()
        .map(|(i, header)| (normalize(header), i))
        .collect()
}
