//! Format rows parsed from the CSV specification.
//!
//! The first CSV line is the header; every later line becomes a
//! [`FormatRow`] keyed by those header names. Values are kept verbatim.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::error::FormatError;

pub const COL_RESOLUTION: &str = "Resolution";
pub const COL_CONTENT_TYPE: &str = "Content Type";
pub const COL_DURATION: &str = "Duration";

/// Columns every format table must have.
pub const REQUIRED_COLUMNS: [&str; 3] = [COL_RESOLUTION, COL_CONTENT_TYPE, COL_DURATION];

/// One requested artifact: ordered column name → value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatRow {
    fields: Vec<(String, String)>,
}

impl FormatRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a row from (column, value) pairs.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Set a column, replacing an existing value.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        let column = column.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| *k == column) {
            Some(field) => field.1 = value,
            None => self.fields.push((column, value)),
        }
    }

    /// Value of `column` (exact, case-sensitive match).
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == column)
            .map(|(_, v)| v.as_str())
    }

    /// Value of a column that must be present.
    pub fn require(&self, column: &str) -> Result<&str, FormatError> {
        self.get(column)
            .ok_or_else(|| FormatError::MissingColumn(column.to_string()))
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }
}

/// A parsed format CSV.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatTable {
    rows: Vec<FormatRow>,
}

impl FormatTable {
    /// Read and validate a CSV file.
    pub fn from_path(path: &Path) -> Result<Self, FormatError> {
        let file = File::open(path).map_err(|e| FormatError::Open {
            path: path.to_path_buf(),
            source: e,
        })?;
        let table = Self::from_reader(file)?;
        tracing::debug!(
            "Loaded {} format rows from {}",
            table.rows.len(),
            path.display()
        );
        Ok(table)
    }

    /// Read and validate CSV content.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, FormatError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(str::to_string)
            .collect();
        if headers.is_empty() {
            return Err(FormatError::Empty);
        }
        for required in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == required) {
                return Err(FormatError::MissingColumn(required.to_string()));
            }
        }

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(FormatRow::from_pairs(
                headers.iter().cloned().zip(record.iter().map(str::to_string)),
            ));
        }

        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[FormatRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
