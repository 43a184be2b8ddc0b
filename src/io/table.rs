//! In-memory CSV table.
//!
//! A `Table` is the untyped tabular dataset every pipeline starts from. It
//! knows its column names and raw string cells; turning cells into typed
//! records is the job of `io::ingest`, after `io::schema` has checked that the
//! needed columns exist.

use std::collections::HashMap;
use std::fmt::Display;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use csv::StringRecord;

use crate::error::{AppError, ChartError};

#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    headers: Vec<String>,
    header_map: HashMap<String, usize>,
    rows: Vec<StringRecord>,
}

impl Table {
    /// Open and parse a CSV file. `name` labels the dataset in error messages.
    pub fn from_path(name: &str, path: &Path) -> Result<Self, AppError> {
        let file = File::open(path)
            .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
        Ok(Self::from_reader(name, file)?)
    }

    /// Parse CSV from any reader.
    pub fn from_reader<R: Read>(name: &str, reader: R) -> Result<Self, ChartError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| csv_error(name, 1, e))?
            .iter()
            .map(normalize_header_name)
            .collect();

        let header_map = headers
            .iter()
            .enumerate()
            .map(|(idx, h)| (h.clone(), idx))
            .collect();

        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                let line = e.position().map_or(idx + 2, |p| p.line() as usize);
                csv_error(name, line, e)
            })?;
            rows.push(record);
        }

        Ok(Self {
            name: name.to_string(),
            headers,
            header_map,
            rows,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.header_map.contains_key(&normalize_header_name(column))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate rows in input order.
    ///
    /// Each row carries the line its record starts on, so quoted cells that
    /// span lines do not shift the numbers of later rows.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().enumerate().map(move |(idx, record)| Row {
            table: self,
            record,
            // Data starts on line 2 (line 1 is the header).
            line: record.position().map_or(idx + 2, |p| p.line() as usize),
        })
    }
}

/// A borrowed view of one data row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    record: &'a StringRecord,
    line: usize,
}

impl<'a> Row<'a> {
    /// 1-based line number in the source CSV.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Non-empty, trimmed cell value.
    pub fn get(&self, column: &str) -> Result<&'a str, ChartError> {
        let idx = self
            .table
            .header_map
            .get(&normalize_header_name(column))
            .ok_or_else(|| self.error(column, "column not present"))?;
        self.record
            .get(*idx)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| self.error(column, "missing value"))
    }

    /// Parse a cell with `FromStr`.
    pub fn parse<T>(&self, column: &str) -> Result<T, ChartError>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = self.get(column)?;
        raw.parse::<T>()
            .map_err(|e| self.error(column, format!("invalid value '{raw}': {e}")))
    }

    /// Parse a numeric cell that may be written as a float (`"3.0"`) but must be integral.
    pub fn parse_integral(&self, column: &str) -> Result<i64, ChartError> {
        let raw = self.get(column)?;
        if let Ok(v) = raw.parse::<i64>() {
            return Ok(v);
        }
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() && v.fract() == 0.0 => Ok(v as i64),
            _ => Err(self.error(column, format!("expected an integer, got '{raw}'"))),
        }
    }

    pub fn error(&self, column: &str, message: impl Into<String>) -> ChartError {
        ChartError::Parse {
            dataset: self.table.name.clone(),
            line: self.line,
            column: column.to_string(),
            message: message.into(),
        }
    }
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM; left
    // in place it would make that column look missing.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn csv_error(dataset: &str, line: usize, err: csv::Error) -> ChartError {
    ChartError::Parse {
        dataset: dataset.to_string(),
        line,
        column: String::new(),
        message: format!("CSV parse error: {err}"),
    }
}
