//! Spreadsheet (xlsx) loading via calamine
//!
//! All source datasets ship as Excel workbooks. Only the first worksheet is
//! read; the first row is taken as the header.

use std::path::Path;

use calamine::{open_workbook_auto, DataType, Reader};

use crate::error::{MetaError, Result};

/// A single worksheet cell after import
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    /// Numeric view of the cell. String cells are parsed after trimming;
    /// anything unparseable is treated as missing rather than an error.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if n.is_finite() => Some(*n),
            Cell::Number(_) => None,
            Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            Cell::Empty => None,
        }
    }

    /// Text view of the cell, trimmed. Numeric cells render with Rust's
    /// default float formatting (integral values print without a decimal
    /// point in xlsx exports, so gene symbols stored as numbers survive).
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Text(s) => {
                let t = s.trim();
                if t.is_empty() {
                    None
                } else {
                    Some(t.to_string())
                }
            }
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    Some(format!("{}", *n as i64))
                } else {
                    Some(format!("{}", n))
                }
            }
            Cell::Empty => None,
        }
    }
}

impl From<&DataType> for Cell {
    fn from(cell: &DataType) -> Self {
        match cell {
            DataType::String(s) => Cell::Text(s.clone()),
            DataType::Float(n) | DataType::DateTime(n) | DataType::Duration(n) => {
                Cell::Number(*n)
            }
            DataType::Int(i) => Cell::Number(*i as f64),
            DataType::Bool(b) => Cell::Text(b.to_string()),
            DataType::DateTimeIso(s) | DataType::DurationIso(s) => Cell::Text(s.clone()),
            DataType::Error(_) | DataType::Empty => Cell::Empty,
        }
    }
}

/// An in-memory worksheet: header row plus data rows
#[derive(Debug, Clone)]
pub struct Sheet {
    /// Source file name, kept for error messages
    pub file: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    /// Build a sheet directly from rows (used by tests and callers that
    /// already hold tabular data).
    pub fn new(file: &str, headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            file: file.to_string(),
            headers,
            rows,
        }
    }

    /// Index of a named column, or a MissingColumn error citing the file
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| MetaError::MissingColumn {
                column: name.to_string(),
                file: self.file.clone(),
            })
    }

    /// Index of a named column if present (for optional columns like `model`)
    pub fn find_column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Cell at (row, col); Empty when the row is ragged
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&Cell::Empty)
    }
}

/// Read the first worksheet of an xlsx workbook
pub fn read_sheet<P: AsRef<Path>>(path: P) -> Result<Sheet> {
    let path = path.as_ref();
    let file = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| MetaError::EmptySheet { file: file.clone() })??;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .ok_or_else(|| MetaError::EmptySheet { file: file.clone() })?
        .iter()
        .map(|c| Cell::from(c).as_text().unwrap_or_default())
        .collect();

    let data: Vec<Vec<Cell>> = rows
        .map(|row| row.iter().map(Cell::from).collect())
        .collect();

    log::debug!("{}: {} columns, {} rows", file, headers.len(), data.len());

    Ok(Sheet {
        file,
        headers,
        rows: data,
    })
}
