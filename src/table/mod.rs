//! Tabular sources.
//!
//! A [`Table`] is a header row plus row-aligned cells, loaded from the first
//! worksheet of a workbook (see [`Table::open`]) or built in memory.

mod cell;
mod workbook;

pub use cell::{Cell, DATETIME_FORMAT};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A table of named columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Column names, one per column
    pub headers: Vec<String>,

    /// Body rows (header excluded); rows may be shorter than the header
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Create an empty table with the given column names.
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Build a table from column names and rows.
    pub fn with_rows(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { headers, rows }
    }

    /// Add a body row.
    pub fn add_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of body rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no body rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Name of a column (0-indexed).
    pub fn header(&self, index: usize) -> Option<&str> {
        self.headers.get(index).map(String::as_str)
    }

    /// Cells of a column in row order; short rows yield [`Cell::Empty`].
    pub fn column_cells(&self, index: usize) -> Result<Vec<&Cell>> {
        self.check_column(index)?;
        const EMPTY: &Cell = &Cell::Empty;
        Ok(self
            .rows
            .iter()
            .map(|row| row.get(index).unwrap_or(EMPTY))
            .collect())
    }

    fn check_column(&self, index: usize) -> Result<()> {
        if index >= self.column_count() {
            return Err(Error::ColumnOutOfRange {
                index,
                count: self.column_count(),
            });
        }
        Ok(())
    }
}

/// Text values of a column (0-indexed), in row order, with missing cells
/// dropped.
///
/// Fails with [`Error::ColumnOutOfRange`] when `index` is not a column of
/// the table.
pub fn extract_column(table: &Table, index: usize) -> Result<Vec<String>> {
    let values: Vec<String> = table
        .column_cells(index)?
        .into_iter()
        .filter_map(Cell::to_text)
        .collect();

    log::debug!(
        "column {} ({:?}): {} values from {} rows",
        index,
        table.header(index).unwrap_or_default(),
        values.len(),
        table.row_count()
    );
    Ok(values)
}
