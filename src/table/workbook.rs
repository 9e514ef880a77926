//! Loading tables from workbooks via calamine.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};

use crate::detect::detect_kind_from_bytes;
use crate::error::{Error, Result};

use super::{Cell, Table};

impl Table {
    /// Load the first worksheet of a workbook file (xlsx, xlsm, xlsb, xls, ods).
    ///
    /// The first row of the sheet's used range becomes the header row.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        Self::from_bytes(&data).map_err(|e| match e {
            Error::Document(msg) => Error::Document(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Load the first worksheet of an in-memory workbook.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let kind = detect_kind_from_bytes(data)?;
        if !kind.is_workbook() {
            return Err(Error::UnknownFormat(format!(
                "expected a spreadsheet, found {}",
                kind
            )));
        }

        let mut workbook = open_workbook_auto_from_rs(Cursor::new(data.to_vec()))?;
        let range = match workbook.worksheet_range_at(0) {
            Some(range) => range?,
            None => return Err(Error::Document("workbook has no worksheets".to_string())),
        };

        Ok(table_from_range(&range))
    }
}

fn table_from_range(range: &Range<Data>) -> Table {
    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header_row) => header_row
            .iter()
            .enumerate()
            .map(|(i, data)| header_name(i, data))
            .collect(),
        None => Vec::new(),
    };

    let mut table = Table::new(headers);
    for row in rows {
        table.add_row(row.iter().map(cell_from_data).collect());
    }
    table
}

/// Blank headers get the `Unnamed: <index>` placeholder.
fn header_name(index: usize, data: &Data) -> String {
    match cell_from_data(data).to_text() {
        Some(name) if !name.trim().is_empty() => name,
        _ => format!("Unnamed: {}", index),
    }
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::String(s.clone()),
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(naive) => Cell::DateTime(naive),
            None => Cell::Float(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::String(s.clone()),
        Data::Error(e) => Cell::Error(e.to_string()),
    }
}
