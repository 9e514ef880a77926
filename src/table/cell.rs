//! Spreadsheet cell values.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Format used when a date-time cell is turned into text.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single cell value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum Cell {
    /// No value
    #[default]
    Empty,
    /// Text
    String(String),
    /// Integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Boolean
    Bool(bool),
    /// Date and time
    DateTime(NaiveDateTime),
    /// Spreadsheet error value such as `#N/A`
    Error(String),
}

impl Cell {
    /// Whether the cell counts as missing (empty, error or NaN).
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Empty | Cell::Error(_) => true,
            Cell::Float(f) => !f.is_finite(),
            _ => false,
        }
    }

    /// Locale-independent text form of the cell, or `None` when missing.
    ///
    /// Integral floats print without a fractional part, so a spreadsheet
    /// number `42` becomes `"42"` rather than `"42.0"`.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Cell::Empty | Cell::Error(_) => None,
            Cell::String(s) => Some(s.clone()),
            Cell::Int(i) => Some(i.to_string()),
            Cell::Float(f) => format_float(*f),
            Cell::Bool(true) => Some("True".to_string()),
            Cell::Bool(false) => Some("False".to_string()),
            Cell::DateTime(dt) => Some(dt.format(DATETIME_FORMAT).to_string()),
        }
    }
}

fn format_float(f: f64) -> Option<String> {
    if !f.is_finite() {
        return None;
    }
    // Beyond 2^53 integral floats are not exactly representable as i64 text.
    if f.fract() == 0.0 && f.abs() < 9_007_199_254_740_992.0 {
        return Some(format!("{}", f as i64));
    }
    Some(format!("{}", f))
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::String(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::String(s)
    }
}

impl From<i64> for Cell {
    fn from(i: i64) -> Self {
        Cell::Int(i)
    }
}

impl From<f64> for Cell {
    fn from(f: f64) -> Self {
        Cell::Float(f)
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Cell::Bool(b)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Cell::Empty)
    }
}
