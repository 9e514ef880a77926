//! Result export: matched values as a single-column table.

use std::fs;
use std::path::Path;

use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, Workbook};

use crate::error::{Error, Result};

/// Header of the single output column.
pub const MATCHED_ROWS_HEADER: &str = "Matched Rows";

/// Output table format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Excel workbook
    #[default]
    Xlsx,
    /// Comma-separated values
    Csv,
}

impl ExportFormat {
    /// Pick a format from the destination's extension; anything that is not
    /// `.csv` is written as xlsx.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => ExportFormat::Csv,
            _ => ExportFormat::Xlsx,
        }
    }
}

/// Options for writing the matched result.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Output format; `None` picks one from the destination extension
    pub format: Option<ExportFormat>,

    /// Column header
    pub header: String,

    /// Worksheet name (xlsx only)
    pub sheet_name: String,
}

impl ExportOptions {
    /// Create new export options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Force an output format.
    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Set the column header.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Set the worksheet name.
    pub fn with_sheet_name(mut self, name: impl Into<String>) -> Self {
        self.sheet_name = name.into();
        self
    }

    /// Format used for `path`.
    pub fn format_for(&self, path: &Path) -> ExportFormat {
        self.format.unwrap_or_else(|| ExportFormat::from_path(path))
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: None,
            header: MATCHED_ROWS_HEADER.to_string(),
            sheet_name: "Sheet1".to_string(),
        }
    }
}

/// Serialize `matches` and write them to `path`.
///
/// The artifact is built fully in memory first; if writing fails, any
/// partially written file is removed.
pub fn export_matches(matches: &[String], path: &Path, options: &ExportOptions) -> Result<()> {
    let bytes = match options.format_for(path) {
        ExportFormat::Xlsx => to_xlsx_bytes(matches, options)?,
        ExportFormat::Csv => to_csv_bytes(matches, options)?,
    };

    if let Err(e) = fs::write(path, &bytes) {
        let _ = fs::remove_file(path);
        return Err(Error::Export(format!("cannot write {}: {}", path.display(), e)));
    }

    log::debug!("wrote {} matches to {}", matches.len(), path.display());
    Ok(())
}

/// Build an xlsx workbook with one column of matches.
///
/// The creation timestamp is pinned so equal inputs give equal bytes.
pub fn to_xlsx_bytes(matches: &[String], options: &ExportOptions) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let created = ExcelDateTime::from_ymd(2000, 1, 1)?;
    workbook.set_properties(&DocProperties::new().set_creation_datetime(&created));

    let bold = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(options.sheet_name.as_str())?;
    worksheet.write_string_with_format(0, 0, options.header.as_str(), &bold)?;
    for (i, value) in matches.iter().enumerate() {
        let row = u32::try_from(i + 1)
            .map_err(|_| Error::Export("too many rows for a worksheet".to_string()))?;
        worksheet.write_string(row, 0, value.as_str())?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Build a CSV document with one column of matches.
pub fn to_csv_bytes(matches: &[String], options: &ExportOptions) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([options.header.as_str()])?;
    for value in matches {
        writer.write_record([value.as_str()])?;
    }
    writer
        .into_inner()
        .map_err(|e| Error::Export(format!("CSV serialization error: {}", e)))
}
