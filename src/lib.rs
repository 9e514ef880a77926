//! # scanbuddy
//!
//! Find which values of a spreadsheet column appear in a document's text.
//!
//! A run cuts a page range out of a paginated source (a PDF or form-feed
//! separated text), keeps the lines that pass a filter condition, reads one
//! column of a workbook, and writes the column values that occur as a
//! substring of some kept line to a one-column table.
//!
//! ## Quick Start
//!
//! ```no_run
//! use scanbuddy::{Condition, PageRange, ScanBuddy};
//!
//! fn main() -> scanbuddy::Result<()> {
//!     let report = ScanBuddy::new()
//!         .with_pages(PageRange::new(1, 3)?)
//!         .with_column(0)
//!         .with_condition(Condition::SlashYear)
//!         .run("statement.pdf", "codes.xlsx", "matched_output.xlsx")?;
//!
//!     println!("{} matches", report.match_count());
//!     Ok(())
//! }
//! ```
//!
//! ## Stages
//!
//! - **Page extraction**: [`PagedDocument::extract_pages`]
//! - **Text extraction**: [`extract_filtered_lines`] with a [`Condition`]
//! - **Column extraction**: [`extract_column`] over a [`Table`]
//! - **Matching**: [`find_matches`]
//! - **Export**: [`export_matches`] (xlsx or csv)
//!
//! [`Pipeline`] chains them and records recoverable failures as warnings.

pub mod condition;
pub mod detect;
pub mod document;
pub mod error;
pub mod export;
pub mod extract;
pub mod matcher;
pub mod pipeline;
pub mod table;

// Re-export commonly used types
pub use condition::Condition;
pub use detect::{detect_kind_from_bytes, detect_kind_from_path, DocumentKind};
pub use document::{PageRange, PagedDocument, PdfDocument, SourceDocument, TextDocument};
pub use error::{Error, Result};
pub use export::{export_matches, ExportFormat, ExportOptions, MATCHED_ROWS_HEADER};
pub use extract::{extract_filtered_lines, filter_lines};
pub use matcher::{find_matches, Diagnostics};
pub use pipeline::{
    ErrorMode, JsonFormat, Pipeline, PipelineOptions, RunInputs, RunParams, RunReport, Stage,
    StageWarning, DEFAULT_SAMPLE_SIZE,
};
pub use table::{extract_column, Cell, Table};

use std::path::{Path, PathBuf};

/// Number of pages in a paginated source.
///
/// # Example
///
/// ```no_run
/// let pages = scanbuddy::page_count("statement.pdf").unwrap();
/// println!("Pages: {}", pages);
/// ```
pub fn page_count<P: AsRef<Path>>(path: P) -> Result<u32> {
    Ok(SourceDocument::open(path)?.page_count())
}

/// Number of columns in the first worksheet of a workbook.
pub fn column_count<P: AsRef<Path>>(path: P) -> Result<usize> {
    Ok(Table::open(path)?.column_count())
}

/// Run the pipeline with default options.
///
/// # Example
///
/// ```no_run
/// use scanbuddy::{scan, Condition, PageRange, RunInputs, RunParams};
///
/// let inputs = RunInputs::new("statement.pdf", "codes.xlsx", "matched_output.xlsx");
/// let params = RunParams::new(PageRange::new(1, 2).unwrap(), 0, Condition::SlashYear);
/// let report = scan(&inputs, &params).unwrap();
/// for value in report.sample(10) {
///     println!("{}", value);
/// }
/// ```
pub fn scan(inputs: &RunInputs, params: &RunParams) -> Result<RunReport> {
    Pipeline::default().run(inputs, params)
}

/// Builder for a single scan.
///
/// Without [`with_pages`](Self::with_pages) the whole source is searched.
/// Parameters are checked with [`RunParams::validate`] before the pipeline
/// starts.
#[derive(Debug, Clone, Default)]
pub struct ScanBuddy {
    pages: Option<PageRange>,
    column: usize,
    condition: Condition,
    options: PipelineOptions,
}

impl ScanBuddy {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the search to a page range.
    pub fn with_pages(mut self, pages: PageRange) -> Self {
        self.pages = Some(pages);
        self
    }

    /// Column to read (0-indexed).
    pub fn with_column(mut self, column: usize) -> Self {
        self.column = column;
        self
    }

    /// Set the line filter.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = condition;
        self
    }

    /// Skip unreadable pages instead of failing text extraction.
    pub fn lenient(mut self) -> Self {
        self.options = self.options.lenient();
        self
    }

    /// Write diagnostics into `dir`.
    pub fn with_diagnostics(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options = self.options.with_diagnostics(dir);
        self
    }

    /// Set export options.
    pub fn with_export(mut self, export: ExportOptions) -> Self {
        self.options = self.options.with_export(export);
        self
    }

    /// Validate against the inputs and run.
    pub fn run(
        self,
        source: impl AsRef<Path>,
        table: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<RunReport> {
        let inputs = RunInputs::new(source.as_ref(), table.as_ref(), output.as_ref());
        let params = self.params(&inputs)?;
        Pipeline::new(self.options).run(&inputs, &params)
    }

    fn params(&self, inputs: &RunInputs) -> Result<RunParams> {
        let page_count = page_count(&inputs.source)?;
        let column_count = column_count(&inputs.table)?;

        let pages = match self.pages {
            Some(pages) => pages,
            None => PageRange::whole(page_count).ok_or_else(|| {
                Error::InvalidParams("source document has no pages".to_string())
            })?,
        };

        let params = RunParams::new(pages, self.column, self.condition);
        params.validate(page_count, column_count)?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_page_count_of_text_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("source.txt");
        fs::write(&path, "one\x0Ctwo\x0Cthree").unwrap();
        assert_eq!(page_count(&path).unwrap(), 3);
    }

    #[test]
    fn test_builder_rejects_missing_table() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.txt");
        fs::write(&source, "A /2024").unwrap();

        let result = ScanBuddy::new().run(
            &source,
            dir.path().join("missing.xlsx"),
            dir.path().join("out.xlsx"),
        );
        assert!(result.is_err());
        assert!(!dir.path().join("out.xlsx").exists());
    }
}
