//! The extraction-and-matching pipeline.
//!
//! One run takes a paginated source, a table and a [`RunParams`], and walks
//! five stages in order:
//!
//! 1. page extraction (the requested [`PageRange`] as a new document)
//! 2. text extraction (lines that pass the [`Condition`])
//! 3. column extraction (text values of one table column)
//! 4. matching (column values found in the lines)
//! 5. export (the matched values as a one-column table)
//!
//! Failures in stages 1 to 4 are recorded as [`StageWarning`]s and the stage
//! yields an empty result, so a run always reaches export. Only an export
//! failure fails the run.

mod options;
mod report;

pub use options::{ErrorMode, PipelineOptions};
pub use report::{JsonFormat, RunReport, Stage, StageWarning, DEFAULT_SAMPLE_SIZE};

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::condition::Condition;
use crate::document::{PageRange, PagedDocument, SourceDocument, TextDocument};
use crate::error::{Error, Result};
use crate::export::export_matches;
use crate::extract::extract_filtered_lines;
use crate::matcher::{find_matches, Diagnostics};
use crate::table::{extract_column, Table};

/// Base name of the saved ranged document in the diagnostics directory.
pub const RANGED_SOURCE_STEM: &str = "ranged_source";

/// Parameters for one run. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunParams {
    /// Pages of the source to search
    pub page_range: PageRange,

    /// Table column to read (0-indexed)
    pub column: usize,

    /// Line filter
    pub condition: Condition,
}

impl RunParams {
    pub fn new(page_range: PageRange, column: usize, condition: Condition) -> Self {
        Self {
            page_range,
            column,
            condition,
        }
    }

    /// Check the parameters against the actual inputs.
    ///
    /// The page range must lie within `[1, page_count]` and the column
    /// within `[0, column_count)`. The pipeline itself tolerates parameters
    /// that fail this check; callers that present choices to users should
    /// reject them up front.
    pub fn validate(&self, page_count: u32, column_count: usize) -> Result<()> {
        if page_count == 0 {
            return Err(Error::InvalidParams("source document has no pages".to_string()));
        }
        if !self.page_range.fits(page_count) {
            return Err(Error::InvalidParams(format!(
                "page range {} is outside 1-{}",
                self.page_range, page_count
            )));
        }
        if self.column >= column_count {
            return Err(Error::InvalidParams(format!(
                "column {} is out of range (table has {} columns)",
                self.column + 1,
                column_count
            )));
        }
        Ok(())
    }
}

/// File locations for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunInputs {
    /// Paginated source (PDF or form-feed text)
    pub source: PathBuf,

    /// Workbook holding the column to match
    pub table: PathBuf,

    /// Destination of the matched result
    pub output: PathBuf,
}

impl RunInputs {
    pub fn new(
        source: impl Into<PathBuf>,
        table: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source: source.into(),
            table: table.into(),
            output: output.into(),
        }
    }
}

/// Runs the pipeline with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Run against files on disk.
    pub fn run(&self, inputs: &RunInputs, params: &RunParams) -> Result<RunReport> {
        self.run_with_progress(inputs, params, |_| {})
    }

    /// Run against files on disk, calling `progress` as each stage starts.
    pub fn run_with_progress<F>(
        &self,
        inputs: &RunInputs,
        params: &RunParams,
        mut progress: F,
    ) -> Result<RunReport>
    where
        F: FnMut(Stage),
    {
        let mut warnings = Vec::new();

        progress(Stage::PageExtraction);
        let mut ranged = match SourceDocument::open(&inputs.source) {
            Ok(source) => source.extract_pages(params.page_range),
            Err(e) => {
                warn(&mut warnings, Stage::PageExtraction, e);
                SourceDocument::Text(TextDocument::default())
            }
        };
        if let Some(dir) = self.options.diagnostics_dir() {
            if let Err(e) = save_ranged(&mut ranged, dir) {
                warn(&mut warnings, Stage::PageExtraction, e);
            }
        }

        self.run_stages(
            &ranged,
            || Table::open(&inputs.table),
            params,
            &inputs.output,
            warnings,
            &mut progress,
        )
    }

    /// Run against documents already in memory.
    ///
    /// Behaves like [`run`](Self::run) except that nothing is opened and
    /// the ranged document is not saved as a diagnostic.
    pub fn run_documents<D: PagedDocument>(
        &self,
        source: &D,
        table: &Table,
        params: &RunParams,
        output: &Path,
    ) -> Result<RunReport> {
        let ranged = source.extract_pages(params.page_range);
        self.run_stages(
            &ranged,
            || Ok(table.clone()),
            params,
            output,
            Vec::new(),
            &mut |_: Stage| {},
        )
    }

    fn run_stages<D, T>(
        &self,
        ranged: &D,
        load_table: T,
        params: &RunParams,
        output: &Path,
        mut warnings: Vec<StageWarning>,
        progress: &mut dyn FnMut(Stage),
    ) -> Result<RunReport>
    where
        D: PagedDocument + ?Sized,
        T: FnOnce() -> Result<Table>,
    {
        let pages_extracted = ranged.page_count();
        log::debug!(
            "{}: {} pages for range {}",
            Stage::PageExtraction,
            pages_extracted,
            params.page_range
        );

        progress(Stage::TextExtraction);
        let lines = extract_filtered_lines(ranged, params.condition, self.options.error_mode)
            .unwrap_or_else(|e| {
                warn(&mut warnings, Stage::TextExtraction, e);
                Vec::new()
            });
        log::debug!("{}: {} filtered lines", Stage::TextExtraction, lines.len());

        progress(Stage::ColumnExtraction);
        let values = load_table()
            .and_then(|table| extract_column(&table, params.column))
            .unwrap_or_else(|e| {
                warn(&mut warnings, Stage::ColumnExtraction, e);
                Vec::new()
            });
        log::debug!("{}: {} values", Stage::ColumnExtraction, values.len());

        progress(Stage::Matching);
        if let Some(dir) = self.options.diagnostics_dir() {
            if let Err(e) = Diagnostics::new(dir).write(&lines, &values) {
                warn(&mut warnings, Stage::Matching, e);
            }
        }
        let matches = find_matches(&lines, &values);
        log::debug!("{}: {} matches", Stage::Matching, matches.len());

        progress(Stage::Export);
        export_matches(&matches, output, &self.options.export)?;

        Ok(RunReport {
            matches,
            page_range: params.page_range,
            pages_extracted,
            filtered_line_count: lines.len(),
            column: params.column,
            column_value_count: values.len(),
            condition: params.condition.label().to_string(),
            output: output.to_path_buf(),
            warnings,
        })
    }
}

fn warn(warnings: &mut Vec<StageWarning>, stage: Stage, error: Error) {
    log::warn!("{} failed: {}", stage, error);
    warnings.push(StageWarning::new(stage, error.to_string()));
}

/// Save the ranged document as `ranged_source.<ext>` inside `dir`.
fn save_ranged(doc: &mut SourceDocument, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.{}", RANGED_SOURCE_STEM, doc.extension()));
    let mut writer = BufWriter::new(File::create(&path)?);
    doc.save_to(&mut writer)?;
    writer.flush()?;
    Ok(())
}
