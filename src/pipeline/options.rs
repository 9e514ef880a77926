//! Pipeline options and configuration.

use std::path::{Path, PathBuf};

use crate::export::ExportOptions;

/// Options for running the matching pipeline.
#[derive(Debug, Clone, Default)]
pub struct PipelineOptions {
    /// Error handling mode for text extraction
    pub error_mode: ErrorMode,

    /// Directory for inspection artifacts (`None` = no diagnostics)
    pub diagnostics_dir: Option<PathBuf>,

    /// How the matched result is written
    pub export: ExportOptions,
}

impl PipelineOptions {
    /// Create new pipeline options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (skip unreadable pages).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Write diagnostics into `dir`.
    pub fn with_diagnostics(mut self, dir: impl Into<PathBuf>) -> Self {
        self.diagnostics_dir = Some(dir.into());
        self
    }

    /// Set export options.
    pub fn with_export(mut self, export: ExportOptions) -> Self {
        self.export = export;
        self
    }

    /// Diagnostics directory, if enabled.
    pub fn diagnostics_dir(&self) -> Option<&Path> {
        self.diagnostics_dir.as_deref()
    }
}

/// Error handling mode during text extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail the stage on the first unreadable page
    #[default]
    Strict,
    /// Skip unreadable pages and continue
    Lenient,
}
