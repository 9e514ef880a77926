//! Run report model.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::document::PageRange;
use crate::error::{Error, Result};

/// Number of matches shown in a summary by default.
pub const DEFAULT_SAMPLE_SIZE: usize = 10;

/// A pipeline stage, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    PageExtraction,
    TextExtraction,
    ColumnExtraction,
    Matching,
    Export,
}

impl Stage {
    /// All stages in execution order.
    pub const ALL: [Stage; 5] = [
        Stage::PageExtraction,
        Stage::TextExtraction,
        Stage::ColumnExtraction,
        Stage::Matching,
        Stage::Export,
    ];

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::PageExtraction => "Page extraction",
            Stage::TextExtraction => "Text extraction",
            Stage::ColumnExtraction => "Column extraction",
            Stage::Matching => "Matching",
            Stage::Export => "Export",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A recovered failure, tagged with the stage it happened in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageWarning {
    pub stage: Stage,
    pub message: String,
}

impl StageWarning {
    pub fn new(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
        }
    }
}

impl fmt::Display for StageWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.stage, self.message)
    }
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// Matched column values, in column order
    pub matches: Vec<String>,

    /// Requested page range
    pub page_range: PageRange,

    /// Pages in the ranged document
    pub pages_extracted: u32,

    /// Lines that passed the condition
    pub filtered_line_count: usize,

    /// Column (0-indexed) the values were read from
    pub column: usize,

    /// Non-missing values in the column
    pub column_value_count: usize,

    /// Label of the condition used
    pub condition: String,

    /// Where the result was written
    pub output: PathBuf,

    /// Recovered stage failures
    pub warnings: Vec<StageWarning>,
}

impl RunReport {
    /// Number of matches.
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// The first `n` matches.
    pub fn sample(&self, n: usize) -> &[String] {
        &self.matches[..n.min(self.matches.len())]
    }

    /// Matches not covered by [`sample(n)`](Self::sample).
    pub fn remaining_after(&self, n: usize) -> usize {
        self.matches.len().saturating_sub(n)
    }

    /// Whether any stage recorded a warning.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Serialize the report.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        let result = match format {
            JsonFormat::Pretty => serde_json::to_string_pretty(self),
            JsonFormat::Compact => serde_json::to_string(self),
        };

        result.map_err(|e| Error::Export(format!("JSON serialization error: {}", e)))
    }
}

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(count: usize) -> RunReport {
        RunReport {
            matches: (0..count).map(|i| format!("M{}", i)).collect(),
            page_range: PageRange::new(1, 2).unwrap(),
            pages_extracted: 2,
            filtered_line_count: 4,
            column: 0,
            column_value_count: 20,
            condition: "/YYYY (4-digit year)".to_string(),
            output: PathBuf::from("matched_output.xlsx"),
            warnings: vec![StageWarning::new(
                Stage::ColumnExtraction,
                "Column 3 is out of range (table has 1 columns)",
            )],
        }
    }

    #[test]
    fn test_sample_and_remaining() {
        let big = report(12);
        assert_eq!(big.sample(DEFAULT_SAMPLE_SIZE).len(), 10);
        assert_eq!(big.remaining_after(DEFAULT_SAMPLE_SIZE), 2);

        let small = report(3);
        assert_eq!(small.sample(10), &["M0", "M1", "M2"]);
        assert_eq!(small.remaining_after(10), 0);
    }

    #[test]
    fn test_stage_labels() {
        assert_eq!(Stage::PageExtraction.to_string(), "Page extraction");
        assert_eq!(
            StageWarning::new(Stage::Matching, "disk full").to_string(),
            "Matching: disk full"
        );
    }

    #[test]
    fn test_to_json() {
        let json = report(1).to_json(JsonFormat::Compact).unwrap();
        assert!(!json.contains('\n'));
        assert!(json.contains("\"matches\":[\"M0\"]"));
        assert!(json.contains("\"stage\":\"column_extraction\""));
        assert!(json.contains("\"page_range\":{\"start\":1,\"end\":2}"));

        let pretty = report(1).to_json(JsonFormat::Pretty).unwrap();
        assert!(pretty.contains('\n'));
    }
}
