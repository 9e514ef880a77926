//! Substring matching of column values against filtered lines.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// File name for the filtered-line dump.
pub const LINES_FILE: &str = "filtered_lines.txt";

/// File name for the column-value dump.
pub const VALUES_FILE: &str = "column_values.txt";

/// Column values that occur, case-sensitively, as a substring of at least
/// one line.
///
/// The result keeps column order and multiplicity: a value listed twice in
/// `values` appears twice if it matches.
pub fn find_matches<L, V>(lines: &[L], values: &[V]) -> Vec<String>
where
    L: AsRef<str>,
    V: AsRef<str>,
{
    values
        .iter()
        .map(AsRef::<str>::as_ref)
        .filter(|value| lines.iter().any(|line| line.as_ref().contains(*value)))
        .map(str::to_string)
        .collect()
}

/// Writes the matcher's inputs verbatim for later inspection.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    dir: PathBuf,
}

impl Diagnostics {
    /// Dump into `dir` (created on first write).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the filtered-line dump.
    pub fn lines_path(&self) -> PathBuf {
        self.dir.join(LINES_FILE)
    }

    /// Path of the column-value dump.
    pub fn values_path(&self) -> PathBuf {
        self.dir.join(VALUES_FILE)
    }

    /// Write both sequences, one entry per line.
    pub fn write<L, V>(&self, lines: &[L], values: &[V]) -> Result<()>
    where
        L: AsRef<str>,
        V: AsRef<str>,
    {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.values_path(), join_lines(values))?;
        fs::write(self.lines_path(), join_lines(lines))?;
        Ok(())
    }
}

fn join_lines<S: AsRef<str>>(items: &[S]) -> String {
    let mut out = String::new();
    for item in items {
        out.push_str(item.as_ref());
        out.push('\n');
    }
    out
}
