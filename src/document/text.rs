//! Plain-text documents with form-feed page breaks.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};

use super::{PagedDocument, PageRange};

/// Page separator used by `pdftotext` and friends.
pub const PAGE_BREAK: char = '\x0C';

/// A document whose pages are already text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextDocument {
    pages: Vec<String>,
}

impl TextDocument {
    /// Create a document from page texts.
    pub fn new(pages: Vec<String>) -> Self {
        Self { pages }
    }

    /// Split text into pages on form feeds.
    ///
    /// A trailing form feed ends the last page rather than starting an
    /// empty one.
    pub fn from_text(text: &str) -> Self {
        let text = text.strip_suffix(PAGE_BREAK).unwrap_or(text);
        if text.is_empty() {
            return Self::default();
        }
        Self::new(text.split(PAGE_BREAK).map(str::to_string).collect())
    }

    /// Read a UTF-8 text file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let text = String::from_utf8(bytes)
            .map_err(|_| Error::Document(format!("{} is not UTF-8 text", path.display())))?;
        Ok(Self::from_text(&text))
    }

    /// Page texts in order.
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// Write pages joined by form feeds.
    pub fn save_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let joined = self.pages.join(&PAGE_BREAK.to_string());
        writer.write_all(joined.as_bytes())?;
        Ok(())
    }
}

impl PagedDocument for TextDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_text(&self, page: u32) -> Result<String> {
        if page == 0 {
            return Err(Error::Document("page 0 does not exist".to_string()));
        }
        self.pages
            .get((page - 1) as usize)
            .cloned()
            .ok_or_else(|| {
                Error::Document(format!(
                    "page {} is out of range (document has {} pages)",
                    page,
                    self.pages.len()
                ))
            })
    }

    fn extract_pages(&self, range: PageRange) -> Self {
        let last = range.end().min(self.page_count());
        let pages = (range.start()..=last)
            .filter_map(|page| self.pages.get((page - 1) as usize).cloned())
            .collect();
        Self { pages }
    }
}
