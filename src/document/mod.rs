//! Paginated source documents.
//!
//! A source document is an ordered sequence of pages, each of which renders
//! to text on demand. [`PagedDocument`] is the seam between the pipeline and
//! the concrete formats: [`PdfDocument`] (backed by lopdf) and
//! [`TextDocument`] (form-feed separated plain text).

mod content;
mod pdf;
mod range;
mod text;

pub use pdf::PdfDocument;
pub use range::PageRange;
pub use text::TextDocument;

use std::io::Write;
use std::path::Path;

use crate::detect::{detect_kind_from_path, DocumentKind};
use crate::error::Result;

/// Abstract interface for a paginated document.
pub trait PagedDocument {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Full rendered text of a page (1-indexed).
    fn page_text(&self, page: u32) -> Result<String>;

    /// Build a new document holding only the pages in `range`, in original
    /// order. Pages past the end of the document are skipped, so the result
    /// may be empty.
    fn extract_pages(&self, range: PageRange) -> Self
    where
        Self: Sized;
}

/// A source document of any supported kind.
#[derive(Debug, Clone)]
pub enum SourceDocument {
    Pdf(PdfDocument),
    Text(TextDocument),
}

impl SourceDocument {
    /// Open a document, choosing the backend from its leading bytes.
    ///
    /// PDFs go to [`PdfDocument`]; everything else is read as UTF-8 text.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match detect_kind_from_path(path)? {
            DocumentKind::Pdf { .. } => Ok(Self::Pdf(PdfDocument::open(path)?)),
            _ => Ok(Self::Text(TextDocument::open(path)?)),
        }
    }

    /// Short human label for the backend.
    pub fn kind_name(&self) -> &'static str {
        match self {
            SourceDocument::Pdf(_) => "pdf",
            SourceDocument::Text(_) => "text",
        }
    }

    /// Serialize the document in its own format.
    pub fn save_to<W: Write>(&mut self, writer: &mut W) -> Result<()> {
        match self {
            SourceDocument::Pdf(doc) => doc.save_to(writer),
            SourceDocument::Text(doc) => doc.save_to(writer),
        }
    }

    /// File extension matching [`save_to`](Self::save_to) output.
    pub fn extension(&self) -> &'static str {
        match self {
            SourceDocument::Pdf(_) => "pdf",
            SourceDocument::Text(_) => "txt",
        }
    }
}

impl PagedDocument for SourceDocument {
    fn page_count(&self) -> u32 {
        match self {
            SourceDocument::Pdf(doc) => doc.page_count(),
            SourceDocument::Text(doc) => doc.page_count(),
        }
    }

    fn page_text(&self, page: u32) -> Result<String> {
        match self {
            SourceDocument::Pdf(doc) => doc.page_text(page),
            SourceDocument::Text(doc) => doc.page_text(page),
        }
    }

    fn extract_pages(&self, range: PageRange) -> Self {
        match self {
            SourceDocument::Pdf(doc) => SourceDocument::Pdf(doc.extract_pages(range)),
            SourceDocument::Text(doc) => SourceDocument::Text(doc.extract_pages(range)),
        }
    }
}
