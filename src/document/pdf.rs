//! PDF documents backed by lopdf.

use std::io::{Read, Write};
use std::path::Path;

use lopdf::Document as LopdfDocument;

use crate::detect::{detect_kind_from_bytes, detect_kind_from_path, DocumentKind};
use crate::error::{Error, Result};

use super::{content, PagedDocument, PageRange};

/// A loaded PDF document.
#[derive(Debug, Clone)]
pub struct PdfDocument {
    doc: LopdfDocument,
}

impl PdfDocument {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        ensure_pdf(detect_kind_from_path(path)?)?;

        let doc = LopdfDocument::load(path)?;
        Self::from_lopdf(doc)
    }

    /// Load a PDF from an in-memory byte slice.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        ensure_pdf(detect_kind_from_bytes(data)?)?;

        let doc = LopdfDocument::load_mem(data)?;
        Self::from_lopdf(doc)
    }

    /// Load a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    fn from_lopdf(doc: LopdfDocument) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        Ok(Self { doc })
    }

    /// PDF version string from the document header.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    /// Write the document as PDF bytes.
    pub fn save_to<W: Write>(&mut self, writer: &mut W) -> Result<()> {
        self.doc
            .save_to(writer)
            .map(|_| ())
            .map_err(|e| Error::Document(format!("failed to write PDF: {}", e)))
    }
}

impl PagedDocument for PdfDocument {
    fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }

    fn page_text(&self, page: u32) -> Result<String> {
        let pages = self.doc.get_pages();
        let page_id = *pages.get(&page).ok_or_else(|| {
            Error::Document(format!(
                "page {} is out of range (document has {} pages)",
                page,
                pages.len()
            ))
        })?;
        content::page_text(&self.doc, page_id)
            .map_err(|e| Error::Document(format!("page {}: {}", page, e)))
    }

    fn extract_pages(&self, range: PageRange) -> Self {
        let mut doc = self.doc.clone();
        let pages = doc.get_pages();

        if !range.fits(pages.len() as u32) {
            log::debug!(
                "page range {} extends past the last page ({}); skipping the excess",
                range,
                pages.len()
            );
        }

        let outside: Vec<u32> = pages
            .keys()
            .copied()
            .filter(|page| !range.contains(*page))
            .collect();
        doc.delete_pages(&outside);
        doc.prune_objects();

        Self { doc }
    }
}

fn ensure_pdf(kind: DocumentKind) -> Result<()> {
    match kind {
        DocumentKind::Pdf { .. } => Ok(()),
        other => Err(Error::UnknownFormat(format!("expected a PDF, found {}", other))),
    }
}
