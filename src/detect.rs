//! Input format detection from leading bytes.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Kind of input document, as far as the leading bytes tell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentKind {
    /// PDF with its header version (e.g., "1.7")
    Pdf { version: String },
    /// Zip container (xlsx, xlsm, xlsb, ods)
    ZipWorkbook,
    /// OLE compound file (legacy xls)
    OleWorkbook,
    /// Anything else; treated as plain text where text is acceptable
    Other,
}

impl DocumentKind {
    /// Whether this kind is readable as a spreadsheet.
    pub fn is_workbook(&self) -> bool {
        matches!(self, DocumentKind::ZipWorkbook | DocumentKind::OleWorkbook)
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentKind::Pdf { version } => write!(f, "PDF {}", version),
            DocumentKind::ZipWorkbook => write!(f, "workbook (zip)"),
            DocumentKind::OleWorkbook => write!(f, "workbook (xls)"),
            DocumentKind::Other => write!(f, "other"),
        }
    }
}

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.7"

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

const HEADER_LEN: usize = 16;

/// Detect the document kind of a file.
///
/// Files shorter than the sniffed header are fine; they simply detect as
/// [`DocumentKind::Other`].
pub fn detect_kind_from_path<P: AsRef<Path>>(path: P) -> Result<DocumentKind> {
    let file = File::open(path)?;
    let mut header = Vec::with_capacity(HEADER_LEN);
    file.take(HEADER_LEN as u64).read_to_end(&mut header)?;
    detect_kind_from_bytes(&header)
}

/// Detect the document kind from leading bytes.
///
/// Returns `Err(Error::UnsupportedVersion)` for a PDF header whose version
/// field is malformed.
pub fn detect_kind_from_bytes(data: &[u8]) -> Result<DocumentKind> {
    if data.starts_with(ZIP_MAGIC) {
        return Ok(DocumentKind::ZipWorkbook);
    }
    if data.starts_with(OLE_MAGIC) {
        return Ok(DocumentKind::OleWorkbook);
    }
    if !data.starts_with(PDF_MAGIC) {
        return Ok(DocumentKind::Other);
    }
    if data.len() < PDF_MAGIC_LEN + VERSION_LEN {
        return Err(Error::UnknownFormat("truncated PDF header".to_string()));
    }

    let version_bytes = &data[PDF_MAGIC_LEN..PDF_MAGIC_LEN + VERSION_LEN];
    let version = String::from_utf8_lossy(version_bytes).to_string();
    if !is_valid_version(&version) {
        return Err(Error::UnsupportedVersion(version));
    }

    Ok(DocumentKind::Pdf { version })
}

/// Check if a version string looks like "1.7".
fn is_valid_version(version: &str) -> bool {
    let chars: Vec<char> = version.chars().collect();
    chars.len() == 3 && chars[0].is_ascii_digit() && chars[1] == '.' && chars[2].is_ascii_digit()
}

/// Check if bytes start with a valid PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    matches!(detect_kind_from_bytes(data), Ok(DocumentKind::Pdf { .. }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_valid_pdf() {
        let data = b"%PDF-1.7\n%\xe2\xe3\xcf\xd3";
        let kind = detect_kind_from_bytes(data).unwrap();
        assert_eq!(
            kind,
            DocumentKind::Pdf {
                version: "1.7".to_string()
            }
        );
    }

    #[test]
    fn test_detect_workbooks() {
        assert_eq!(
            detect_kind_from_bytes(b"PK\x03\x04\x14\x00").unwrap(),
            DocumentKind::ZipWorkbook
        );
        let ole = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1, 0x00];
        let kind = detect_kind_from_bytes(&ole).unwrap();
        assert_eq!(kind, DocumentKind::OleWorkbook);
        assert!(kind.is_workbook());
    }

    #[test]
    fn test_detect_other() {
        assert_eq!(
            detect_kind_from_bytes(b"<!DOCTYPE html>").unwrap(),
            DocumentKind::Other
        );
        assert_eq!(detect_kind_from_bytes(b"").unwrap(), DocumentKind::Other);
    }

    #[test]
    fn test_detect_truncated_pdf() {
        let result = detect_kind_from_bytes(b"%PDF-1");
        assert!(matches!(result, Err(Error::UnknownFormat(_))));
    }

    #[test]
    fn test_detect_bad_version() {
        let result = detect_kind_from_bytes(b"%PDF-x.y\n");
        assert!(matches!(result, Err(Error::UnsupportedVersion(_))));
    }

    #[test]
    fn test_is_pdf_bytes() {
        assert!(is_pdf_bytes(b"%PDF-1.4\n"));
        assert!(!is_pdf_bytes(b"Not a PDF"));
    }

    #[test]
    fn test_version_validation() {
        assert!(is_valid_version("1.0"));
        assert!(is_valid_version("2.0"));
        assert!(!is_valid_version("10.0"));
        assert!(!is_valid_version("abc"));
    }
}
