//! Inclusive 1-based page ranges.

use std::fmt;
use std::ops::RangeInclusive;

use serde::Serialize;

use crate::error::{Error, Result};

/// An inclusive, 1-indexed page range with `1 <= start <= end`.
///
/// The upper bound against a particular document is not part of the type;
/// extractors skip pages past the end of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PageRange {
    start: u32,
    end: u32,
}

impl PageRange {
    /// Create a range, rejecting page 0 and reversed bounds.
    pub fn new(start: u32, end: u32) -> Result<Self> {
        if start == 0 {
            return Err(Error::InvalidPageRange(
                "page 0 is invalid (pages start at 1)".to_string(),
            ));
        }
        if start > end {
            return Err(Error::InvalidPageRange(format!(
                "start page {} is after end page {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// A range covering a single page.
    pub fn single(page: u32) -> Result<Self> {
        Self::new(page, page)
    }

    /// Every page of a document with `page_count` pages.
    ///
    /// Returns `None` for an empty document.
    pub fn whole(page_count: u32) -> Option<Self> {
        Self::new(1, page_count).ok()
    }

    /// Parse "N" or "N-M".
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid =
            |part: &str| Error::InvalidPageRange(format!("invalid page number: '{}'", part));

        if let Some((start, end)) = s.split_once('-') {
            let start: u32 = start.trim().parse().map_err(|_| invalid(start))?;
            let end: u32 = end.trim().parse().map_err(|_| invalid(end))?;
            return Self::new(start, end);
        }

        let page: u32 = s.parse().map_err(|_| invalid(s))?;
        Self::single(page)
    }

    /// First page (1-indexed).
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Last page (1-indexed, inclusive).
    pub fn end(&self) -> u32 {
        self.end
    }

    /// Number of pages the range names.
    pub fn len(&self) -> u32 {
        self.end - self.start + 1
    }

    /// A valid range always names at least one page.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Check if a page number falls inside the range.
    pub fn contains(&self, page: u32) -> bool {
        self.pages().contains(&page)
    }

    /// The range as a standard inclusive range.
    pub fn pages(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }

    /// Whether the whole range lies within a document of `page_count` pages.
    pub fn fits(&self, page_count: u32) -> bool {
        self.end <= page_count
    }
}

impl fmt::Display for PageRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

impl std::str::FromStr for PageRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
