//! Text extraction stage: page text to filtered lines.

use crate::condition::Condition;
use crate::document::PagedDocument;
use crate::error::Result;
use crate::pipeline::ErrorMode;

/// Collect the trimmed, non-empty lines of every page that pass `condition`.
///
/// Lines come out in page order, then line order within the page. Nothing is
/// sorted or deduplicated. In [`ErrorMode::Strict`] the first unreadable page
/// fails the whole stage; in [`ErrorMode::Lenient`] that page is skipped.
pub fn extract_filtered_lines<D: PagedDocument + ?Sized>(
    doc: &D,
    condition: Condition,
    error_mode: ErrorMode,
) -> Result<Vec<String>> {
    let mut lines = Vec::new();

    for page in 1..=doc.page_count() {
        let text = match doc.page_text(page) {
            Ok(text) => text,
            Err(e) if error_mode == ErrorMode::Lenient => {
                log::warn!("Failed to extract text from page {}: {}", page, e);
                continue;
            }
            Err(e) => return Err(e),
        };

        let before = lines.len();
        lines.extend(filter_lines(&text, condition));
        log::trace!("page {}: kept {} lines", page, lines.len() - before);
    }

    Ok(lines)
}

/// Trimmed, non-empty lines of `text` that pass `condition`.
pub fn filter_lines(text: &str, condition: Condition) -> impl Iterator<Item = String> + '_ {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(move |line| condition.matches(line))
        .map(str::to_string)
}
