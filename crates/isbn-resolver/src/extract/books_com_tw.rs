//! books.com.tw search results page rule.

use super::{candidate, ExtractionRule};
use crate::types::BookRecord;
use scraper::{Html, Selector};

const ENTRY_SELECTOR: &str = ".table-container .table-tr .table-td";
const TITLE_SELECTOR: &str = "h4 a";
const AUTHOR_SELECTOR: &str = ".type .author a";

/// Annotation the site appends to e-book titles.
pub const EBOOK_SUFFIX: &str = " (電子書)";

/// Reads the first search result entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooksComTwRule;

impl ExtractionRule for BooksComTwRule {
    fn extract(&self, document: &str, isbn: &str) -> Option<BookRecord> {
        let html = Html::parse_document(document);
        let entry_sel = Selector::parse(ENTRY_SELECTOR).ok()?;
        let title_sel = Selector::parse(TITLE_SELECTOR).ok()?;
        let author_sel = Selector::parse(AUTHOR_SELECTOR).ok()?;

        let Some(entry) = html.select(&entry_sel).next() else {
            tracing::debug!("no result entry on books.com.tw");
            return None;
        };

        let title = entry
            .select(&title_sel)
            .next()
            .and_then(|a| a.value().attr("title"))
            .map(|t| t.replacen(EBOOK_SUFFIX, "", 1))
            .unwrap_or_default();

        let author = entry
            .select(&author_sel)
            .filter_map(|a| a.value().attr("title"))
            .collect::<Vec<_>>()
            .join(", ");

        let record = candidate(isbn, title, author);
        if record.is_none() {
            tracing::debug!("books.com.tw entry has neither title nor author");
        }
        record
    }
}
