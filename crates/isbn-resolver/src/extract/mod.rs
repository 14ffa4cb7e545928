//! Per-source extraction rules.
//!
//! A rule maps one raw document (JSON or HTML) plus the queried ISBN to at
//! most one candidate record. Rules never touch the network and hold no
//! state, so the same document always yields the same answer.

pub mod books_com_tw;
pub mod google_books;
pub mod ncl;

pub use books_com_tw::BooksComTwRule;
pub use google_books::GoogleBooksRule;
pub use ncl::{extract_session_tokens, NclResultRule, SessionTokens};

use crate::types::BookRecord;
use scraper::ElementRef;

/// Pure mapping from a fetched document to a candidate record.
pub trait ExtractionRule: Send + Sync {
    /// Extract a record for `isbn`, or `None` when the document holds no
    /// usable match. A record with both title and author empty is never
    /// returned.
    fn extract(&self, document: &str, isbn: &str) -> Option<BookRecord>;
}

/// Build the record, refusing the all-empty case.
pub(crate) fn candidate(isbn: &str, title: String, author: String) -> Option<BookRecord> {
    let record = BookRecord::new(isbn, title, author);
    record.is_valid().then_some(record)
}

/// Concatenated text of an element and its descendants.
pub(crate) fn element_text(el: &ElementRef<'_>) -> String {
    el.text().collect::<String>()
}
