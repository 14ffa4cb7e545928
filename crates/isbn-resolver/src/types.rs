//! Core data types for resolved book metadata.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bibliographic metadata for one ISBN.
///
/// The `isbn` is always the queried key, never a value echoed back by a
/// source. `source` is only set by the priority chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub isbn: String,
    pub title: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Provenance>,
}

impl BookRecord {
    /// Create an untagged record.
    pub fn new(
        isbn: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            isbn: isbn.into(),
            title: title.into(),
            author: author.into(),
            source: None,
        }
    }

    /// A record counts as a hit only if it carries a title or an author.
    pub fn is_valid(&self) -> bool {
        !self.title.is_empty() || !self.author.is_empty()
    }

    /// Return the record tagged with where it came from.
    pub fn with_provenance(mut self, provenance: Provenance) -> Self {
        self.source = Some(provenance);
        self
    }
}

/// Which branch of the priority chain satisfied a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// The National Central Library session search matched.
    Ncl,
    /// The simple chain behind it matched.
    Fallback,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Ncl => "ncl",
            Provenance::Fallback => "fallback",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a concrete metadata source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    GoogleBooks,
    BooksComTw,
    Ncl,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::GoogleBooks => "google_books",
            SourceKind::BooksComTw => "books_com_tw",
            SourceKind::Ncl => "ncl",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
