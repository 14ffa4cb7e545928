//! Source adapters.
//!
//! Each adapter wraps one external catalog behind [`Source::resolve`]. Any
//! failure on the way (transport, status, markup, empty fields) comes back
//! as an [`Absent`] value; adapters never decide whether to fall back.

pub mod books_com_tw;
pub mod google_books;
pub mod ncl;

pub use books_com_tw::BooksComTwSource;
pub use google_books::GoogleBooksSource;
pub use ncl::NclSource;

use crate::error::{Absent, SourceResult};
use crate::types::SourceKind;
use async_trait::async_trait;
use url::Url;

/// One external metadata source.
#[async_trait]
pub trait Source: Send + Sync {
    /// Which source this is, for provenance and diagnostics.
    fn kind(&self) -> SourceKind;

    /// Look up `isbn`. A single attempt; never retried.
    async fn resolve(&self, isbn: &str) -> SourceResult;
}

/// Base URLs of the concrete sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub google_books: String,
    pub books_com_tw: String,
    pub ncl: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            google_books: "https://www.googleapis.com".to_string(),
            books_com_tw: "https://search.books.com.tw".to_string(),
            ncl: "https://metadata.ncl.edu.tw".to_string(),
        }
    }
}

impl Endpoints {
    /// Point every source at one host. Used against local mock servers.
    pub fn all_at(base: &str) -> Self {
        Self {
            google_books: base.to_string(),
            books_com_tw: base.to_string(),
            ncl: base.to_string(),
        }
    }
}

/// Parse a configured base URL, appending `segments` as escaped path parts.
pub(crate) fn endpoint_url(base: &str, segments: &[&str]) -> Result<Url, Absent> {
    let mut url =
        Url::parse(base).map_err(|e| Absent::Network(format!("invalid endpoint {base}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| Absent::Network(format!("endpoint {base} cannot carry a path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
