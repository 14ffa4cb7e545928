//! Error types for source lookups.

use crate::types::BookRecord;

/// Failure of an outbound HTTP call.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HttpError {
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Failed to read body from {url}: {message}")]
    Body { url: String, message: String },
}

/// Why a source produced no record.
///
/// Every variant means "not found" to the pipeline. The distinction only
/// reaches the attempt observer.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Absent {
    #[error("Network failure: {0}")]
    Network(String),

    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    #[error("Markup mismatch: {0}")]
    Markup(String),

    #[error("No usable record")]
    NoMatch,
}

impl From<HttpError> for Absent {
    fn from(e: HttpError) -> Self {
        Absent::Network(e.to_string())
    }
}

/// Outcome of one source adapter call.
pub type SourceResult = Result<BookRecord, Absent>;
