//! Request and error types for the HTTP surface.

pub mod error;

pub use error::{ApiError, ApiResult};

/// Query string of both search routes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IsbnQuery {
    pub isbn: Option<String>,
}

impl IsbnQuery {
    /// Pick `isbn` out of raw query pairs. A repeated key keeps its first value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let isbn = pairs
            .into_iter()
            .find(|(key, _)| key == "isbn")
            .map(|(_, value)| value);
        Self { isbn }
    }
}
