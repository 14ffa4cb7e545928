//! Google Books volumes API response rule.

use super::{candidate, ExtractionRule};
use crate::types::BookRecord;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumesResponse {
    #[serde(default)]
    total_items: u64,
    #[serde(default)]
    items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    #[serde(default)]
    volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
struct VolumeInfo {
    title: Option<String>,
    authors: Option<Vec<String>>,
}

/// Takes the first volume when the API reports at least one hit.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoogleBooksRule;

impl ExtractionRule for GoogleBooksRule {
    fn extract(&self, document: &str, isbn: &str) -> Option<BookRecord> {
        let response: VolumesResponse = match serde_json::from_str(document) {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("google books response is not valid JSON: {e}");
                return None;
            }
        };

        if response.total_items == 0 {
            return None;
        }

        let info = response.items.into_iter().next()?.volume_info;
        let title = info.title.unwrap_or_default();
        let author = info.authors.map(|a| a.join(", ")).unwrap_or_default();

        candidate(isbn, title, author)
    }
}
