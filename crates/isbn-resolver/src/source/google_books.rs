//! Google Books volumes API adapter.

use super::{endpoint_url, Source};
use crate::error::{Absent, SourceResult};
use crate::extract::{ExtractionRule, GoogleBooksRule};
use crate::http::HttpClient;
use crate::types::SourceKind;
use async_trait::async_trait;
use std::sync::Arc;

pub struct GoogleBooksSource {
    client: Arc<dyn HttpClient>,
    base: String,
}

impl GoogleBooksSource {
    pub fn new(client: Arc<dyn HttpClient>, base: impl Into<String>) -> Self {
        Self {
            client,
            base: base.into(),
        }
    }

    fn search_url(&self, isbn: &str) -> Result<String, Absent> {
        let mut url = endpoint_url(&self.base, &["books", "v1", "volumes"])?;
        url.query_pairs_mut().append_pair("q", &format!("isbn:{isbn}"));
        Ok(url.into())
    }
}

#[async_trait]
impl Source for GoogleBooksSource {
    fn kind(&self) -> SourceKind {
        SourceKind::GoogleBooks
    }

    async fn resolve(&self, isbn: &str) -> SourceResult {
        let url = self.search_url(isbn)?;
        let resp = self.client.get(&url, &[]).await?;
        if !resp.is_success() {
            tracing::warn!("google books returned status {} for {isbn}", resp.status);
            return Err(Absent::Status(resp.status));
        }

        GoogleBooksRule
            .extract(&resp.body, isbn)
            .ok_or(Absent::NoMatch)
    }
}
