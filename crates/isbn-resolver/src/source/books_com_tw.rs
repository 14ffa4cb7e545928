//! books.com.tw search page adapter.

use super::{endpoint_url, Source};
use crate::error::{Absent, SourceResult};
use crate::extract::{BooksComTwRule, ExtractionRule};
use crate::http::{browser_headers, HttpClient};
use crate::types::SourceKind;
use async_trait::async_trait;
use std::sync::Arc;

pub struct BooksComTwSource {
    client: Arc<dyn HttpClient>,
    base: String,
}

impl BooksComTwSource {
    pub fn new(client: Arc<dyn HttpClient>, base: impl Into<String>) -> Self {
        Self {
            client,
            base: base.into(),
        }
    }

    fn search_url(&self, isbn: &str) -> Result<String, Absent> {
        let url = endpoint_url(&self.base, &["search", "query", "key", isbn, "cat", "all"])?;
        Ok(url.into())
    }
}

#[async_trait]
impl Source for BooksComTwSource {
    fn kind(&self) -> SourceKind {
        SourceKind::BooksComTw
    }

    async fn resolve(&self, isbn: &str) -> SourceResult {
        let url = self.search_url(isbn)?;
        let resp = self.client.get(&url, &browser_headers()).await?;
        if !resp.is_success() {
            tracing::warn!("books.com.tw returned status {} for {isbn}", resp.status);
            return Err(Absent::Status(resp.status));
        }

        BooksComTwRule
            .extract(&resp.body, isbn)
            .ok_or(Absent::NoMatch)
    }
}
