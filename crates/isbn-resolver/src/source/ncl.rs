//! National Central Library metadata search adapter.
//!
//! The catalog only answers searches submitted through its legacy form,
//! and that form carries a hidden `INFO` token bound to the session
//! opened by the landing page GET. Every lookup therefore runs:
//!
//! 1. GET the landing page with browser headers.
//! 2. Harvest `INFO` and the `KM` form action. Missing either fails closed.
//! 3. POST the ISBN search to the resolved action with the token.
//! 4. Read the first row of the result table.
//!
//! Tokens are never cached; each lookup opens its own session.

use super::Source;
use crate::error::{Absent, SourceResult};
use crate::extract::{extract_session_tokens, ExtractionRule, NclResultRule};
use crate::http::{browser_headers, HttpClient};
use crate::types::SourceKind;
use async_trait::async_trait;
use std::sync::Arc;
use url::Url;

const LANDING_PATH: &str = "/blstkmc/blstkm";

pub struct NclSource {
    client: Arc<dyn HttpClient>,
    base: String,
}

impl NclSource {
    pub fn new(client: Arc<dyn HttpClient>, base: impl Into<String>) -> Self {
        Self {
            client,
            base: base.into(),
        }
    }

    fn landing_url(&self) -> String {
        format!("{}{LANDING_PATH}", self.base.trim_end_matches('/'))
    }

    /// Absolute actions pass through; anything else is anchored at the host.
    fn action_url(&self, action: &str) -> Result<String, Absent> {
        if action.starts_with("http") {
            return Ok(action.to_string());
        }
        let base = Url::parse(&self.base)
            .map_err(|e| Absent::Network(format!("invalid endpoint {}: {e}", self.base)))?;
        base.join(action)
            .map(String::from)
            .map_err(|e| Absent::Markup(format!("unusable form action {action}: {e}")))
    }

    /// Field set of the catalog's "search by ISBN" form.
    ///
    /// Names and values are the catalog's own; the image coordinates are
    /// checked server side.
    fn search_form(isbn: &str, info_value: &str) -> Vec<(String, String)> {
        [
            ("@_1_13_n", "n_"),
            ("@_1_13_n_1", "n_1"),
            ("@_1_13_n_2", "n_2"),
            ("_1_13_n_1", "n_SB/BB"),
            ("_1_13_n_2", isbn),
            ("@_1_20_K", "K_search_method"),
            ("_1_20_K", "C"),
            ("@_1_10_T", "T_YR"),
            ("_1_10_T", ""),
            ("@_1_11_T", "T_YR"),
            ("_1_11_T", ""),
            ("INFO", info_value),
            ("_IMG_檢索.x", "10"),
            ("_IMG_檢索.y", "10"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }
}

#[async_trait]
impl Source for NclSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Ncl
    }

    async fn resolve(&self, isbn: &str) -> SourceResult {
        let landing_url = self.landing_url();
        let headers = browser_headers();

        let landing = self.client.get(&landing_url, &headers).await?;
        if !landing.is_success() {
            tracing::warn!("NCL landing page returned status {}", landing.status);
            return Err(Absent::Status(landing.status));
        }

        let tokens = extract_session_tokens(&landing.body).inspect_err(|e| {
            tracing::warn!("NCL session could not be established: {e}");
        })?;
        let action_url = self.action_url(&tokens.action)?;
        tracing::debug!(info = %tokens.info_value, action = %action_url, "NCL session tokens");

        let mut post_headers = headers;
        post_headers.push(("Referer".to_string(), landing_url));
        post_headers.push(("Cache-Control".to_string(), "no-cache".to_string()));

        let resp = self
            .client
            .post_form(
                &action_url,
                &Self::search_form(isbn, &tokens.info_value),
                &post_headers,
            )
            .await?;
        tracing::debug!(status = resp.status, bytes = resp.body.len(), "NCL search response");

        if !resp.is_success() {
            let preview: String = resp.body.chars().take(500).collect();
            tracing::debug!("NCL error body: {preview}");
            return Err(Absent::Status(resp.status));
        }

        NclResultRule
            .extract(&resp.body, isbn)
            .ok_or(Absent::NoMatch)
    }
}
