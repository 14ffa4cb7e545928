//! HTTP client capability handed to every source adapter.
//!
//! Adapters never build their own client. They receive an
//! `Arc<dyn HttpClient>` at construction so tests can substitute a
//! scripted double. Each call is a single attempt: no retry, no backoff.

use crate::error::HttpError;
use async_trait::async_trait;
use std::time::Duration;

/// Desktop browser user-agent sent to sites that reject bare clients.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                                      AppleWebKit/537.36 (KHTML, like Gecko) \
                                      Chrome/91.0.4472.124 Safari/537.36";

pub const BROWSER_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

pub const BROWSER_ACCEPT_LANGUAGE: &str = "zh-TW,zh;q=0.9,en;q=0.8";

/// The header set scrape requests send to look like a browser.
pub fn browser_headers() -> Vec<(String, String)> {
    vec![
        ("User-Agent".to_string(), BROWSER_USER_AGENT.to_string()),
        ("Accept".to_string(), BROWSER_ACCEPT.to_string()),
        (
            "Accept-Language".to_string(),
            BROWSER_ACCEPT_LANGUAGE.to_string(),
        ),
    ]
}

/// Response from an outbound request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Original requested URL.
    pub url: String,
    /// Final URL after redirects.
    pub final_url: String,
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    /// True for any 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Outbound HTTP as a capability.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// GET `url` with the given extra headers.
    async fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> Result<HttpResponse, HttpError>;

    /// POST url-encoded `fields` to `url` with the given extra headers.
    async fn post_form(
        &self,
        url: &str,
        fields: &[(String, String)],
        headers: &[(String, String)],
    ) -> Result<HttpResponse, HttpError>;
}

/// Production client wrapping reqwest.
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Create a client. `timeout` of `None` waits on the remote indefinitely.
    pub fn new(timeout: Option<Duration>) -> Self {
        let mut builder =
            reqwest::Client::builder().redirect(reqwest::redirect::Policy::limited(5));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Self {
            client: builder.build().unwrap_or_default(),
        }
    }

    async fn read(url: &str, r: reqwest::Response) -> Result<HttpResponse, HttpError> {
        let status = r.status().as_u16();
        let final_url = r.url().to_string();
        let body = r.text().await.map_err(|e| HttpError::Body {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        Ok(HttpResponse {
            url: url.to_string(),
            final_url,
            status,
            body,
        })
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(
        &self,
        url: &str,
        headers: &[(String, String)],
    ) -> Result<HttpResponse, HttpError> {
        let mut builder = self.client.get(url);
        for (name, value) in headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let r = builder.send().await.map_err(|e| HttpError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        Self::read(url, r).await
    }

    async fn post_form(
        &self,
        url: &str,
        fields: &[(String, String)],
        headers: &[(String, String)],
    ) -> Result<HttpResponse, HttpError> {
        let mut builder = self.client.post(url);
        for (name, value) in headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = builder.form(fields);

        let r = builder.send().await.map_err(|e| HttpError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        Self::read(url, r).await
    }
}
