//! Configuration loading and resolution.
//!
//! Every setting is a CLI flag with an environment fallback.

use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use isbn_resolver::{Endpoints, ReqwestClient, Resolver, ResolverConfig, TracingObserver};

/// Listener and source settings shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct ServerConfig {
    /// Interface to listen on.
    #[arg(long, env = "HOST", default_value = "0.0.0.0", global = true)]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 5000, global = true)]
    pub port: u16,

    /// Query Google Books before books.com.tw in the simple chain.
    #[arg(long, env = "ISBN_GOOGLE_BOOKS", global = true)]
    pub google_books: bool,

    /// Per-request timeout for outbound calls in milliseconds.
    /// Unset means wait on the remote indefinitely.
    #[arg(long, env = "ISBN_TIMEOUT_MS", global = true)]
    pub timeout_ms: Option<u64>,

    /// Override the Google Books API base URL.
    #[arg(long, env = "ISBN_GOOGLE_BOOKS_URL", hide = true, global = true)]
    pub google_books_url: Option<String>,

    /// Override the books.com.tw search base URL.
    #[arg(long, env = "ISBN_BOOKS_COM_TW_URL", hide = true, global = true)]
    pub books_com_tw_url: Option<String>,

    /// Override the NCL metadata base URL.
    #[arg(long, env = "ISBN_NCL_URL", hide = true, global = true)]
    pub ncl_url: Option<String>,
}

impl ServerConfig {
    /// Source wiring for the resolver.
    pub fn resolver_config(&self) -> ResolverConfig {
        let defaults = Endpoints::default();
        ResolverConfig {
            google_books_enabled: self.google_books,
            endpoints: Endpoints {
                google_books: self
                    .google_books_url
                    .clone()
                    .unwrap_or(defaults.google_books),
                books_com_tw: self
                    .books_com_tw_url
                    .clone()
                    .unwrap_or(defaults.books_com_tw),
                ncl: self.ncl_url.clone().unwrap_or(defaults.ncl),
            },
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Build the production resolver: reqwest client, tracing observer.
    pub fn build_resolver(&self) -> Resolver {
        Resolver::new(
            &self.resolver_config(),
            Arc::new(ReqwestClient::new(self.timeout())),
            Arc::new(TracingObserver),
        )
    }
}
