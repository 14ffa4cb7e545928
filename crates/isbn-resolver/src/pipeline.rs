//! Resolution pipeline: ordered, short-circuiting source chains.
//!
//! Two configurations are exposed through [`Resolver`]:
//!
//! - the simple chain, `[Google Books →] books.com.tw`, whose records are
//!   returned untagged;
//! - the priority chain, NCL first with the simple chain as fallback, whose
//!   records carry a [`Provenance`] tag.
//!
//! Sources run strictly one after another. The first valid record wins and
//! no later source is consulted; fields are never merged across sources.

use crate::error::Absent;
use crate::http::HttpClient;
use crate::observe::{AttemptEvent, AttemptObserver, AttemptOutcome};
use crate::source::{BooksComTwSource, Endpoints, GoogleBooksSource, NclSource, Source};
use crate::types::{BookRecord, Provenance};
use std::sync::Arc;
use std::time::Instant;

/// An ordered list of sources tried until one matches.
#[derive(Clone)]
pub struct Chain {
    sources: Vec<Arc<dyn Source>>,
    observer: Arc<dyn AttemptObserver>,
}

impl Chain {
    pub fn new(sources: Vec<Arc<dyn Source>>, observer: Arc<dyn AttemptObserver>) -> Self {
        Self { sources, observer }
    }

    /// Sources in priority order.
    pub fn sources(&self) -> &[Arc<dyn Source>] {
        &self.sources
    }

    /// Try each source in order and return the first valid record.
    pub async fn resolve(&self, isbn: &str) -> Option<BookRecord> {
        for source in &self.sources {
            let started = Instant::now();
            let result = source
                .resolve(isbn)
                .await
                .and_then(|record| {
                    if record.is_valid() {
                        Ok(record)
                    } else {
                        Err(Absent::NoMatch)
                    }
                });

            let outcome = match &result {
                Ok(_) => AttemptOutcome::Found,
                Err(reason) => AttemptOutcome::Absent(reason.clone()),
            };
            self.observer.on_attempt(&AttemptEvent {
                source: source.kind(),
                isbn: isbn.to_string(),
                outcome,
                latency: started.elapsed(),
            });

            if let Ok(record) = result {
                return Some(record);
            }
        }
        None
    }
}

/// A primary chain backed by a fallback chain, tagging which one matched.
#[derive(Clone)]
pub struct PriorityChain {
    primary: Chain,
    fallback: Chain,
}

impl PriorityChain {
    pub fn new(primary: Chain, fallback: Chain) -> Self {
        Self { primary, fallback }
    }

    pub async fn resolve(&self, isbn: &str) -> Option<BookRecord> {
        if let Some(record) = self.primary.resolve(isbn).await {
            return Some(record.with_provenance(Provenance::Ncl));
        }

        tracing::debug!("primary chain had no match for {isbn}, trying fallback");
        match self.fallback.resolve(isbn).await {
            Some(record) => Some(record.with_provenance(Provenance::Fallback)),
            None => {
                tracing::info!("no source had a match for {isbn}");
                None
            }
        }
    }
}

/// Which sources the resolver wires up and where they live.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Put Google Books in front of books.com.tw in the simple chain.
    pub google_books_enabled: bool,
    pub endpoints: Endpoints,
}

/// Build the simple chain for `config`.
pub fn simple_chain(
    config: &ResolverConfig,
    client: Arc<dyn HttpClient>,
    observer: Arc<dyn AttemptObserver>,
) -> Chain {
    let mut sources: Vec<Arc<dyn Source>> = Vec::new();
    if config.google_books_enabled {
        sources.push(Arc::new(GoogleBooksSource::new(
            client.clone(),
            config.endpoints.google_books.clone(),
        )));
    }
    sources.push(Arc::new(BooksComTwSource::new(
        client,
        config.endpoints.books_com_tw.clone(),
    )));
    Chain::new(sources, observer)
}

/// Build the NCL-first priority chain for `config`.
pub fn priority_chain(
    config: &ResolverConfig,
    client: Arc<dyn HttpClient>,
    observer: Arc<dyn AttemptObserver>,
) -> PriorityChain {
    let ncl: Arc<dyn Source> = Arc::new(NclSource::new(
        client.clone(),
        config.endpoints.ncl.clone(),
    ));
    let primary = Chain::new(vec![ncl], observer.clone());
    PriorityChain::new(primary, simple_chain(config, client, observer))
}

/// Both entry points behind one handle.
#[derive(Clone)]
pub struct Resolver {
    simple: Chain,
    priority: PriorityChain,
}

impl Resolver {
    pub fn new(
        config: &ResolverConfig,
        client: Arc<dyn HttpClient>,
        observer: Arc<dyn AttemptObserver>,
    ) -> Self {
        Self {
            simple: simple_chain(config, client.clone(), observer.clone()),
            priority: priority_chain(config, client, observer),
        }
    }

    pub fn from_chains(simple: Chain, priority: PriorityChain) -> Self {
        Self { simple, priority }
    }

    /// Simple chain. Zero or one untagged record.
    pub async fn search(&self, isbn: &str) -> Vec<BookRecord> {
        self.simple.resolve(isbn).await.into_iter().collect()
    }

    /// Priority chain. Zero or one record tagged `ncl` or `fallback`.
    pub async fn search_with_provenance(&self, isbn: &str) -> Vec<BookRecord> {
        self.priority.resolve(isbn).await.into_iter().collect()
    }
}
