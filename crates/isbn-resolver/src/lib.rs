//! ISBN resolver: book metadata lookup across an ordered chain of catalog sources.

pub mod error;
pub mod extract;
pub mod http;
pub mod observe;
pub mod pipeline;
pub mod source;
pub mod types;

pub use error::{Absent, HttpError, SourceResult};
pub use http::{HttpClient, HttpResponse, ReqwestClient};
pub use observe::{AttemptEvent, AttemptObserver, AttemptOutcome, NoopObserver, TracingObserver};
pub use pipeline::{priority_chain, simple_chain, Chain, PriorityChain, Resolver, ResolverConfig};
pub use source::{BooksComTwSource, Endpoints, GoogleBooksSource, NclSource, Source};
pub use types::*;
