//! ISBN resolver server: HTTP access to book metadata lookup with source fallback.

pub mod config;
pub mod transport;
pub mod types;

pub use config::ServerConfig;
pub use transport::{router, serve, AppState};
pub use types::{ApiError, ApiResult};
