//! HTTP server: liveness probe and the two ISBN search routes.

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Json,
    routing::get,
    Router,
};
use isbn_resolver::{BookRecord, Resolver};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ServerConfig;
use crate::types::{ApiError, ApiResult, IsbnQuery};

/// Shared server state passed to all handlers via axum State.
pub struct AppState {
    pub resolver: Resolver,
}

/// Build the axum Router with all endpoints.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_health))
        .route("/search", get(handle_search))
        .route("/search-new", get(handle_search_new))
        .layer(cors)
        .with_state(state)
}

/// Bind to the configured host and port and serve until the process exits.
pub async fn serve(config: &ServerConfig) -> anyhow::Result<()> {
    let state = Arc::new(AppState {
        resolver: config.build_resolver(),
    });
    let app = router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!("Server running on http://{}", listener.local_addr()?);
    if config.google_books {
        tracing::info!("Google Books enabled in the simple chain");
    }

    axum::serve(listener, app).await?;
    Ok(())
}

// ── Handlers ────────────────────────────────────────────────────

async fn handle_health() -> Json<Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Raw query pairs as an `IsbnQuery`. Rejections become JSON errors.
fn isbn_query(
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<IsbnQuery> {
    let Query(pairs) = query?;
    Ok(IsbnQuery::from_pairs(pairs))
}

/// Simple chain. A missing `isbn` is looked up as the empty string.
async fn handle_search(
    State(state): State<Arc<AppState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<Json<Vec<BookRecord>>> {
    let isbn = isbn_query(query)?.isbn.unwrap_or_default();
    let records = tokio::spawn(async move { state.resolver.search(&isbn).await }).await?;
    Ok(Json(records))
}

/// Priority chain with provenance tags.
async fn handle_search_new(
    State(state): State<Arc<AppState>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<Json<Vec<BookRecord>>> {
    let isbn = isbn_query(query)?
        .isbn
        .filter(|isbn| !isbn.is_empty())
        .ok_or(ApiError::MissingIsbn)?;

    tracing::info!("resolving {isbn} with NCL priority");
    let records =
        tokio::spawn(async move { state.resolver.search_with_provenance(&isbn).await }).await?;
    Ok(Json(records))
}
