//! HTTP front end exposing the search pipeline.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use crate::query::DEFAULT_MAX_RESULTS;
use crate::{SearchError, SearchQuery, Searcher};

#[derive(Clone)]
struct AppState {
    searcher: Arc<Searcher>,
}

/// Query string of `GET /search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Search terms.
    pub q: Option<String>,
    /// Result limit.
    pub max_results: Option<usize>,
}

struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.0, Json(json!({ "error": self.1 }))).into_response()
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        let status = match &err {
            SearchError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            SearchError::ProviderUnavailable { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiError(status, err.to_string())
    }
}

/// Builds the router serving `/search` and `/health`.
pub fn router(searcher: Arc<Searcher>) -> Router {
    Router::new()
        .route("/search", get(search_handler))
        .route("/health", get(health_handler))
        .with_state(AppState { searcher })
}

/// Serves the router on `addr` until the process stops.
pub async fn serve(searcher: Arc<Searcher>, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Search server listening on {}", listener.local_addr()?);
    axum::serve(listener, router(searcher)).await?;
    Ok(())
}

async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn search_handler(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) =
        params.map_err(|rejection| ApiError(StatusCode::BAD_REQUEST, rejection.body_text()))?;
    let text = params.q.unwrap_or_default();
    if text.trim().is_empty() {
        return Err(ApiError(
            StatusCode::BAD_REQUEST,
            "query parameter 'q' is required".to_string(),
        ));
    }

    let max_results = params.max_results.unwrap_or(DEFAULT_MAX_RESULTS);
    if max_results == 0 {
        return Err(ApiError(
            StatusCode::BAD_REQUEST,
            "max_results must be greater than zero".to_string(),
        ));
    }

    let query = SearchQuery::new(text).with_max_results(max_results);
    match state.searcher.search_response(query).await {
        Ok(response) => Ok(Json(response).into_response()),
        Err(e) => {
            warn!("Search request failed: {}", e);
            Err(e.into())
        }
    }
}
