use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    error::{AppError, AppQuery},
    state::AppState,
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: String,
}

pub fn beers_routes() -> Router<AppState> {
    Router::new().route("/beers", get(search_beers))
}

/// Relays the catalog's JSON exactly as received.
#[instrument(skip(state))]
pub async fn search_beers(
    State(state): State<AppState>,
    AppQuery(q): AppQuery<SearchQuery>,
) -> Result<Response, AppError> {
    let body = state
        .catalog
        .search(&q.search)
        .await
        .map_err(AppError::Upstream)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
