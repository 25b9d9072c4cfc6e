use axum::{
    extract::State,
    routing::{delete, get},
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::{dto::NewFavorite, repo_types::Favorite};
use crate::{
    auth::AuthUser,
    error::{AppError, AppJson, AppPath},
    state::AppState,
};

pub fn favorites_routes() -> Router<AppState> {
    Router::new()
        .route("/my/favorites", get(list_favorites).post(add_favorite))
        .route("/my/favorites/:id", delete(delete_favorite))
}

#[instrument(skip(state))]
pub async fn list_favorites(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Favorite>>, AppError> {
    let rows = state
        .favorites
        .list_by_user(user_id)
        .await
        .map_err(AppError::Store)?;
    Ok(Json(rows))
}

#[instrument(skip(state, payload))]
pub async fn add_favorite(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppJson(payload): AppJson<NewFavorite>,
) -> Result<Json<Favorite>, AppError> {
    let row = state
        .favorites
        .create(user_id, payload)
        .await
        .map_err(AppError::Store)?;
    info!(user_id, favorite_id = row.id, "favorite added");
    Ok(Json(row))
}

/// Deletes by id alone; the row is not required to belong to the caller.
#[instrument(skip(state))]
pub async fn delete_favorite(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppPath(id): AppPath<i32>,
) -> Result<Json<Vec<Favorite>>, AppError> {
    let rows = state.favorites.delete(id).await.map_err(AppError::Store)?;
    for row in rows.iter().filter(|r| r.user_id != user_id) {
        warn!(user_id, owner_id = row.user_id, favorite_id = row.id, "deleted another user's favorite");
    }
    Ok(Json(rows))
}
