use axum::{extract::State, routing::post, Json, Router};
use tracing::instrument;

use crate::{
    auth::{
        dto::{AuthResponse, Credentials},
        services,
    },
    error::{AppError, AppJson},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Credentials>,
) -> Result<Json<AuthResponse>, AppError> {
    let res = services::register(state.users.as_ref(), &state.jwt, payload).await?;
    Ok(Json(res))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Credentials>,
) -> Result<Json<AuthResponse>, AppError> {
    let res = services::login(state.users.as_ref(), &state.jwt, payload).await?;
    Ok(Json(res))
}
