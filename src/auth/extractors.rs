use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};

use super::services::verify_token;
use crate::{error::AppError, state::AppState};

/// Id of the user whose token passed `require_auth`.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub i32);

/// Accepts `Bearer <token>` as well as a bare token in `Authorization`.
fn token_from_header(value: &str) -> &str {
    value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .unwrap_or(value)
        .trim()
}

/// Gate for every protected route: the request is rejected here and never
/// reaches a handler unless the token verifies.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized("Missing Authorization header"))?;

    let token = token_from_header(header);
    if token.is_empty() {
        return Err(AppError::Unauthorized("Missing Authorization header"));
    }

    let user_id = verify_token(&state.jwt, token)?;
    req.extensions_mut().insert(AuthUser(user_id));

    Ok(next.run(req).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or(AppError::Unauthorized("Authentication required"))
    }
}
