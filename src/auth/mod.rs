use crate::state::AppState;
use axum::Router;

mod claims;
mod dto;
pub mod extractors;
pub mod handlers;
pub mod jwt;
mod password;
pub mod repo;
mod repo_types;
mod services;

pub use extractors::{require_auth, AuthUser};

/// Unauthenticated routes, mounted under `/api/auth`.
pub fn router() -> Router<AppState> {
    handlers::auth_routes()
}
