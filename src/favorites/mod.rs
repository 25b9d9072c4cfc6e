mod dto;
pub mod handlers;
pub mod repo;
mod repo_types;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::favorites_routes()
}
