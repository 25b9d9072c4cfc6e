use axum::{middleware, routing::get, Router};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::auth::{self, require_auth};
use crate::state::AppState;
use crate::{beers, favorites};

pub fn build_app(state: AppState) -> Router {
    // `route_layer` only wraps the routes registered before it, so the auth
    // routes nested afterwards stay open.
    let api = Router::new()
        .merge(beers::router())
        .merge(favorites::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .nest("/auth", auth::router());

    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .nest("/api", api)
        .route("/health", get(|| async { "ok" }))
        .fallback_service(static_files)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri, status = tracing::field::Empty)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, ?latency, "response");
                        } else {
                            tracing::info!(%status, ?latency, "response");
                        }
                    },
                ),
        )
}
