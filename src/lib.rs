pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;
pub mod submission;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, HeaderValue, Method, Uri};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::error::AppError;
use crate::state::{AppState, SharedState};
use crate::store::SubmissionStore;

pub fn build_app(config: Config) -> Router {
    let store = SubmissionStore::new(&config.submissions_dir);
    let state: SharedState = Arc::new(AppState { config, store });

    let mut app = Router::new().merge(routes::intake_routes());

    // The form's static assets can be served from the same process.
    if let Some(dir) = &state.config.static_dir {
        app = app.nest_service("/static", ServeDir::new(dir));
    }

    app.route("/health", axum::routing::get(health))
        .fallback(unknown_route)
        .method_not_allowed_fallback(unknown_route)
        // The configured cap is authoritative, not the framework default.
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(state.config.max_body_size))
        // Browser clients submit from another origin, so every response,
        // errors included, must be readable cross-origin.
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("access-control-allow-origin"),
            HeaderValue::from_static("*"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn unknown_route(method: Method, uri: Uri) -> AppError {
    tracing::warn!(%method, path = %uri.path(), "no such route");
    AppError::UnknownRoute(format!("Endpoint not found: {method} {}", uri.path()))
}
