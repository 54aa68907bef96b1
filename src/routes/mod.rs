pub mod applications;
pub mod submit;

use axum::routing::{get, post};
use axum::Router;

use crate::state::SharedState;

pub fn intake_routes() -> Router<SharedState> {
    Router::new()
        .route(
            "/submit_application",
            post(submit::submit).options(submit::preflight),
        )
        .route("/api/applications", get(applications::list))
        .route("/api/applications/{filename}", get(applications::get))
}
