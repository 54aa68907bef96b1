use axum::body::Bytes;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde_json::json;

use crate::error::AppError;
use crate::state::SharedState;
use crate::submission::{enrich, parser};

/// Accept a rental application: decode the body, enrich it with server
/// metadata, and persist it as one JSON file in the submissions store.
pub async fn submit(
    State(state): State<SharedState>,
    ConnectInfo(addr): ConnectInfo<std::net::SocketAddr>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    let content_type = headers.get("content-type").and_then(|v| v.to_str().ok());

    let record = parser::parse_body(content_type, &body).map_err(|e| {
        tracing::warn!(route = "/submit_application", error = %e, "rejected malformed submission");
        AppError::MalformedRequest(e)
    })?;

    let received_at = Utc::now();
    let record = enrich::apply(record, addr.ip(), received_at);

    let filename = state.store.persist(&record, received_at).await.map_err(|e| {
        tracing::error!(route = "/submit_application", error = %e, "failed to persist application");
        AppError::Persistence(e.to_string())
    })?;

    tracing::info!(%filename, from = %addr.ip(), "application saved");

    Ok((
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Application submitted successfully",
            "filename": filename,
            "timestamp": record[enrich::SUBMITTED_AT].clone(),
        })),
    )
        .into_response())
}

/// CORS preflight for the submission route. No side effects, no body.
pub async fn preflight() -> Response {
    (
        [
            ("Access-Control-Allow-Origin", "*"),
            ("Access-Control-Allow-Methods", "POST, OPTIONS"),
            ("Access-Control-Allow-Headers", "Content-Type"),
        ],
        StatusCode::OK,
    )
        .into_response()
}
