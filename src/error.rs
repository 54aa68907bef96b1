use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    MalformedRequest(String),
    UnknownRoute(String),
    Persistence(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::MalformedRequest(msg) => write!(f, "Malformed Request: {msg}"),
            AppError::UnknownRoute(msg) => write!(f, "Unknown Route: {msg}"),
            AppError::Persistence(msg) => write!(f, "Persistence Failure: {msg}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::MalformedRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::UnknownRoute(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            // The cause is logged where it is detected; the caller gets a
            // generic message.
            AppError::Persistence(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error processing application. Please try again or contact us directly."
                    .to_string(),
            ),
        };

        let body = json!({ "success": false, "message": message });
        (status, axum::Json(body)).into_response()
    }
}
