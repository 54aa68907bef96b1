use axum::extract::{Path, State};
use axum::Json;
use serde_json::json;

use crate::error::AppError;
use crate::state::SharedState;
use crate::submission::naming;

/// List summaries of all stored applications, newest first. Read-only.
pub async fn list(State(state): State<SharedState>) -> Result<Json<serde_json::Value>, AppError> {
    let applications = state.store.list_summaries().await.map_err(|e| {
        tracing::error!(route = "/api/applications", error = %e, "failed to list applications");
        AppError::Persistence(e.to_string())
    })?;

    Ok(Json(json!({
        "success": true,
        "count": applications.len(),
        "applications": applications,
    })))
}

/// Full details of one stored application. Only bare `.json` names are
/// looked up, so a crafted name can never reach outside the store.
pub async fn get(
    State(state): State<SharedState>,
    Path(filename): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !naming::is_stored_name(&filename) {
        tracing::warn!(route = "/api/applications", "rejected application name");
        return Err(AppError::UnknownRoute("Application not found".to_string()));
    }

    let record = state
        .store
        .load(&filename)
        .await
        .map_err(|e| {
            tracing::error!(route = "/api/applications", %filename, error = %e, "failed to read application");
            AppError::Persistence(e.to_string())
        })?
        .ok_or_else(|| AppError::UnknownRoute("Application not found".to_string()))?;

    Ok(Json(json!({
        "success": true,
        "filename": filename,
        "application": record,
    })))
}
