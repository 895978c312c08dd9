//! Snapshot download and restore.

use axum::{
    extract::{Multipart, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use service_core::AppError;

use crate::services::store::Snapshot;
use crate::AppState;

/// Download the clients + invoices snapshot as a JSON attachment.
pub async fn backup_download(State(state): State<AppState>) -> Result<Response, AppError> {
    let snapshot = state.store.export_snapshot();
    let body = serde_json::to_string_pretty(&snapshot)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Snapshot encode: {}", e)))?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"db_aici.json\"".to_string(),
            ),
        ],
        body,
    )
        .into_response())
}

/// Replace the in-memory state with an uploaded snapshot file.
///
/// Expects a multipart upload of a `.json` file whose top level carries
/// `clients` and `invoices` arrays.
pub async fn restore_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Invalid multipart payload: {}", e)))?
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Missing snapshot file")))?;

    let file_name = field.file_name().unwrap_or_default().to_string();
    if !file_name.to_lowercase().ends_with(".json") {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Please provide a .json file"
        )));
    }

    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Failed to read upload: {}", e)))?;

    let value: serde_json::Value = serde_json::from_slice(&data)
        .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Import failed: {}", e)))?;
    if !value.get("clients").is_some_and(|v| v.is_array())
        || !value.get("invoices").is_some_and(|v| v.is_array())
    {
        return Err(AppError::BadRequest(anyhow::anyhow!(
            "Invalid snapshot structure ('clients' and 'invoices' keys required)"
        )));
    }

    let snapshot: Snapshot = serde_json::from_value(value)
        .map_err(|e| AppError::BadRequest(anyhow::anyhow!("Import failed: {}", e)))?;
    let (clients, invoices) = state.store.restore(snapshot)?;

    Ok(Json(json!({
        "ok": true,
        "clients": clients,
        "invoices": invoices,
    })))
}
