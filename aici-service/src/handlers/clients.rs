//! Client registry endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use service_core::AppError;
use uuid::Uuid;

use crate::models::{Client, CreateClient};
use crate::AppState;

pub async fn create_client(
    State(state): State<AppState>,
    Json(input): Json<CreateClient>,
) -> Result<impl IntoResponse, AppError> {
    let client = state.store.create_client(input)?;
    Ok((StatusCode::CREATED, Json(client)))
}

pub async fn list_clients(State(state): State<AppState>) -> Json<Vec<Client>> {
    Json(state.store.list_clients())
}

/// Advance the AICI enrolment status one step.
pub async fn enrol_client(
    State(state): State<AppState>,
    Path(client_id): Path<Uuid>,
) -> Result<Json<Client>, AppError> {
    let client = state.store.enrol_client(client_id)?;
    Ok(Json(client))
}
