//! Invoice endpoints, including the simulated AICI send and the PDF export.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use service_core::AppError;
use uuid::Uuid;

use crate::models::{CreateInvoice, Invoice, RoundingPolicy};
use crate::services::pdf;
use crate::AppState;

pub async fn create_invoice(
    State(state): State<AppState>,
    Json(input): Json<CreateInvoice>,
) -> Result<impl IntoResponse, AppError> {
    let invoice = state.store.create_invoice(input)?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

pub async fn list_invoices(State(state): State<AppState>) -> Json<Vec<Invoice>> {
    Json(state.store.list_invoices())
}

pub async fn get_invoice(
    State(state): State<AppState>,
    Path(invoice_id): Path<Uuid>,
) -> Result<Json<Invoice>, AppError> {
    Ok(Json(state.store.get_invoice(invoice_id)?))
}

/// Apply the simulated immediate advance (-50%) to the invoice.
pub async fn send_invoice(
    State(state): State<AppState>,
    Path(invoice_id): Path<Uuid>,
) -> Result<Json<Invoice>, AppError> {
    let invoice = state
        .store
        .send_invoice_aici(invoice_id, RoundingPolicy::HalfUp2)?;
    Ok(Json(invoice))
}

/// Render the invoice as an inline PDF document.
pub async fn invoice_pdf(
    State(state): State<AppState>,
    Path(invoice_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let invoice = state.store.get_invoice(invoice_id)?;
    let client = state.store.get_client(invoice.client_id);

    let bytes = pdf::render_invoice(
        &invoice,
        client.as_ref(),
        &state.settings.company,
        &state.settings.locale,
    )?;

    let disposition = format!("inline; filename=\"facture_{}.pdf\"", invoice.short_ref());
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
