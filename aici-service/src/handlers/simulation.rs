//! Simulation calculator endpoints: preview, submit, history.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use service_core::AppError;

use crate::models::{preview_amount, AdvanceCalculation, RoundingPolicy, SimulationEntry, SubmitEntry};
use crate::utils::money::format_currency;
use crate::AppState;

const DISCLAIMER: &str =
    "Simplified demo calculation: statutory caps, eligibility rules and exclusions are ignored.";
const CONFIRMATION: &str =
    "Entry recorded locally. No data was transmitted to any tax authority (demo).";

#[derive(Debug, Deserialize)]
pub struct PreviewRequest {
    pub amount: String,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub gross: Decimal,
    pub advance: Decimal,
    pub remainder: Decimal,
    pub total_formatted: String,
    pub advance_formatted: String,
    pub remainder_formatted: String,
    pub disclaimer: &'static str,
}

impl PreviewResponse {
    fn from_calculation(calc: AdvanceCalculation, state: &AppState) -> Self {
        let locale = &state.settings.locale;
        Self {
            gross: calc.gross,
            advance: calc.advance,
            remainder: calc.remainder,
            total_formatted: format_currency(calc.gross, locale),
            advance_formatted: format_currency(calc.advance, locale),
            remainder_formatted: format_currency(calc.remainder, locale),
            disclaimer: DISCLAIMER,
        }
    }
}

/// Rendered history row.
#[derive(Debug, Serialize)]
pub struct EntryView {
    pub date: String,
    pub client_name: String,
    pub service_label: String,
    pub amount: String,
    pub advance: String,
    pub status: &'static str,
}

impl EntryView {
    pub fn from_entry(entry: &SimulationEntry, state: &AppState) -> Self {
        let locale = &state.settings.locale;
        Self {
            date: entry.date.clone(),
            client_name: entry.client_name.clone(),
            service_label: entry.service_label.clone(),
            amount: format_currency(entry.gross, locale),
            advance: format_currency(entry.advance, locale),
            status: entry.status.label(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub entry: EntryView,
    pub confirmation: &'static str,
}

/// Compute the preview for raw amount text.
///
/// Invalid or non-positive amounts answer 204 No Content: the preview area
/// simply stays hidden, no error is surfaced.
pub async fn preview(
    State(state): State<AppState>,
    Json(request): Json<PreviewRequest>,
) -> Response {
    match preview_amount(&request.amount, RoundingPolicy::HalfUp2) {
        Some(calc) => Json(PreviewResponse::from_calculation(calc, &state)).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Record a simulation entry at the top of the history.
pub async fn submit_entry(
    State(state): State<AppState>,
    Json(input): Json<SubmitEntry>,
) -> Result<impl IntoResponse, AppError> {
    let entry = state.store.submit_entry(&input, RoundingPolicy::HalfUp2)?;
    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            entry: EntryView::from_entry(&entry, &state),
            confirmation: CONFIRMATION,
        }),
    ))
}

/// Full history, most recent submission first.
pub async fn history(State(state): State<AppState>) -> Json<Vec<EntryView>> {
    let rows = state
        .store
        .history()
        .iter()
        .map(|entry| EntryView::from_entry(entry, &state))
        .collect();
    Json(rows)
}
