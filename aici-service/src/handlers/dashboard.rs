//! Server-rendered dashboard page.

use askama::Template;
use axum::{extract::State, response::IntoResponse};

use super::simulation::EntryView;
use crate::AppState;

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub history: Vec<EntryView>,
    pub clients: Vec<ClientRow>,
    pub invoices: Vec<InvoiceRow>,
}

pub struct ClientRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub address: String,
    pub status: &'static str,
}

pub struct InvoiceRow {
    pub id: String,
    pub reference: String,
    pub client_id: String,
    pub total: String,
    pub advance: String,
    pub remainder: String,
    pub status: &'static str,
    pub urssaf_ref: String,
}

pub async fn dashboard(State(state): State<AppState>) -> impl IntoResponse {
    let locale = &state.settings.locale;

    let history = state
        .store
        .history()
        .iter()
        .map(|entry| EntryView::from_entry(entry, &state))
        .collect();

    let clients = state
        .store
        .list_clients()
        .iter()
        .map(|client| ClientRow {
            id: client.client_id.to_string(),
            name: client.full_name(),
            email: client.email.clone(),
            address: client.address.clone(),
            status: client.aici_status.as_str(),
        })
        .collect();

    let invoices = state
        .store
        .list_invoices()
        .iter()
        .map(|invoice| InvoiceRow {
            id: invoice.invoice_id.to_string(),
            reference: invoice.short_ref(),
            client_id: invoice.client_id.to_string(),
            total: crate::utils::money::format_currency(invoice.total, locale),
            advance: crate::utils::money::format_currency(invoice.advance, locale),
            remainder: crate::utils::money::format_currency(invoice.remainder, locale),
            status: invoice.status.as_str(),
            urssaf_ref: invoice.urssaf_ref.clone().unwrap_or_default(),
        })
        .collect();

    DashboardTemplate {
        history,
        clients,
        invoices,
    }
}
