use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::middleware::request_id::request_id_middleware;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    app::{health_check, index},
    backup::{backup_download, restore_upload},
    clients::{create_client, enrol_client, list_clients},
    dashboard::dashboard,
    invoices::{create_invoice, get_invoice, invoice_pdf, list_invoices, send_invoice},
    metrics::metrics,
    simulation::{history, preview, submit_entry},
};
use crate::services::metrics::track_http;
use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/dashboard", get(dashboard))
        .route("/api/simulation/preview", post(preview))
        .route("/api/simulation/entries", get(history).post(submit_entry))
        .route("/clients", get(list_clients).post(create_client))
        .route("/clients/:client_id/aici/enrol", post(enrol_client))
        .route("/invoices", get(list_invoices).post(create_invoice))
        .route("/invoices/:invoice_id", get(get_invoice))
        .route("/invoices/:invoice_id/aici/send", post(send_invoice))
        .route("/invoices/:invoice_id/pdf", get(invoice_pdf))
        .route("/backup", get(backup_download))
        .route("/restore", post(restore_upload))
        .layer(from_fn(track_http))
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}
