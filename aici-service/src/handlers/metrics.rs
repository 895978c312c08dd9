use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;

use crate::services::metrics::get_metrics;

pub async fn metrics() -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "text/plain; version=0.0.4")],
        get_metrics(),
    )
}
