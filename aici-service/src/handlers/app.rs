use axum::response::Redirect;

pub async fn index() -> Redirect {
    Redirect::to("/dashboard")
}

pub async fn health_check() -> &'static str {
    "OK"
}
