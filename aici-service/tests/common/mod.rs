//! Shared helpers for aici-service integration tests.
#![allow(dead_code)]

use aici_service::config::{
    CompanySettings, LocaleSettings, ServerSettings, Settings, SnapshotSettings,
};
use aici_service::services::store::LedgerStore;
use aici_service::startup::build_router;
use aici_service::AppState;
use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use std::sync::Arc;

pub fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        locale: LocaleSettings::default(),
        company: CompanySettings {
            name: "Domus Premium".to_string(),
            address: "23 rue du Loc'h, 35132 Vezin-le-Coquet".to_string(),
            email: "contact@domus-premium.example".to_string(),
            phone: "07 43 63 35 49".to_string(),
        },
        snapshot: SnapshotSettings {
            path: String::new(),
            enabled: false,
        },
    }
}

/// Fresh router backed by an in-memory store without snapshot persistence.
pub fn test_app() -> Router {
    let store = Arc::new(LedgerStore::new(None).expect("store can be built"));
    build_router(AppState::new(store, Arc::new(test_settings())))
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request can be built")
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request can be built")
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body can be read")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is valid JSON")
}
