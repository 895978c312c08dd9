use aici_service::config::get_configuration;
use aici_service::services::store::LedgerStore;
use aici_service::startup::build_router;
use aici_service::AppState;
use dotenvy::dotenv;
use service_core::observability::logging::init_tracing;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let configuration = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing("aici-service", "info");
    aici_service::services::metrics::init_metrics();

    let snapshot_path = configuration
        .snapshot
        .enabled
        .then(|| PathBuf::from(&configuration.snapshot.path));
    let store = Arc::new(LedgerStore::new(snapshot_path)?);

    let app = build_router(AppState::new(store, Arc::new(configuration.clone())));

    let address = format!(
        "{}:{}",
        configuration.server.host, configuration.server.port
    );
    let listener = tokio::net::TcpListener::bind(&address).await.map_err(|e| {
        tracing::error!("Failed to bind TCP listener to {}: {}", address, e);
        anyhow::anyhow!("Failed to bind to address {}: {}", address, e)
    })?;

    info!("Starting aici-service on {}", address);
    axum::serve(listener, app).await.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })?;

    Ok(())
}
