pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;

use config::Settings;
use services::store::LedgerStore;
use std::sync::Arc;

/// Shared application state: the ledger store and the loaded settings.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<LedgerStore>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(store: Arc<LedgerStore>, settings: Arc<Settings>) -> Self {
        Self { store, settings }
    }
}
