pub mod app;
pub mod backup;
pub mod clients;
pub mod dashboard;
pub mod invoices;
pub mod metrics;
pub mod simulation;
