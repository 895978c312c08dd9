pub mod metrics;
pub mod pdf;
pub mod store;
