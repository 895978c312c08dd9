//! service-core: shared infrastructure for the Domus AICI service.

pub mod error;
pub mod middleware;
pub mod observability;

pub use error::AppError;
