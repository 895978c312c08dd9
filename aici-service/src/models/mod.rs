//! Domain models for aici-service.

mod advance;
mod client;
mod invoice;
mod simulation;

pub use advance::{preview_amount, AdvanceCalculation, RoundingPolicy};
pub use client::{AiciStatus, Client, CreateClient};
pub use invoice::{CreateInvoice, Invoice, InvoiceStatus, SapCategory, ServiceLine};
pub use simulation::{EntryStatus, SimulationEntry, SubmitEntry};
