//! Simulation ledger entries for the dashboard quick calculator.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Fixed status label of a history row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryStatus {
    Submitted,
    Settled,
}

impl EntryStatus {
    pub fn label(&self) -> &'static str {
        match self {
            EntryStatus::Submitted => "Submitted (demo)",
            EntryStatus::Settled => "Settled (demo)",
        }
    }
}

/// One row of the simulation history.
///
/// The date is display text: an empty submission date defaults to the
/// current day, any other text is kept verbatim.
#[derive(Debug, Clone)]
pub struct SimulationEntry {
    pub date: String,
    pub client_name: String,
    pub service_label: String,
    pub gross: Decimal,
    pub advance: Decimal,
    pub status: EntryStatus,
}

/// Raw form input for submitting a simulation entry.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitEntry {
    pub client_name: String,
    pub service_label: String,
    #[serde(default)]
    pub date: String,
    pub amount: String,
}
