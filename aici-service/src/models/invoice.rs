//! Invoice model for home-services prestations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Service-à-la-personne category of a prestation line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SapCategory {
    HomeUpkeep,
    SmallDiy,
    Gardening,
    Other,
}

impl SapCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            SapCategory::HomeUpkeep => "home_upkeep",
            SapCategory::SmallDiy => "small_diy",
            SapCategory::Gardening => "gardening",
            SapCategory::Other => "other",
        }
    }
}

/// Invoice lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Accepted,
    Rejected,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Accepted => "accepted",
            InvoiceStatus::Rejected => "rejected",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "sent" => InvoiceStatus::Sent,
            "accepted" => InvoiceStatus::Accepted,
            "rejected" => InvoiceStatus::Rejected,
            _ => InvoiceStatus::Draft,
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One prestation line on an invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceLine {
    pub label: String,
    pub sap_category: SapCategory,
    pub quantity: Decimal,
    pub unit_price: Decimal,
}

impl ServiceLine {
    pub fn line_total(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

/// Invoice record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub invoice_id: Uuid,
    pub client_id: Uuid,
    pub lines: Vec<ServiceLine>,
    pub total: Decimal,
    pub advance: Decimal,
    pub remainder: Decimal,
    pub status: InvoiceStatus,
    pub urssaf_ref: Option<String>,
    pub message: Option<String>,
    pub created_utc: DateTime<Utc>,
}

impl Invoice {
    /// Short human-facing reference, also used for the URSSAF simulation ref.
    pub fn short_ref(&self) -> String {
        self.invoice_id.simple().to_string()[..8].to_uppercase()
    }
}

/// Input for creating an invoice.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvoice {
    pub client_id: Uuid,
    pub lines: Vec<ServiceLine>,
}
