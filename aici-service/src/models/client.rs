//! Client model and AICI enrolment status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// AICI enrolment status of a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiciStatus {
    NotEnrolled,
    Pending,
    Active,
    Refused,
}

impl AiciStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiciStatus::NotEnrolled => "not_enrolled",
            AiciStatus::Pending => "pending",
            AiciStatus::Active => "active",
            AiciStatus::Refused => "refused",
        }
    }

    pub fn from_string(s: &str) -> Self {
        match s {
            "pending" => AiciStatus::Pending,
            "active" => AiciStatus::Active,
            "refused" => AiciStatus::Refused,
            _ => AiciStatus::NotEnrolled,
        }
    }

    /// One enrolment step: `not_enrolled → pending → active`.
    /// `active` and `refused` are left unchanged.
    pub fn advanced(self) -> Self {
        match self {
            AiciStatus::NotEnrolled => AiciStatus::Pending,
            AiciStatus::Pending => AiciStatus::Active,
            other => other,
        }
    }
}

impl std::fmt::Display for AiciStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Client record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub client_id: Uuid,
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub address: String,
    pub aici_status: AiciStatus,
    pub created_utc: DateTime<Utc>,
}

impl Client {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Input for creating a client.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClient {
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enrolment_advances_one_step_and_stops_at_active() {
        assert_eq!(AiciStatus::NotEnrolled.advanced(), AiciStatus::Pending);
        assert_eq!(AiciStatus::Pending.advanced(), AiciStatus::Active);
        assert_eq!(AiciStatus::Active.advanced(), AiciStatus::Active);
        assert_eq!(AiciStatus::Refused.advanced(), AiciStatus::Refused);
    }
}
