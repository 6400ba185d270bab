use super::customer::Customer;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Chat session status. Nothing in the console transitions it; it is
/// read for the session list tabs only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Queued,
    Ended,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Active => "active",
            SessionStatus::Queued => "queued",
            SessionStatus::Ended => "ended",
        }
    }

    pub fn all() -> &'static [SessionStatus] {
        &[
            SessionStatus::Active,
            SessionStatus::Queued,
            SessionStatus::Ended,
        ]
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Intake data describing the customer's initial issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationForm {
    pub product_module: String,
    pub environment: String,
    pub severity: String,
    pub description: String,
    pub version: String,
    // Legacy entry points do not collect a phone number
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub status: SessionStatus,
    pub customer: Customer,
    pub start_time: DateTime<Utc>,
    pub duration: String,
    pub source: String,
    pub handler_id: String,
    pub last_message: String,
    pub unread_count: u32,
    pub consultation_form: ConsultationForm,
}

impl Session {
    pub fn is_handled_by(&self, user_id: &str) -> bool {
        !self.handler_id.is_empty() && self.handler_id == user_id
    }
}
