use super::customer::Customer;
use super::user::User;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Open => "open",
            TicketStatus::InProgress => "in_progress",
            TicketStatus::Resolved => "resolved",
            TicketStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who wrote a timeline entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "identity", rename_all = "lowercase")]
pub enum EventSender {
    User(User),
    Customer(Customer),
    System,
}

impl EventSender {
    pub fn id(&self) -> &str {
        match self {
            EventSender::User(user) => &user.id,
            EventSender::Customer(customer) => &customer.id,
            EventSender::System => "SYSTEM",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketEventType {
    /// Private to staff
    InternalNote,
    /// Visible to the customer
    PublicReply,
    SystemLog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    Image,
    File,
    Video,
    RpaDsl,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    pub url: Option<String>,
    pub content: Option<String>,
}

/// Append-only timeline entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketEvent {
    pub id: String,
    pub ticket_id: String,
    pub sender: EventSender,
    pub content: String,
    #[serde(rename = "type")]
    pub event_type: TicketEventType,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    pub created_at: DateTime<Utc>,
}

impl TicketEvent {
    pub fn new(
        ticket_id: impl Into<String>,
        sender: EventSender,
        content: impl Into<String>,
        event_type: TicketEventType,
        attachments: Vec<Attachment>,
    ) -> Self {
        Self {
            id: format!("evt-{}", Uuid::new_v4()),
            ticket_id: ticket_id.into(),
            sender,
            content: content.into(),
            event_type,
            attachments,
            created_at: Utc::now(),
        }
    }

    pub fn is_customer_visible(&self) -> bool {
        self.event_type == TicketEventType::PublicReply
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub subject: String,
    pub description: String,
    /// JSON snippet attached to the description
    pub description_rpa_dsl: Option<String>,
    pub status: TicketStatus,
    pub priority: Priority,
    pub customer: Customer,
    pub assignee: Option<User>,
    #[serde(default)]
    pub cc: Vec<User>,
    #[serde(default)]
    pub collaborators: Vec<User>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub timeline: Vec<TicketEvent>,
}

impl Ticket {
    pub fn is_assigned_to(&self, user_id: &str) -> bool {
        self.assignee.as_ref().is_some_and(|u| u.id == user_id)
    }

    pub fn is_cc(&self, user_id: &str) -> bool {
        self.cc.iter().any(|u| u.id == user_id)
    }

    pub fn is_collaborator(&self, user_id: &str) -> bool {
        self.collaborators.iter().any(|u| u.id == user_id)
    }

    /// Assignee, CC or collaborator
    pub fn involves(&self, user_id: &str) -> bool {
        self.is_assigned_to(user_id) || self.is_cc(user_id) || self.is_collaborator(user_id)
    }

    /// Apply a partial update; `updated_at` is always bumped to `now`.
    pub fn apply(&mut self, update: TicketUpdate, now: DateTime<Utc>) {
        if let Some(subject) = update.subject {
            self.subject = subject;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(dsl) = update.description_rpa_dsl {
            self.description_rpa_dsl = dsl;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if let Some(assignee) = update.assignee {
            self.assignee = assignee;
        }
        if let Some(cc) = update.cc {
            self.cc = cc;
        }
        if let Some(collaborators) = update.collaborators {
            self.collaborators = collaborators;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        self.updated_at = now;
    }

    pub fn validate_rpa_dsl(dsl: &str) -> Result<(), String> {
        serde_json::from_str::<serde_json::Value>(dsl)
            .map(|_| ())
            .map_err(|e| format!("RPA snippet is not valid JSON: {}", e))
    }
}

/// New-ticket form contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketDraft {
    pub subject: Option<String>,
    pub description: Option<String>,
    pub description_rpa_dsl: Option<String>,
    pub status: Option<TicketStatus>,
    pub priority: Option<Priority>,
    pub assignee: Option<User>,
    pub tags: Vec<String>,
}

/// Partial field set merged into an existing ticket.
/// `assignee: Some(None)` clears the assignee.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TicketUpdate {
    pub subject: Option<String>,
    pub description: Option<String>,
    pub description_rpa_dsl: Option<Option<String>>,
    pub status: Option<TicketStatus>,
    pub priority: Option<Priority>,
    pub assignee: Option<Option<User>>,
    pub cc: Option<Vec<User>>,
    pub collaborators: Option<Vec<User>>,
    pub tags: Option<Vec<String>>,
}
