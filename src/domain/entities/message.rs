use super::session::ConsultationForm;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use uuid::Uuid;

/// Outcome of an end-of-session confirmation card.
/// `Solved` and `Unsolved` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndConfirmationStatus {
    Pending,
    Solved,
    Unsolved,
}

impl EndConfirmationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndConfirmationStatus::Pending => "pending",
            EndConfirmationStatus::Solved => "solved",
            EndConfirmationStatus::Unsolved => "unsolved",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, EndConfirmationStatus::Pending)
    }
}

impl std::fmt::Display for EndConfirmationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Message payload, tagged by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageKind {
    Text,
    Image {
        file_name: String,
        file_url: String,
    },
    File {
        file_name: String,
        file_url: String,
    },
    System,
    #[serde(rename = "system_end_confirmation")]
    EndConfirmation {
        status: EndConfirmationStatus,
    },
    ConsultationCard {
        form: ConsultationForm,
    },
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Text => "text",
            MessageKind::Image { .. } => "image",
            MessageKind::File { .. } => "file",
            MessageKind::System => "system",
            MessageKind::EndConfirmation { .. } => "system_end_confirmation",
            MessageKind::ConsultationCard { .. } => "consultation_card",
        }
    }

    /// Classify an uploaded file as image or generic file by extension
    pub fn for_upload(file_name: impl Into<String>, file_url: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let file_url = file_url.into();
        if is_image_file(&file_name) {
            MessageKind::Image {
                file_name,
                file_url,
            }
        } else {
            MessageKind::File {
                file_name,
                file_url,
            }
        }
    }
}

pub fn is_image_file(file_name: &str) -> bool {
    static IMAGE_REGEX: OnceLock<Regex> = OnceLock::new();
    let re = IMAGE_REGEX.get_or_init(|| {
        Regex::new(r"(?i)\.(jpg|jpeg|png|gif|webp|svg|bmp)$").expect("Invalid image regex")
    });
    re.is_match(file_name)
}

/// Chat message. Append-only: after creation only `is_deleted` and the
/// end-confirmation status may change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub session_id: String,
    pub sender_id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: MessageKind,
    #[serde(default)]
    pub is_deleted: bool,
    pub reply_to_id: Option<String>,
}

impl Message {
    pub fn new(
        session_id: impl Into<String>,
        sender_id: impl Into<String>,
        content: impl Into<String>,
        kind: MessageKind,
    ) -> Self {
        Self {
            id: format!("msg-{}", Uuid::new_v4()),
            session_id: session_id.into(),
            sender_id: sender_id.into(),
            content: content.into(),
            timestamp: Utc::now(),
            kind,
            is_deleted: false,
            reply_to_id: None,
        }
    }

    pub fn replying_to(mut self, reply_to_id: Option<String>) -> Self {
        self.reply_to_id = reply_to_id;
        self
    }

    pub fn end_confirmation_status(&self) -> Option<EndConfirmationStatus> {
        match &self.kind {
            MessageKind::EndConfirmation { status } => Some(*status),
            _ => None,
        }
    }

    /// Validate free-text content
    pub fn validate_content(content: &str) -> Result<(), String> {
        if content.trim().is_empty() {
            return Err("Message content cannot be empty".to_string());
        }
        Ok(())
    }
}
