use crate::domain::entities::{Message, MessageKind};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::events::ConsoleEvent;
use crate::domain::ports::event_bus::EventBus;
use crate::domain::ports::message_repository::MessageRepository;
use crate::domain::ports::session_repository::SessionRepository;
use std::sync::Arc;

/// Chat message send/delete/read for sessions
#[derive(Clone)]
pub struct MessageService {
    message_repo: Arc<dyn MessageRepository>,
    session_repo: Arc<dyn SessionRepository>,
    event_bus: Option<Arc<dyn EventBus>>,
}

impl MessageService {
    pub fn new(
        message_repo: Arc<dyn MessageRepository>,
        session_repo: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            message_repo,
            session_repo,
            event_bus: None,
        }
    }

    pub fn with_event_bus(mut self, event_bus: Arc<dyn EventBus>) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    /// Append a message to a session.
    ///
    /// # Errors
    /// * `NotFound` - session does not exist
    /// * `ValidationError` - blank text, a card kind (cards have their own
    ///   entry points), or a reply target outside the session
    pub async fn send_message(
        &self,
        session_id: &str,
        sender_id: &str,
        content: &str,
        kind: MessageKind,
        reply_to_id: Option<String>,
    ) -> DomainResult<Message> {
        self.require_session(session_id).await?;

        match &kind {
            MessageKind::Text | MessageKind::System => {
                Message::validate_content(content).map_err(DomainError::ValidationError)?;
            }
            MessageKind::EndConfirmation { .. } => {
                return Err(DomainError::ValidationError(
                    "End-confirmation cards are posted by the end-session request".to_string(),
                ));
            }
            _ => {}
        }

        if let Some(reply_to) = &reply_to_id {
            let target = self.message_repo.get_message_by_id(reply_to).await?;
            if !target.is_some_and(|m| m.session_id == session_id) {
                return Err(DomainError::ValidationError(format!(
                    "Reply target {} is not part of session {}",
                    reply_to, session_id
                )));
            }
        }

        let message = Message::new(session_id, sender_id, content, kind).replying_to(reply_to_id);
        self.message_repo.create_message(&message).await?;

        tracing::info!(
            "Message sent: id={}, session_id={}, type={}",
            message.id,
            message.session_id,
            message.kind.as_str()
        );

        if let Some(bus) = &self.event_bus {
            let _ = bus.publish(ConsoleEvent::MessageSent {
                message_id: message.id.clone(),
                session_id: message.session_id.clone(),
                sender_id: message.sender_id.clone(),
                kind: message.kind.as_str(),
                timestamp: message.timestamp.to_rfc3339(),
            });
        }

        Ok(message)
    }

    /// Upload; images and other files are told apart by extension
    pub async fn send_file(
        &self,
        session_id: &str,
        sender_id: &str,
        file_name: &str,
        file_url: &str,
        reply_to_id: Option<String>,
    ) -> DomainResult<Message> {
        let kind = MessageKind::for_upload(file_name, file_url);
        self.send_message(session_id, sender_id, file_name, kind, reply_to_id)
            .await
    }

    /// Snapshot the session's intake form into a card message
    pub async fn send_consultation_card(
        &self,
        session_id: &str,
        sender_id: &str,
    ) -> DomainResult<Message> {
        let session = self.require_session(session_id).await?;
        let kind = MessageKind::ConsultationCard {
            form: session.consultation_form.clone(),
        };
        self.send_message(
            session_id,
            sender_id,
            &session.consultation_form.description,
            kind,
            None,
        )
        .await
    }

    /// Soft delete. Deleting twice is a no-op.
    pub async fn delete_message(&self, message_id: &str) -> DomainResult<Message> {
        let message = self.message_repo.mark_message_deleted(message_id).await?;

        tracing::info!("Message {} marked deleted", message_id);

        if let Some(bus) = &self.event_bus {
            let _ = bus.publish(ConsoleEvent::MessageDeleted {
                message_id: message.id.clone(),
                session_id: message.session_id.clone(),
                timestamp: chrono::Utc::now().to_rfc3339(),
            });
        }

        Ok(message)
    }

    /// Messages of a session in send order, deleted ones included
    pub async fn messages_for_session(&self, session_id: &str) -> DomainResult<Vec<Message>> {
        self.require_session(session_id).await?;
        self.message_repo.list_messages(session_id).await
    }

    /// Text shown in a reply quote; `None` when the target is gone or deleted
    pub async fn quoted_content(&self, reply_to_id: &str) -> DomainResult<Option<String>> {
        Ok(self
            .message_repo
            .get_message_by_id(reply_to_id)
            .await?
            .filter(|m| !m.is_deleted)
            .map(|m| m.content))
    }

    async fn require_session(
        &self,
        session_id: &str,
    ) -> DomainResult<crate::domain::entities::Session> {
        self.session_repo
            .get_session_by_id(session_id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Session {} not found", session_id)))
    }
}
