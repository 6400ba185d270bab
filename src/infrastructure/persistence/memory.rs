use crate::domain::entities::{
    EndConfirmationStatus, Message, MessageKind, Session, Ticket, TicketEvent, TicketUpdate,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::ports::message_repository::MessageRepository;
use crate::domain::ports::session_repository::SessionRepository;
use crate::domain::ports::ticket_repository::TicketRepository;
use crate::domain::services::validate_transition;
use crate::infrastructure::seed::Dataset;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Collections {
    sessions: Vec<Session>,
    messages: Vec<Message>,
    tickets: Vec<Ticket>,
}

/// In-memory canonical collections. Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Collections {
                sessions: dataset.sessions.clone(),
                messages: dataset.messages.clone(),
                tickets: dataset.tickets.clone(),
            })),
        }
    }

    /// Swap every collection for freshly seeded data
    pub async fn reseed(&self, dataset: &Dataset) {
        let mut data = self.inner.write().await;
        data.sessions = dataset.sessions.clone();
        data.messages = dataset.messages.clone();
        data.tickets = dataset.tickets.clone();
        tracing::debug!(
            "Store reseeded: {} sessions, {} messages, {} tickets",
            data.sessions.len(),
            data.messages.len(),
            data.tickets.len()
        );
    }
}

#[async_trait::async_trait]
impl SessionRepository for MemoryStore {
    async fn list_sessions(&self) -> DomainResult<Vec<Session>> {
        Ok(self.inner.read().await.sessions.clone())
    }

    async fn get_session_by_id(&self, id: &str) -> DomainResult<Option<Session>> {
        let data = self.inner.read().await;
        Ok(data.sessions.iter().find(|s| s.id == id).cloned())
    }
}

#[async_trait::async_trait]
impl MessageRepository for MemoryStore {
    async fn create_message(&self, message: &Message) -> DomainResult<()> {
        let mut data = self.inner.write().await;
        if data.messages.iter().any(|m| m.id == message.id) {
            return Err(DomainError::Conflict(format!(
                "Message {} already exists",
                message.id
            )));
        }
        data.messages.push(message.clone());
        Ok(())
    }

    async fn get_message_by_id(&self, message_id: &str) -> DomainResult<Option<Message>> {
        let data = self.inner.read().await;
        Ok(data.messages.iter().find(|m| m.id == message_id).cloned())
    }

    async fn list_messages(&self, session_id: &str) -> DomainResult<Vec<Message>> {
        let data = self.inner.read().await;
        Ok(data
            .messages
            .iter()
            .filter(|m| m.session_id == session_id)
            .cloned()
            .collect())
    }

    async fn mark_message_deleted(&self, message_id: &str) -> DomainResult<Message> {
        let mut data = self.inner.write().await;
        let message = data
            .messages
            .iter_mut()
            .find(|m| m.id == message_id)
            .ok_or_else(|| DomainError::NotFound(format!("Message {} not found", message_id)))?;
        message.is_deleted = true;
        Ok(message.clone())
    }

    async fn update_end_confirmation_status(
        &self,
        message_id: &str,
        status: EndConfirmationStatus,
    ) -> DomainResult<Message> {
        let mut data = self.inner.write().await;
        let message = data
            .messages
            .iter_mut()
            .find(|m| m.id == message_id)
            .ok_or_else(|| DomainError::NotFound(format!("Message {} not found", message_id)))?;

        match &mut message.kind {
            MessageKind::EndConfirmation { status: current } => {
                validate_transition(*current, status)
                    .map_err(|e| DomainError::Conflict(e.to_string()))?;
                *current = status;
            }
            _ => {
                return Err(DomainError::ValidationError(format!(
                    "Message {} is not an end-confirmation card",
                    message_id
                )))
            }
        }
        Ok(message.clone())
    }
}

#[async_trait::async_trait]
impl TicketRepository for MemoryStore {
    async fn list_tickets(&self) -> DomainResult<Vec<Ticket>> {
        Ok(self.inner.read().await.tickets.clone())
    }

    async fn get_ticket_by_id(&self, id: &str) -> DomainResult<Option<Ticket>> {
        let data = self.inner.read().await;
        Ok(data.tickets.iter().find(|t| t.id == id).cloned())
    }

    async fn create_ticket(&self, ticket: &Ticket) -> DomainResult<()> {
        let mut data = self.inner.write().await;
        if data.tickets.iter().any(|t| t.id == ticket.id) {
            return Err(DomainError::Conflict(format!(
                "Ticket {} already exists",
                ticket.id
            )));
        }
        data.tickets.insert(0, ticket.clone());
        Ok(())
    }

    async fn update_ticket(
        &self,
        id: &str,
        update: TicketUpdate,
        now: DateTime<Utc>,
    ) -> DomainResult<Ticket> {
        let mut data = self.inner.write().await;
        let ticket = data
            .tickets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| DomainError::NotFound(format!("Ticket {} not found", id)))?;
        ticket.apply(update, now);
        Ok(ticket.clone())
    }

    async fn append_ticket_event(&self, event: &TicketEvent) -> DomainResult<Ticket> {
        let mut data = self.inner.write().await;
        let ticket = data
            .tickets
            .iter_mut()
            .find(|t| t.id == event.ticket_id)
            .ok_or_else(|| {
                DomainError::NotFound(format!("Ticket {} not found", event.ticket_id))
            })?;
        ticket.timeline.push(event.clone());
        ticket.updated_at = event.created_at;
        Ok(ticket.clone())
    }
}
