use crate::domain::entities::{
    Attachment, EventSender, Priority, Ticket, TicketDraft, TicketEvent, TicketEventType,
    TicketStatus, TicketUpdate, User,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::events::ConsoleEvent;
use crate::domain::ports::event_bus::EventBus;
use crate::domain::ports::session_repository::SessionRepository;
use crate::domain::ports::ticket_repository::TicketRepository;
use crate::domain::services::{
    apply_grid_filters, sort_tickets, visible_tickets, GridFilterCriteria, TicketView,
};
use crate::shared::utils::generate_ticket_id;
use chrono::Utc;
use std::sync::Arc;

const MAX_ID_ATTEMPTS: usize = 32;

/// Result of resolving a ticket id, e.g. from a deep link
#[derive(Debug, Clone, PartialEq)]
pub enum TicketLookup {
    Found(Box<Ticket>),
    NotFound(String),
}

#[derive(Clone)]
pub struct TicketService {
    ticket_repo: Arc<dyn TicketRepository>,
    session_repo: Arc<dyn SessionRepository>,
    event_bus: Option<Arc<dyn EventBus>>,
}

impl TicketService {
    pub fn new(
        ticket_repo: Arc<dyn TicketRepository>,
        session_repo: Arc<dyn SessionRepository>,
    ) -> Self {
        Self {
            ticket_repo,
            session_repo,
            event_bus: None,
        }
    }

    pub fn with_event_bus(mut self, event_bus: Arc<dyn EventBus>) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    pub async fn list_tickets(&self) -> DomainResult<Vec<Ticket>> {
        self.ticket_repo.list_tickets().await
    }

    pub async fn visible_tickets(&self, view: TicketView, user: &User) -> DomainResult<Vec<Ticket>> {
        let all = self.ticket_repo.list_tickets().await?;
        Ok(visible_tickets(&all, view, user))
    }

    /// Visible tickets for the view, filtered by the grid bar and sorted
    pub async fn ticket_grid(
        &self,
        view: TicketView,
        user: &User,
        criteria: &GridFilterCriteria,
    ) -> DomainResult<Vec<Ticket>> {
        let visible = self.visible_tickets(view, user).await?;
        Ok(sort_tickets(&apply_grid_filters(&visible, criteria)))
    }

    pub async fn find_ticket(&self, id: &str) -> DomainResult<TicketLookup> {
        Ok(match self.ticket_repo.get_ticket_by_id(id).await? {
            Some(ticket) => TicketLookup::Found(Box::new(ticket)),
            None => TicketLookup::NotFound(id.to_string()),
        })
    }

    /// Create a ticket from the new-ticket form. The customer is taken
    /// from the first session on record.
    pub async fn create_ticket(&self, draft: TicketDraft, created_by: &User) -> DomainResult<Ticket> {
        if let Some(dsl) = &draft.description_rpa_dsl {
            Ticket::validate_rpa_dsl(dsl).map_err(DomainError::ValidationError)?;
        }

        let customer = self
            .session_repo
            .list_sessions()
            .await?
            .into_iter()
            .next()
            .map(|s| s.customer)
            .ok_or_else(|| {
                DomainError::NotFound("No session customer to attach the ticket to".to_string())
            })?;

        let id = self.unused_ticket_id().await?;
        let now = Utc::now();
        let subject = draft
            .subject
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "Untitled".to_string());

        let ticket = Ticket {
            id,
            subject,
            description: draft.description.unwrap_or_default(),
            description_rpa_dsl: draft.description_rpa_dsl,
            status: draft.status.unwrap_or(TicketStatus::Open),
            priority: draft.priority.unwrap_or(Priority::Medium),
            customer,
            assignee: draft.assignee,
            cc: Vec::new(),
            collaborators: Vec::new(),
            created_at: now,
            updated_at: now,
            tags: draft.tags,
            timeline: Vec::new(),
        };

        self.ticket_repo.create_ticket(&ticket).await?;

        tracing::info!("Ticket {} created by {}", ticket.id, created_by.id);

        if let Some(bus) = &self.event_bus {
            let _ = bus.publish(ConsoleEvent::TicketCreated {
                ticket_id: ticket.id.clone(),
                created_by: created_by.id.clone(),
                timestamp: now.to_rfc3339(),
            });
        }

        Ok(ticket)
    }

    /// Merge a partial field set into an existing ticket
    pub async fn update_ticket(
        &self,
        id: &str,
        update: TicketUpdate,
        updated_by: &User,
    ) -> DomainResult<Ticket> {
        if let Some(Some(dsl)) = &update.description_rpa_dsl {
            Ticket::validate_rpa_dsl(dsl).map_err(DomainError::ValidationError)?;
        }

        let now = Utc::now();
        let ticket = self.ticket_repo.update_ticket(id, update, now).await?;

        tracing::info!(
            "Ticket {} updated by {} (status {})",
            ticket.id,
            updated_by.id,
            ticket.status
        );

        if let Some(bus) = &self.event_bus {
            let _ = bus.publish(ConsoleEvent::TicketUpdated {
                ticket_id: ticket.id.clone(),
                status: ticket.status,
                updated_by: updated_by.id.clone(),
                timestamp: now.to_rfc3339(),
            });
        }

        Ok(ticket)
    }

    /// Append a note, reply or system log entry to the timeline
    pub async fn append_timeline_event(
        &self,
        ticket_id: &str,
        sender: EventSender,
        content: &str,
        event_type: TicketEventType,
        attachments: Vec<Attachment>,
    ) -> DomainResult<Ticket> {
        if content.trim().is_empty() && attachments.is_empty() {
            return Err(DomainError::ValidationError(
                "Timeline entry needs content or an attachment".to_string(),
            ));
        }

        let event = TicketEvent::new(ticket_id, sender, content, event_type, attachments);
        let ticket = self.ticket_repo.append_ticket_event(&event).await?;

        tracing::debug!("Timeline event {} appended to {}", event.id, ticket_id);

        if let Some(bus) = &self.event_bus {
            let _ = bus.publish(ConsoleEvent::TicketEventAppended {
                ticket_id: ticket_id.to_string(),
                event_id: event.id.clone(),
                sender_id: event.sender.id().to_string(),
                timestamp: event.created_at.to_rfc3339(),
            });
        }

        Ok(ticket)
    }

    async fn unused_ticket_id(&self) -> DomainResult<String> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let candidate = generate_ticket_id();
            if self.ticket_repo.get_ticket_by_id(&candidate).await?.is_none() {
                return Ok(candidate);
            }
        }
        Err(DomainError::Internal(
            "Could not allocate a free ticket number".to_string(),
        ))
    }
}
